//! Runs every sheet of a workbook through the aggregator and hands the results to a renderer.

use crate::aggregate::aggregate;
use crate::error::Res;
use crate::model::{CategoryTotals, SheetTotals};
use crate::render::{Chart, ChartKind, ChartRenderer, PartialWrite};
use crate::workbook::Workbook;
use anyhow::Context;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// What happened to one sheet.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct SheetReport {
    label: String,
    totals: SheetTotals,
    artifacts: Vec<PathBuf>,
    failures: Vec<RenderFailure>,
}

impl SheetReport {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn totals(&self) -> &SheetTotals {
        &self.totals
    }

    pub fn artifacts(&self) -> &[PathBuf] {
        &self.artifacts
    }

    pub fn failures(&self) -> &[RenderFailure] {
        &self.failures
    }
}

/// A chart that could not be produced.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RenderFailure {
    pub chart: String,
    pub message: String,
}

/// The outcome of processing a whole workbook.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct ProcessReport {
    sheets: Vec<SheetReport>,
}

impl ProcessReport {
    pub fn sheets(&self) -> &[SheetReport] {
        &self.sheets
    }

    pub fn artifact_count(&self) -> usize {
        self.sheets.iter().map(|s| s.artifacts.len()).sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RenderFailure> {
        self.sheets.iter().flat_map(|s| s.failures.iter())
    }
}

/// Aggregates each sheet of `workbook`, in order, then renders an expenses chart and a deposits
/// chart for each one.
///
/// All sheets are read before anything is rendered, so a workbook that fails part way through
/// reading produces no charts at all. Once rendering starts, a chart that fails is recorded in the
/// report and the rest are still attempted.
pub fn process(
    workbook: &mut dyn Workbook,
    renderer: &mut dyn ChartRenderer,
) -> Res<ProcessReport> {
    let mut sheets = Vec::with_capacity(workbook.sheet_count());
    for index in 0..workbook.sheet_count() {
        let sheet = workbook
            .sheet(index)
            .with_context(|| format!("Unable to load sheet number {}", index + 1))?;
        let totals = aggregate(sheet.as_ref());
        sheets.push(SheetReport {
            label: sheet.label().to_string(),
            totals,
            ..SheetReport::default()
        });
    }

    for report in &mut sheets {
        let SheetReport {
            label,
            totals,
            artifacts,
            failures,
        } = report;
        let charts: [(ChartKind, &CategoryTotals); 2] = [
            (ChartKind::Expenses, &totals.expenses),
            (ChartKind::Deposits, &totals.deposits),
        ];
        for (kind, category_totals) in charts {
            let chart = Chart::new(label.as_str(), kind, category_totals);
            match renderer.render(&chart) {
                Ok(paths) => {
                    debug!("Rendered '{}' to {paths:?}", chart.id());
                    artifacts.extend(paths);
                }
                Err(e) => {
                    warn!("Unable to render '{}': {e:#}", chart.id());
                    if let Some(partial) = e.downcast_ref::<PartialWrite>() {
                        artifacts.extend(partial.written.iter().cloned());
                    }
                    failures.push(RenderFailure {
                        chart: chart.id(),
                        message: format!("{e:#}"),
                    });
                }
            }
        }
    }

    Ok(ProcessReport { sheets })
}
