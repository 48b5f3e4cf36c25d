use crate::error::Res;
use crate::model::{Amount, CategoryTotals};
use crate::render::{write_to_targets, Chart, ChartKind, ChartRenderer};
use anyhow::Context;
use serde::Serialize;
use std::path::PathBuf;

/// Writes each chart's data as `{id}.json` into every target directory, for consumers that draw
/// their own charts.
#[derive(Debug, Clone)]
pub struct JsonRenderer {
    targets: Vec<PathBuf>,
}

impl JsonRenderer {
    pub fn new(targets: Vec<PathBuf>) -> Self {
        Self { targets }
    }
}

/// The document written for one chart.
///
/// ```json
/// {
///   "label": "January",
///   "kind": "expenses",
///   "title": "January expenses",
///   "total": "-$70.00",
///   "categories": { "Food": "-$70.00" }
/// }
/// ```
#[derive(Debug, Serialize)]
struct ChartDocument<'a> {
    label: &'a str,
    kind: ChartKind,
    title: String,
    total: Amount,
    categories: &'a CategoryTotals,
}

impl ChartRenderer for JsonRenderer {
    fn render(&mut self, chart: &Chart<'_>) -> Res<Vec<PathBuf>> {
        let document = ChartDocument {
            label: chart.label(),
            kind: chart.kind(),
            title: chart.title(),
            total: chart.totals().total(),
            categories: chart.totals(),
        };
        let json = serde_json::to_string_pretty(&document)
            .with_context(|| format!("Failed to serialize '{}' to JSON", chart.title()))?;
        write_to_targets(&self.targets, &format!("{}.json", chart.id()), json.as_bytes())
    }
}
