//! Chart renderers: the consumers of aggregated category totals.
//!
//! A renderer receives one `Chart` at a time and writes one artifact per target directory, named
//! after the chart's id (`{label}-expenses` or `{label}-deposits`).

mod json;
mod png;

use crate::error::Res;
use crate::model::CategoryTotals;
use crate::utils;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub use json::JsonRenderer;
pub use png::{draw_pie, PngRenderer};

/// Which of the two per-sheet charts this is.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Expenses,
    Deposits,
}

serde_plain::derive_display_from_serialize!(ChartKind);
serde_plain::derive_fromstr_from_deserialize!(ChartKind);

/// One chart to draw: a sheet label, which side of the ledger, and the totals.
#[derive(Debug, Clone, Copy)]
pub struct Chart<'a> {
    label: &'a str,
    kind: ChartKind,
    totals: &'a CategoryTotals,
}

impl<'a> Chart<'a> {
    pub fn new(label: &'a str, kind: ChartKind, totals: &'a CategoryTotals) -> Self {
        Self {
            label,
            kind,
            totals,
        }
    }

    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn totals(&self) -> &'a CategoryTotals {
        self.totals
    }

    /// The artifact name without an extension, e.g. `January-expenses`.
    pub fn id(&self) -> String {
        format!("{}-{}", self.label, self.kind)
    }

    /// e.g. `January expenses`.
    pub fn title(&self) -> String {
        format!("{} {}", self.label, self.kind)
    }
}

/// Produces an artifact for a chart.
pub trait ChartRenderer {
    /// Draws `chart` and returns the paths of the files written.
    fn render(&mut self, chart: &Chart<'_>) -> Res<Vec<PathBuf>>;
}

/// The artifact format.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    /// A pie chart image.
    #[default]
    Png,
    /// The chart's data as a JSON document.
    Json,
}

serde_plain::derive_display_from_serialize!(ChartFormat);
serde_plain::derive_fromstr_from_deserialize!(ChartFormat);

impl ChartFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Json => "json",
        }
    }
}

/// Creates the renderer for `format`, writing into each of `targets`.
pub fn renderer(
    format: ChartFormat,
    targets: Vec<PathBuf>,
    width: u32,
    height: u32,
) -> Box<dyn ChartRenderer> {
    match format {
        ChartFormat::Png => Box::new(PngRenderer::new(targets, width, height)),
        ChartFormat::Json => Box::new(JsonRenderer::new(targets)),
    }
}

/// A chart that reached some of its targets before a write failed. Renderers return it as the
/// error so the files that do exist can still be reported.
#[derive(Debug)]
pub struct PartialWrite {
    pub written: Vec<PathBuf>,
    pub source: anyhow::Error,
}

impl Display for PartialWrite {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:#} (after writing {} file(s))",
            self.source,
            self.written.len()
        )
    }
}

impl std::error::Error for PartialWrite {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Writes `contents` to `file_name` inside every one of `targets`, stopping at the first failure.
fn write_to_targets(targets: &[PathBuf], file_name: &str, contents: &[u8]) -> Res<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(targets.len());
    for dir in targets {
        let path = dir.join(file_name);
        if let Err(source) = utils::write(&path, contents) {
            if written.is_empty() {
                return Err(source);
            }
            return Err(PartialWrite { written, source }.into());
        }
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;

    #[test]
    fn test_chart_id_and_title() {
        let totals: CategoryTotals = [("Food", Amount::from(-70))].into_iter().collect();
        let chart = Chart::new("2024-01", ChartKind::Expenses, &totals);
        assert_eq!(chart.id(), "2024-01-expenses");
        assert_eq!(chart.title(), "2024-01 expenses");
        let chart = Chart::new("2024-01", ChartKind::Deposits, &totals);
        assert_eq!(chart.id(), "2024-01-deposits");
    }

    #[test]
    fn test_write_to_targets() {
        let dir = tempfile::TempDir::new().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        utils::make_dir(&a).unwrap();
        utils::make_dir(&b).unwrap();
        let written = write_to_targets(&[a.clone(), b.clone()], "x.json", b"{}").unwrap();
        assert_eq!(written, vec![a.join("x.json"), b.join("x.json")]);
        assert!(b.join("x.json").is_file());
    }

    #[test]
    fn test_write_to_missing_target_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = write_to_targets(&[missing], "x.json", b"{}").unwrap_err();
        assert!(err.downcast_ref::<PartialWrite>().is_none());
    }

    #[test]
    fn test_write_keeps_paths_written_before_a_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("good");
        utils::make_dir(&good).unwrap();
        let missing = dir.path().join("missing");
        let err = write_to_targets(&[good.clone(), missing], "x.json", b"{}").unwrap_err();
        let partial = err.downcast_ref::<PartialWrite>().unwrap();
        assert_eq!(partial.written, vec![good.join("x.json")]);
        assert!(good.join("x.json").is_file());
        assert!(err.to_string().contains("after writing 1 file(s)"));
    }
}
