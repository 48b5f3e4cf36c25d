//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::error::Res;
use crate::model::CategoryTotals;
use crate::render::{Chart, ChartRenderer};
use anyhow::bail;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A copy of what a renderer was asked to draw.
#[derive(Debug, Clone)]
pub struct RecordedChart {
    pub id: String,
    pub title: String,
    pub totals: CategoryTotals,
}

/// A renderer that remembers every chart it is given instead of drawing it. Optionally fails on
/// one chart id.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub charts: Vec<RecordedChart>,
    fail_on: Option<String>,
}

impl RecordingRenderer {
    pub fn failing_on(chart_id: &str) -> Self {
        Self {
            charts: Vec::new(),
            fail_on: Some(chart_id.to_string()),
        }
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, chart: &Chart<'_>) -> Res<Vec<PathBuf>> {
        let id = chart.id();
        if self.fail_on.as_deref() == Some(id.as_str()) {
            bail!("Refusing to render {id}");
        }
        self.charts.push(RecordedChart {
            id: id.clone(),
            title: chart.title(),
            totals: chart.totals().clone(),
        });
        Ok(vec![PathBuf::from(format!("{id}.rec"))])
    }
}

/// Test environment with a scratch directory. Holds the TempDir to keep the directory alive for
/// the duration of the test.
pub struct TestEnv {
    temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` to `name` inside the scratch directory and returns the path.
    pub fn write_file(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Creates the directory `name` inside the scratch directory and returns the path.
    pub fn make_dir(&self, name: &str) -> PathBuf {
        let path = self.root().join(name);
        std::fs::create_dir_all(&path).unwrap();
        path
    }
}
