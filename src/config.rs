//! Configuration file handling.
//!
//! The configuration file is optional. It is read from `--config` (or `$BUDGET_CHARTS_CONFIG`)
//! when given, otherwise from `budget-charts/config.json` in the platform's configuration
//! directory if that file exists. Without a file every setting takes its default.

use crate::error::Res;
use crate::render::ChartFormat;
use crate::utils;
use crate::workbook::Columns;
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "budget-charts";
const CONFIG_JSON: &str = "config.json";
const OUTPUT_DIR: &str = "output";
const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 600;

/// Settings for reading workbooks and writing charts.
///
/// Example configuration:
/// ```json
/// {
///   "amount_column": 1,
///   "category_column": 3,
///   "output_dir": "output",
///   "format": "png",
///   "chart_width": 800,
///   "chart_height": 600,
///   "clear_output": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 0-based column holding the transaction amount.
    amount_column: usize,

    /// 0-based column holding the category.
    category_column: usize,

    /// Where charts are written. Relative paths are relative to the working directory.
    output_dir: PathBuf,

    /// The artifact format.
    format: ChartFormat,

    /// Image width in pixels.
    chart_width: u32,

    /// Image height in pixels.
    chart_height: u32,

    /// Whether the output directory is emptied before charts are written.
    clear_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        let columns = Columns::default();
        Self {
            amount_column: columns.amount,
            category_column: columns.category,
            output_dir: PathBuf::from(OUTPUT_DIR),
            format: ChartFormat::default(),
            chart_width: CHART_WIDTH,
            chart_height: CHART_HEIGHT,
            clear_output: true,
        }
    }
}

impl Config {
    /// Loads the configuration from `path` if given. Otherwise loads the file at the default
    /// location if there is one, or falls back to defaults.
    ///
    /// # Errors
    /// - `path` was given but is not a file
    /// - the file cannot be read or parsed
    /// - the settings are invalid
    pub fn load(path: Option<&Path>) -> Res<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match default_path() {
                Some(path) if path.is_file() => Self::load_file(&path),
                _ => {
                    debug!("No configuration file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn load_file(path: &Path) -> Res<Self> {
        if !path.is_file() {
            bail!("The config file is missing '{}'", path.display())
        }
        let config: Config = utils::deserialize(path)?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Res<()> {
        ensure!(
            self.amount_column != self.category_column,
            "amount_column and category_column must differ (both are {})",
            self.amount_column
        );
        ensure!(
            self.chart_width > 0 && self.chart_height > 0,
            "chart dimensions must be non-zero, got {}x{}",
            self.chart_width,
            self.chart_height
        );
        Ok(())
    }

    /// Replaces the output directory, e.g. from a command line flag.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Replaces the artifact format, e.g. from a command line flag.
    pub fn with_format(mut self, format: ChartFormat) -> Self {
        self.format = format;
        self
    }

    pub fn columns(&self) -> Columns {
        Columns {
            amount: self.amount_column,
            category: self.category_column,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn format(&self) -> ChartFormat {
        self.format
    }

    pub fn chart_width(&self) -> u32 {
        self.chart_width
    }

    pub fn chart_height(&self) -> u32 {
        self.chart_height
    }

    pub fn clear_output(&self) -> bool {
        self.clear_output
    }
}

/// `<config dir>/budget-charts/config.json`, if the platform has a config directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_JSON))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.columns(), Columns::default());
        assert_eq!(config.output_dir(), Path::new("output"));
        assert_eq!(config.format(), ChartFormat::Png);
        assert_eq!((config.chart_width(), config.chart_height()), (800, 600));
        assert!(config.clear_output());
        config.validate().unwrap();
    }

    #[test]
    fn test_load_partial_file() {
        let env = TestEnv::new();
        let path = env.write_file(
            "config.json",
            r#"{ "category_column": 4, "format": "json", "clear_output": false }"#,
        );
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(
            config.columns(),
            Columns {
                amount: 1,
                category: 4
            }
        );
        assert_eq!(config.format(), ChartFormat::Json);
        assert!(!config.clear_output());
        assert_eq!(config.chart_width(), 800);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let env = TestEnv::new();
        let err = Config::load(Some(&env.root().join("nope.json"))).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_load_rejects_same_columns() {
        let env = TestEnv::new();
        let path = env.write_file(
            "config.json",
            r#"{ "amount_column": 2, "category_column": 2 }"#,
        );
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let env = TestEnv::new();
        let path = env.write_file("config.json", "{ amount_column: ");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default()
            .with_output_dir("charts")
            .with_format(ChartFormat::Json);
        assert_eq!(config.output_dir(), Path::new("charts"));
        assert_eq!(config.format(), ChartFormat::Json);
    }
}
