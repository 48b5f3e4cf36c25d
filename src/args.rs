//! These structs provide the CLI interface for the budget-charts CLI.

use crate::render::ChartFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// budget-charts: turn a monthly budget workbook into pie charts.
///
/// The workbook is an .xlsx file with one sheet per month. Each sheet has a header row followed by
/// one transaction per row, with the amount in column B and the category in column D (both can be
/// changed in the config file). For every sheet two charts are written: `<sheet>-expenses` from
/// the negative amounts and `<sheet>-deposits` from the positive ones, each summed by category.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Aggregate every sheet of a workbook and write its expenses and deposits charts.
    ///
    /// The output directory is emptied first (unless `clear_output` is false in the config file)
    /// so it only ever holds the charts of the most recent workbook.
    Chart(ChartArgs),
    /// List the charts in the output directory, sorted by file name.
    List(ListArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// Path to a JSON configuration file. Defaults to budget-charts/config.json in your platform's
    /// configuration directory, if it exists.
    #[arg(long, env = "BUDGET_CHARTS_CONFIG")]
    config: Option<PathBuf>,
}

impl Common {
    pub fn new(log_level: LevelFilter, config: Option<PathBuf>) -> Self {
        Self { log_level, config }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

/// (Not shown): Args for the `budget-charts chart` command.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// The .xlsx workbook to read.
    workbook: PathBuf,

    /// Where to write the charts. Overrides `output_dir` from the config file (default: output).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// An existing directory to also save a copy of every chart to.
    #[arg(long)]
    copy_to: Option<PathBuf>,

    /// The artifact format. Overrides `format` from the config file (default: png).
    #[arg(long)]
    format: Option<ChartFormat>,
}

impl ChartArgs {
    pub fn new(workbook: impl Into<PathBuf>) -> Self {
        Self {
            workbook: workbook.into(),
            output_dir: None,
            copy_to: None,
            format: None,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_copy_to(mut self, copy_to: impl Into<PathBuf>) -> Self {
        self.copy_to = Some(copy_to.into());
        self
    }

    pub fn with_format(mut self, format: ChartFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn workbook(&self) -> &Path {
        &self.workbook
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn copy_to(&self) -> Option<&Path> {
        self.copy_to.as_deref()
    }

    pub fn format(&self) -> Option<ChartFormat> {
        self.format
    }
}

/// (Not shown): Args for the `budget-charts list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// The directory to list. Overrides `output_dir` from the config file (default: output).
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl ListArgs {
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        <Args as CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_chart() {
        let args = Args::try_parse_from([
            "budget-charts",
            "--log-level",
            "debug",
            "chart",
            "budget.xlsx",
            "--copy-to",
            "/tmp/charts",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        match args.command() {
            Command::Chart(chart) => {
                assert_eq!(chart.workbook(), Path::new("budget.xlsx"));
                assert_eq!(chart.copy_to(), Some(Path::new("/tmp/charts")));
                assert_eq!(chart.format(), Some(ChartFormat::Json));
                assert_eq!(chart.output_dir(), None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_list() {
        let args = Args::try_parse_from(["budget-charts", "list", "--output-dir", "charts"]).unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
        match args.command() {
            Command::List(list) => assert_eq!(list.output_dir(), Some(Path::new("charts"))),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
