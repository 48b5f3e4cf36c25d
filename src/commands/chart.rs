use crate::args::ChartArgs;
use crate::commands::Out;
use crate::error::{Error, ErrorType, IntoResult, Result};
use crate::output::{existing_dir, OutputDir};
use crate::process::{process, ProcessReport};
use crate::render;
use crate::workbook::{Workbook, XlsxWorkbook, XLSX_EXTENSION};
use crate::Config;
use anyhow::anyhow;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The structured result of a `chart` run.
#[derive(Debug, Clone, Serialize)]
pub struct ChartRun {
    pub workbook: PathBuf,
    pub output_dir: PathBuf,
    /// The extra directory charts were copied to, if one was requested and exists.
    pub copied_to: Option<PathBuf>,
    pub report: ProcessReport,
}

/// Handles the `budget-charts chart` command.
///
/// # Errors
/// - `WrongExtension` if the file is not an `.xlsx` file
/// - `NotFound` if the file does not exist
/// - `Unreadable` if the workbook or one of its sheets cannot be read; no charts are written
/// - `Io` if the output directory cannot be prepared
pub fn chart(config: Config, args: &ChartArgs) -> Result<Out<ChartRun>> {
    let mut config = config;
    if let Some(output_dir) = args.output_dir() {
        config = config.with_output_dir(output_dir);
    }
    if let Some(format) = args.format() {
        config = config.with_format(format);
    }

    let path = args.workbook();
    if !has_xlsx_extension(path) {
        return Err(Error::new(
            ErrorType::WrongExtension,
            anyhow!("Please select an Excel (.xlsx) file, got '{}'", path.display()),
        ));
    }
    if !path.is_file() {
        return Err(Error::new(
            ErrorType::NotFound,
            anyhow!(
                "This Excel file could not be found, check the spelling: '{}'",
                path.display()
            ),
        ));
    }

    let mut workbook = XlsxWorkbook::open(path, config.columns())
        .map_err(|e| e.context(format!("This file could not be processed: '{}'", path.display())))
        .pub_result(ErrorType::Unreadable)?;
    debug!(
        "Workbook {} has sheets {:?}",
        path.display(),
        workbook.sheet_names()
    );

    chart_workbook(&config, &mut workbook, path, args.copy_to())
}

/// Writes the charts for an already opened `workbook`.
pub(crate) fn chart_workbook(
    config: &Config,
    workbook: &mut dyn Workbook,
    source: &Path,
    copy_to: Option<&Path>,
) -> Result<Out<ChartRun>> {
    let output = OutputDir::new(config.output_dir());
    let prepared = if config.clear_output() {
        output.reset()
    } else {
        output.ensure()
    };
    prepared.pub_result(ErrorType::Io)?;

    let mut targets = vec![output.path().to_path_buf()];
    let copied_to = copy_to.and_then(existing_dir);
    match (copy_to, &copied_to) {
        (Some(_), Some(dir)) => targets.push(dir.clone()),
        (Some(requested), None) => warn!(
            "The directory '{}' does not exist, charts will only be saved to '{}'",
            requested.display(),
            output.path().display()
        ),
        (None, _) => {}
    }

    let mut renderer = render::renderer(
        config.format(),
        targets,
        config.chart_width(),
        config.chart_height(),
    );
    let report = process(workbook, renderer.as_mut())
        .map_err(|e| e.context(format!("This file could not be processed: '{}'", source.display())))
        .pub_result(ErrorType::Unreadable)?;

    let mut message = format!(
        "Created {} charts for {} sheets of '{}' in '{}'.",
        report.artifact_count(),
        report.sheets().len(),
        source.display(),
        output.path().display()
    );
    match (copy_to, &copied_to) {
        (Some(_), Some(dir)) => {
            message.push_str(&format!(" Copies saved to '{}'.", dir.display()));
        }
        (Some(requested), None) => {
            message.push_str(&format!(
                " Failed to save to '{}'. Directory not found; check the spelling.",
                requested.display()
            ));
        }
        (None, _) => {}
    }
    let failed: Vec<&str> = report.failures().map(|f| f.chart.as_str()).collect();
    if !failed.is_empty() {
        message.push_str(&format!(
            " {} charts could not be rendered: {}.",
            failed.len(),
            failed.join(", ")
        ));
    }

    Ok(Out::new(
        message,
        ChartRun {
            workbook: source.to_path_buf(),
            output_dir: output.path().to_path_buf(),
            copied_to,
            report,
        },
    ))
}

fn has_xlsx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case(XLSX_EXTENSION))
}
