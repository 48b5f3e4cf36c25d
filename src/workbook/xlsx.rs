//! Implements the `Workbook` and `Sheet` traits for `.xlsx` files using `calamine`.

use crate::error::Res;
use crate::model::{Amount, Cell, Row};
use crate::workbook::{Columns, Sheet, Workbook};
use anyhow::Context;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::trace;

/// The only file extension accepted as workbook input.
pub const XLSX_EXTENSION: &str = "xlsx";

/// An open `.xlsx` workbook. Sheets are read lazily, one at a time.
pub struct XlsxWorkbook {
    path: PathBuf,
    inner: Xlsx<BufReader<File>>,
    sheet_names: Vec<String>,
    columns: Columns,
}

impl XlsxWorkbook {
    /// Opens the workbook at `path`. Fails if the file is not a readable `.xlsx` archive.
    pub fn open(path: impl AsRef<Path>, columns: Columns) -> Res<Self> {
        let path = path.as_ref();
        let inner: Xlsx<_> = open_workbook(path)
            .with_context(|| format!("Unable to open workbook {}", path.display()))?;
        let sheet_names = inner.sheet_names();
        trace!("Opened {} with sheets {sheet_names:?}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            inner,
            sheet_names,
            columns,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }
}

impl Workbook for XlsxWorkbook {
    fn sheet_count(&self) -> usize {
        self.sheet_names.len()
    }

    fn sheet(&mut self, index: usize) -> Res<Box<dyn Sheet>> {
        let label = self
            .sheet_names
            .get(index)
            .cloned()
            .with_context(|| format!("No sheet at index {index}"))?;
        let range = self
            .inner
            .worksheet_range_at(index)
            .with_context(|| format!("Sheet '{label}' is missing from the workbook"))?
            .with_context(|| {
                format!(
                    "Unable to read sheet '{label}' from {}",
                    self.path.display()
                )
            })?;
        Ok(Box::new(XlsxSheet::new(label, range, self.columns)))
    }
}

/// One worksheet's used range.
#[derive(Debug, Clone)]
pub struct XlsxSheet {
    label: String,
    range: Range<Data>,
    columns: Columns,
}

impl XlsxSheet {
    pub fn new(label: impl Into<String>, range: Range<Data>, columns: Columns) -> Self {
        Self {
            label: label.into(),
            range,
            columns,
        }
    }

    fn cell(&self, row: u32, col: usize) -> Cell {
        let Ok(col) = u32::try_from(col) else {
            return Cell::Empty;
        };
        self.range
            .get_value((row, col))
            .map(to_cell)
            .unwrap_or_default()
    }
}

impl Sheet for XlsxSheet {
    fn label(&self) -> &str {
        &self.label
    }

    /// One past the last used row.
    fn row_bound(&self) -> usize {
        self.range
            .end()
            .map(|(row, _)| row as usize + 1)
            .unwrap_or_default()
    }

    /// Rows outside the used range, and rows with nothing in them, are absent.
    fn row(&self, index: usize) -> Option<Row> {
        let (start, end) = (self.range.start()?, self.range.end()?);
        let row = u32::try_from(index).ok()?;
        if row < start.0 || row > end.0 {
            return None;
        }
        let blank = (start.1..=end.1).all(|col| {
            self.range
                .get_value((row, col))
                .map_or(true, |data| matches!(data, Data::Empty))
        });
        if blank {
            return None;
        }
        Some(Row::new(
            self.cell(row, self.columns.amount),
            self.cell(row, self.columns.category),
        ))
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Float(f) => Amount::from_f64(*f)
            .map(Cell::Number)
            .unwrap_or_else(|| Cell::Other(f.to_string())),
        Data::Int(i) => Cell::Number(Amount::from(*i)),
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Other(other.to_string()),
    }
}
