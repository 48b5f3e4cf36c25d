//! Implements the `Workbook` and `Sheet` traits using in-memory rows.
//!
//! This is compiled into the library, not just the tests, so that callers who already hold
//! transaction rows can run them through the same aggregation and rendering path.

use crate::error::Res;
use crate::model::{Cell, Row};
use crate::workbook::{Columns, Sheet, Workbook};
use anyhow::{bail, Context};
use std::io::Cursor;

/// A sheet whose rows live in memory. `None` entries are absent rows.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MemorySheet {
    label: String,
    rows: Vec<Option<Row>>,
    row_bound: usize,
}

impl MemorySheet {
    /// Create a sheet from `rows`, where `rows[0]` stands in for the header. The reported bound is
    /// exactly the number of rows.
    pub fn new(label: impl Into<String>, rows: Vec<Option<Row>>) -> Self {
        let row_bound = rows.len();
        Self {
            label: label.into(),
            rows,
            row_bound,
        }
    }

    /// Create a sheet from transaction rows, prepending a blank header row.
    pub fn from_rows(label: impl Into<String>, rows: impl IntoIterator<Item = Row>) -> Self {
        let rows = std::iter::once(Some(Row::default()))
            .chain(rows.into_iter().map(Some))
            .collect();
        Self::new(label, rows)
    }

    /// Override the reported row bound, e.g. to mimic a spreadsheet that claims more rows than it
    /// has.
    pub fn with_row_bound(mut self, row_bound: usize) -> Self {
        self.row_bound = row_bound;
        self
    }

    /// Parse CSV text (header included) into a sheet. Every field is interpreted with
    /// `Cell::parse`, and a record whose fields are all blank becomes an absent row.
    pub fn from_csv(label: impl Into<String>, csv_data: &str, columns: Columns) -> Res<Self> {
        let label = label.into();
        let records = load_csv(csv_data)
            .with_context(|| format!("Unable to parse CSV data for sheet '{label}'"))?;
        let rows = records
            .iter()
            .map(|record| {
                if record.iter().all(|field| field.trim().is_empty()) {
                    return None;
                }
                let cell = |ix: usize| record.get(ix).map(|s| Cell::parse(s)).unwrap_or_default();
                Some(Row::new(cell(columns.amount), cell(columns.category)))
            })
            .collect();
        Ok(Self::new(label, rows))
    }
}

impl Sheet for MemorySheet {
    fn label(&self) -> &str {
        &self.label
    }

    fn row_bound(&self) -> usize {
        self.row_bound
    }

    fn row(&self, index: usize) -> Option<Row> {
        self.rows.get(index).cloned().flatten()
    }
}

/// An ordered collection of `MemorySheet`s.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MemoryWorkbook {
    sheets: Vec<MemorySheet>,
}

impl MemoryWorkbook {
    pub fn new(sheets: Vec<MemorySheet>) -> Self {
        Self { sheets }
    }

    pub fn push(&mut self, sheet: MemorySheet) {
        self.sheets.push(sheet);
    }

    /// Builds a workbook from `(label, csv)` pairs, in order.
    pub fn from_csv<'a>(
        sheets: impl IntoIterator<Item = (&'a str, &'a str)>,
        columns: Columns,
    ) -> Res<Self> {
        let sheets = sheets
            .into_iter()
            .map(|(label, data)| MemorySheet::from_csv(label, data, columns))
            .collect::<Res<Vec<_>>>()?;
        Ok(Self::new(sheets))
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn sheet(&mut self, index: usize) -> Res<Box<dyn Sheet>> {
        match self.sheets.get(index) {
            Some(sheet) => Ok(Box::new(sheet.clone())),
            None => bail!(
                "Sheet index {index} is out of range, the workbook has {} sheets",
                self.sheets.len()
            ),
        }
    }
}

/// Loads data from a CSV-formatted string.
fn load_csv(csv_data: &str) -> Res<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false) // Ensure headers are treated as part of the data
        .flexible(true)
        .from_reader(Cursor::new(csv_data.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let row: Vec<String> = record.iter().map(|field| field.to_string()).collect();
        rows.push(row);
    }
    Ok(rows)
}
