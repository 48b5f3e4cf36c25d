//! Workbook sources: the things that hand rows to the aggregator.
//!
//! The aggregator only ever sees the `Workbook` and `Sheet` traits. `XlsxWorkbook` reads a real
//! `.xlsx` file and `MemoryWorkbook` holds rows in memory (optionally seeded from CSV text).

mod memory;
mod xlsx;

use crate::error::Res;
use crate::model::Row;
use serde::{Deserialize, Serialize};

pub use memory::{MemorySheet, MemoryWorkbook};
pub use xlsx::{XlsxSheet, XlsxWorkbook, XLSX_EXTENSION};

/// One month of transactions.
pub trait Sheet {
    /// The sheet name. Used as the chart title and as the artifact name prefix.
    fn label(&self) -> &str;

    /// An exclusive upper bound on row indices. It may overshoot the rows that really exist.
    fn row_bound(&self) -> usize;

    /// The row at `index` (0 is the header), or `None` if there is no row there. `None` marks the
    /// end of the data.
    fn row(&self, index: usize) -> Option<Row>;
}

/// A sequence of sheets in their native order.
pub trait Workbook {
    fn sheet_count(&self) -> usize;

    /// Loads the sheet at `index`. Fails if the underlying source cannot be read.
    fn sheet(&mut self, index: usize) -> Res<Box<dyn Sheet>>;
}

/// Which 0-based columns hold the amount and the category.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Columns {
    pub amount: usize,
    pub category: usize,
}

impl Default for Columns {
    /// Column B holds the amount and column D holds the category.
    fn default() -> Self {
        Self {
            amount: 1,
            category: 3,
        }
    }
}
