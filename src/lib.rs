//! Reads a monthly budget workbook and turns every sheet into two pie charts: one for expenses and
//! one for deposits, each aggregated by category.

mod aggregate;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
mod output;
mod process;
pub mod render;
mod utils;
pub mod workbook;

#[cfg(test)]
mod test;

pub use aggregate::aggregate;
pub use config::Config;
pub use error::{Error, ErrorType, Res, Result};
pub use output::OutputDir;
pub use process::{process, ProcessReport, SheetReport};
