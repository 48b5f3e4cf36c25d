use crate::model::Amount;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single cell as seen by the aggregator. Workbook sources translate their native cell types
/// into this.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Number(Amount),
    Text(String),
    /// Anything else (booleans, dates, error values). Kept for logging only.
    Other(String),
}

impl Cell {
    /// Interprets raw text the way a spreadsheet would: blank is `Empty`, anything that parses as
    /// an amount is a `Number`, the rest is `Text`.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Cell::Empty;
        }
        match Amount::from_str(raw) {
            Ok(amount) => Cell::Number(amount),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// One transaction row: the two fields the aggregator cares about.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Row {
    amount: Cell,
    category: Cell,
}

impl Row {
    pub fn new(amount: Cell, category: Cell) -> Self {
        Self { amount, category }
    }

    /// A well-formed row with a numeric amount and a text category.
    pub fn transaction(amount: impl Into<Amount>, category: impl Into<String>) -> Self {
        Self::new(Cell::Number(amount.into()), Cell::Text(category.into()))
    }

    /// The amount, if the amount cell holds a number.
    pub fn amount(&self) -> Option<Amount> {
        match &self.amount {
            Cell::Number(amount) => Some(*amount),
            _ => None,
        }
    }

    /// The category, if the category cell holds text. An empty string is a valid category (it
    /// marks the net total row).
    pub fn category(&self) -> Option<&str> {
        match &self.category {
            Cell::Text(category) => Some(category.as_str()),
            _ => None,
        }
    }

    pub fn amount_cell(&self) -> &Cell {
        &self.amount
    }

    pub fn category_cell(&self) -> &Cell {
        &self.category
    }
}
