//! Types that represent the core data model: rows read from a sheet and the category totals
//! aggregated from them.
mod amount;
mod row;
mod totals;

pub use amount::{Amount, AmountError};
pub use row::{Cell, Row};
pub use totals::{CategoryTotals, SheetTotals, NET_TOTAL_CATEGORY};
