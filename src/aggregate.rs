//! Folds one sheet's rows into expense and deposit totals by category.

use crate::model::SheetTotals;
use crate::workbook::Sheet;
use tracing::{debug, trace};

/// Reads `sheet` once, from the row after the header up to its reported bound, and sums every
/// well-formed row into the mapping selected by the sign of its amount.
///
/// - An absent row ends the pass; later rows are never visited.
/// - A row without a numeric amount or without a text category is skipped.
/// - Zero amounts are counted nowhere.
/// - A row whose amount would overflow its category's total is skipped.
/// - The net total row (empty category) is dropped from both mappings afterwards.
pub fn aggregate(sheet: &dyn Sheet) -> SheetTotals {
    let mut totals = SheetTotals::default();
    let label = sheet.label();

    for index in 1..sheet.row_bound() {
        let Some(row) = sheet.row(index) else {
            debug!("Sheet '{label}' has no row {index}, stopping");
            break;
        };

        let (Some(amount), Some(category)) = (row.amount(), row.category()) else {
            trace!(
                "Skipping row {index} of '{label}': amount {:?}, category {:?}",
                row.amount_cell(),
                row.category_cell()
            );
            continue;
        };

        let folded = if amount.is_negative() {
            totals.expenses.fold(category, amount)
        } else if amount.is_positive() {
            totals.deposits.fold(category, amount)
        } else {
            true
        };
        if !folded {
            trace!("Skipping row {index} of '{label}': {category} total would overflow");
        }
    }

    if let Some(net) = totals.expenses.remove_net_total() {
        trace!("Removed net total {net} from the expenses of '{label}'");
    }
    if let Some(net) = totals.deposits.remove_net_total() {
        trace!("Removed net total {net} from the deposits of '{label}'");
    }

    debug!(
        "Sheet '{label}': {} expense categories totalling {}, {} deposit categories totalling {}",
        totals.expenses.len(),
        totals.expenses.total(),
        totals.deposits.len(),
        totals.deposits.total()
    );
    totals
}
