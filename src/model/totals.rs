use crate::model::Amount;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// The category name used by the row that carries a sheet's net gain or loss.
pub const NET_TOTAL_CATEGORY: &str = "";

/// Category name -> summed amount. Names match exactly (case-sensitive). Iteration is sorted by
/// name, which keeps chart series order stable from run to run.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals(BTreeMap<String, Amount>);

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the running total for `category`, inserting it if unseen.
    ///
    /// Returns `false` and leaves the total untouched if the sum would overflow.
    pub fn fold(&mut self, category: &str, amount: Amount) -> bool {
        match self.0.get_mut(category) {
            Some(total) => match total.checked_add(amount) {
                Some(sum) => {
                    *total = sum;
                    true
                }
                None => false,
            },
            None => {
                self.0.insert(category.to_string(), amount);
                true
            }
        }
    }

    /// Drops the net total row's key. Returns its amount if it was present.
    pub fn remove_net_total(&mut self) -> Option<Amount> {
        self.0.remove(NET_TOTAL_CATEGORY)
    }

    pub fn get(&self, category: &str) -> Option<Amount> {
        self.0.get(category).copied()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Amount> {
        self.0.iter()
    }

    /// The sum over all categories, saturating at the bounds of `Decimal`.
    pub fn total(&self) -> Amount {
        self.0.values().copied().sum()
    }
}

impl<'a> IntoIterator for &'a CategoryTotals {
    type Item = (&'a String, &'a Amount);
    type IntoIter = btree_map::Iter<'a, String, Amount>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, Amount)> for CategoryTotals {
    fn from_iter<T: IntoIterator<Item = (S, Amount)>>(iter: T) -> Self {
        let mut totals = CategoryTotals::new();
        for (category, amount) in iter {
            let category: String = category.into();
            totals.fold(&category, amount);
        }
        totals
    }
}

/// The two mappings produced for one sheet.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SheetTotals {
    pub expenses: CategoryTotals,
    pub deposits: CategoryTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_inserts_then_accumulates() {
        let mut totals = CategoryTotals::new();
        totals.fold("Food", Amount::from(-50));
        totals.fold("Food", Amount::from(-20));
        totals.fold("Rent", Amount::from(-900));
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("Food"), Some(Amount::from(-70)));
        assert_eq!(totals.total(), Amount::from(-970));
    }

    #[test]
    fn test_fold_refuses_overflow() {
        let big = Amount::new(rust_decimal::Decimal::MAX);
        let mut totals = CategoryTotals::new();
        assert!(totals.fold("Invest", big));
        assert!(!totals.fold("Invest", big));
        assert_eq!(totals.get("Invest"), Some(big));
        assert!(totals.fold("Other", big));
        assert_eq!(totals.total(), big);
    }

    #[test]
    fn test_categories_are_case_sensitive() {
        let totals: CategoryTotals = [("food", Amount::from(1)), ("Food", Amount::from(2))]
            .into_iter()
            .collect();
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_remove_net_total() {
        let mut totals: CategoryTotals = [("", Amount::from(-5)), ("Food", Amount::from(-50))]
            .into_iter()
            .collect();
        assert_eq!(totals.remove_net_total(), Some(Amount::from(-5)));
        assert!(!totals.contains(NET_TOTAL_CATEGORY));
        assert_eq!(totals.remove_net_total(), None);
    }

    #[test]
    fn test_serializes_as_map() {
        let totals: CategoryTotals = [("Paycheck", Amount::from(30))].into_iter().collect();
        let json = serde_json::to_string(&totals).unwrap();
        assert_eq!(json, r#"{"Paycheck":"$30.00"}"#);
    }
}
