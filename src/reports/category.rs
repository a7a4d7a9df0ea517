//! Category Breakdown
//!
//! Net amount per category, largest magnitude first regardless of sign.

use std::collections::HashMap;

use crate::models::{Money, Store};

/// Net total for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub transaction_count: usize,
}

/// Category Breakdown Report
#[derive(Debug, Clone)]
pub struct CategoryBreakdownReport {
    /// Categories sorted by absolute total descending
    pub categories: Vec<CategoryTotal>,
}

impl CategoryBreakdownReport {
    /// Group transactions by category and sum their amounts
    ///
    /// Returns `None` for an empty store. Categories with the same absolute
    /// total are ordered by name.
    pub fn generate(store: &Store) -> Option<Self> {
        if store.is_empty() {
            return None;
        }

        let mut by_category: HashMap<&str, (Money, usize)> = HashMap::new();
        for txn in &store.transactions {
            let entry = by_category
                .entry(txn.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 += txn.amount;
            entry.1 += 1;
        }

        let mut categories: Vec<CategoryTotal> = by_category
            .into_iter()
            .map(|(category, (total, transaction_count))| CategoryTotal {
                category: category.to_string(),
                total,
                transaction_count,
            })
            .collect();
        categories.sort_by(|a, b| {
            b.total
                .abs()
                .cmp(&a.total.abs())
                .then_with(|| a.category.cmp(&b.category))
        });

        Some(Self { categories })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Category totals\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>14} {:>10}\n",
            "Category", "Total", "Count"
        ));
        output.push_str(&"-".repeat(50));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<24} {:>14} {:>10}\n",
                row.category,
                row.total.to_string(),
                row.transaction_count
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Transaction, TransactionType};
    use chrono::NaiveDate;

    fn store_with(entries: &[(&str, TransactionType, i64)]) -> Store {
        let mut store = Store::new();
        for (category, kind, cents) in entries {
            let id = store.allocate_id();
            store.transactions.push(Transaction::new(
                id,
                *kind,
                Money::from_cents(*cents),
                *category,
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ));
        }
        store
    }

    #[test]
    fn test_empty_store_has_nothing_to_report() {
        assert!(CategoryBreakdownReport::generate(&Store::new()).is_none());
    }

    #[test]
    fn test_sorted_by_absolute_total() {
        use TransactionType::*;
        let store = store_with(&[
            ("Coffee", Expense, 500),
            ("Gifts", Income, 3000),
            ("Rent", Expense, 6000),
            ("Rent", Expense, 4000),
        ]);

        let report = CategoryBreakdownReport::generate(&store).unwrap();
        let totals: Vec<_> = report
            .categories
            .iter()
            .map(|c| (c.category.as_str(), c.total.cents()))
            .collect();

        assert_eq!(
            totals,
            vec![("Rent", -10000), ("Gifts", 3000), ("Coffee", -500)]
        );
        assert_eq!(report.categories[0].transaction_count, 2);
    }

    #[test]
    fn test_large_amounts_in_one_category() {
        use TransactionType::*;
        let store = store_with(&[
            ("Salary", Income, Money::MAX_CENTS),
            ("Salary", Income, Money::MAX_CENTS),
            ("Losses", Expense, i64::MAX),
            ("Losses", Expense, i64::MAX),
        ]);

        let report = CategoryBreakdownReport::generate(&store).unwrap();
        assert_eq!(report.categories[0].category, "Losses");
        assert_eq!(report.categories[0].total.cents(), -i64::MAX - 1);
        assert_eq!(report.categories[1].total.cents(), Money::MAX_CENTS * 2);
    }

    #[test]
    fn test_mixed_signs_net_out() {
        use TransactionType::*;
        let store = store_with(&[("Side", Income, 1000), ("Side", Expense, 1000)]);

        let report = CategoryBreakdownReport::generate(&store).unwrap();
        assert_eq!(report.categories.len(), 1);
        assert!(report.categories[0].total.is_zero());
    }
}
