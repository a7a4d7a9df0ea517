//! Monthly Summary
//!
//! Net amount per calendar month, newest month first.

use std::collections::BTreeMap;

use crate::models::{Money, Store};

/// Net total for one `YYYY-MM` month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyNet {
    pub month: String,
    pub net: Money,
    pub transaction_count: usize,
}

/// Monthly Summary Report
#[derive(Debug, Clone)]
pub struct MonthlySummaryReport {
    /// Months sorted descending
    pub months: Vec<MonthlyNet>,
    /// Sum over all months
    pub total: Money,
}

impl MonthlySummaryReport {
    /// Group transactions by year-month and sum their amounts
    ///
    /// Returns `None` for an empty store.
    pub fn generate(store: &Store) -> Option<Self> {
        if store.is_empty() {
            return None;
        }

        let mut by_month: BTreeMap<String, (Money, usize)> = BTreeMap::new();
        for txn in &store.transactions {
            let entry = by_month
                .entry(txn.month_key())
                .or_insert((Money::zero(), 0));
            entry.0 += txn.amount;
            entry.1 += 1;
        }

        let months: Vec<MonthlyNet> = by_month
            .into_iter()
            .rev()
            .map(|(month, (net, transaction_count))| MonthlyNet {
                month,
                net,
                transaction_count,
            })
            .collect();
        let total = months.iter().map(|m| m.net).sum();

        Some(Self { months, total })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Monthly summary (YYYY-MM -> Net)\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<10} {:>16} {:>10}\n", "Month", "Net", "Count"));
        output.push_str(&"-".repeat(40));
        output.push('\n');

        for month in &self.months {
            output.push_str(&format!(
                "{:<10} {:>16} {:>10}\n",
                month.month,
                month.net.to_string(),
                month.transaction_count
            ));
        }

        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<10} {:>16}\n", "Total", self.total.to_string()));

        output
    }
}
