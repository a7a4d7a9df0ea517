//! Transaction display formatting
//!
//! Register tables and detail views for the terminal.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Transaction, DATE_FORMAT};

/// One register row
#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl RegisterRow {
    fn new(txn: &Transaction, currency: &str) -> Self {
        let sign = if txn.amount.is_positive() { "+" } else { "-" };
        Self {
            id: txn.id.value(),
            date: txn.date.format(DATE_FORMAT).to_string(),
            category: txn.category.clone(),
            kind: txn.kind.to_string(),
            amount: format!("{}{}", sign, txn.amount.abs().format_with_symbol(currency)),
            notes: txn.notes.clone().unwrap_or_default(),
        }
    }
}

/// Format a list of transactions as a register table
pub fn format_transaction_register(transactions: &[&Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions yet - add your first one!\n".to_string();
    }

    let rows = transactions.iter().map(|t| RegisterRow::new(t, currency));
    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Date:        {}\n", txn.date.format(DATE_FORMAT)));
    output.push_str(&format!(
        "Notes:       {}\n",
        txn.notes.as_deref().unwrap_or("(none)")
    ));
    output.push_str(&format!("Created:     {}\n", txn.created_at.to_rfc3339()));
    output.push_str(&format!(
        "Updated:     {}\n",
        txn.updated_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "never".to_string())
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionId, TransactionType};
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        let mut txn = Transaction::new(
            TransactionId::new(7),
            TransactionType::Expense,
            Money::from_cents(4550),
            "Food",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        txn.notes = Some("lunch".into());
        txn
    }

    #[test]
    fn test_register_contains_row_values() {
        let txn = sample();
        let output = format_transaction_register(&[&txn], "$");

        assert!(output.contains("ID"));
        assert!(output.contains("2024-03-01"));
        assert!(output.contains("Food"));
        assert!(output.contains("-$45.50"));
        assert!(output.contains("lunch"));
    }

    #[test]
    fn test_empty_register() {
        let output = format_transaction_register(&[], "$");
        assert!(output.contains("No transactions"));
    }

    #[test]
    fn test_details() {
        let output = format_transaction_details(&sample(), "€");

        assert!(output.contains("Transaction: 7"));
        assert!(output.contains("-€45.50"));
        assert!(output.contains("Updated:     never"));
    }
}
