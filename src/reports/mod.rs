//! Reports module for the ledger
//!
//! Read-only aggregations over a store: net per month and net per category.
//! Both return `None` when there is nothing to report.

pub mod category;
pub mod monthly;

pub use category::{CategoryBreakdownReport, CategoryTotal};
pub use monthly::{MonthlyNet, MonthlySummaryReport};
