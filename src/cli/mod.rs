//! CLI command handlers
//!
//! This module contains the implementation of CLI commands and the
//! interactive menu, bridging user input with the service layer.

pub mod report;
pub mod shell;
pub mod transaction;

pub use report::{handle_report_command, ReportCommands};
pub use shell::Shell;
pub use transaction::{handle_transaction_command, TransactionCommands};
