//! ledger-cli - a console personal finance ledger
//!
//! Records income and expense transactions in a single JSON file, keeps that
//! file consistent with atomic saves, and produces monthly and per-category
//! net reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Store, transactions, ids and money
//! - `storage`: JSON file storage with atomic writes and quarantine
//! - `services`: Transaction operations over an explicit store
//! - `reports`: Monthly summary and category breakdown
//! - `audit`: Append-only audit log
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,no_run
//! use ledger::models::{Money, TransactionType};
//! use ledger::services::{CreateTransactionInput, TransactionService};
//! use ledger::storage::Storage;
//!
//! let storage = Storage::new("budget_data.json");
//! let (mut store, _status) = storage.load_store();
//! let service = TransactionService::new(&storage);
//! let id = service.create(
//!     &mut store,
//!     CreateTransactionInput::new(TransactionType::Expense, Money::from_cents(4550)),
//! )?;
//! # Ok::<(), ledger::LedgerError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
