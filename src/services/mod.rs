//! Service layer for the ledger
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, defaults and persistence after each change.

pub mod transaction;

pub use transaction::{CreateTransactionInput, TransactionService, RESET_CONFIRMATION};
