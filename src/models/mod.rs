//! Core data models for the ledger
//!
//! This module contains the data structures that make up a ledger: the
//! store aggregate, transactions, ids and money amounts.

pub mod ids;
pub mod money;
pub mod store;
pub mod transaction;

pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use store::Store;
pub use transaction::{
    parse_date, resolve_amount, PatchWarning, RawUpdate, Transaction, TransactionPatch,
    TransactionType, DATE_FORMAT, DEFAULT_CATEGORY,
};
