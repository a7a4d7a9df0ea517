//! Audit logging for the ledger
//!
//! Records every create, update, delete and reset with before/after values
//! in an append-only audit log next to the data file.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single audit log entry with timestamp, operation,
//!   entity information, and optional before/after values.
//! - `AuditLogger`: appends entries to the audit log file using a
//!   line-delimited JSON format (JSONL).

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
