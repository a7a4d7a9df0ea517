//! Transaction service
//!
//! Provides the create/read/update/delete operations over an explicit
//! [`Store`]. Every successful mutation is saved before returning. When the
//! save fails the in-memory change is kept and the error is returned, so the
//! caller can retry later.

use chrono::{Local, NaiveDate, Utc};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Money, Store, Transaction, TransactionId, TransactionPatch, TransactionType, DEFAULT_CATEGORY,
};
use crate::storage::Storage;

/// Confirmation token required by [`TransactionService::reset`]
pub const RESET_CONFIRMATION: &str = "YES";

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionType,
    /// Positive magnitude; the stored sign comes from `kind`
    pub amount: Money,
    /// Defaults to "Misc"
    pub category: Option<String>,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CreateTransactionInput {
    pub fn new(kind: TransactionType, amount: Money) -> Self {
        Self {
            kind,
            amount,
            category: None,
            date: None,
            notes: None,
        }
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction and return its id
    pub fn create(
        &self,
        store: &mut Store,
        input: CreateTransactionInput,
    ) -> LedgerResult<TransactionId> {
        if !input.amount.is_positive() {
            return Err(LedgerError::Validation(
                "Amount must be greater than zero".into(),
            ));
        }

        let category = input
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let date = input.date.unwrap_or_else(|| Local::now().date_naive());

        let id = store.allocate_id();
        let mut txn = Transaction::new(id, input.kind, input.amount, category, date);
        txn.notes = input
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        store.transactions.push(txn.clone());
        self.storage.save_store(store)?;

        self.storage.audit(AuditEntry::create(
            EntityType::Transaction,
            id.to_string(),
            Some(describe(&txn)),
            &txn,
        ));

        Ok(id)
    }

    /// Get a transaction by ID
    pub fn get<'s>(&self, store: &'s Store, id: TransactionId) -> Option<&'s Transaction> {
        store.get(id)
    }

    /// List transactions, most recent date first, newest id first on ties
    pub fn list<'s>(&self, store: &'s Store, limit: Option<usize>) -> Vec<&'s Transaction> {
        let mut transactions: Vec<_> = store.transactions.iter().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        if let Some(limit) = limit {
            transactions.truncate(limit);
        }

        transactions
    }

    /// Apply a partial update to a transaction
    ///
    /// `updated_at` is stamped even when the patch changes nothing.
    pub fn update(
        &self,
        store: &mut Store,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> LedgerResult<Transaction> {
        let txn = store
            .get_mut(id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        let before = txn.clone();
        txn.apply(patch, Utc::now());
        let after = txn.clone();

        self.storage.save_store(store)?;

        let mut changes = Vec::new();
        if before.kind != after.kind {
            changes.push(format!("type: {} -> {}", before.kind, after.kind));
        }
        if before.amount != after.amount {
            changes.push(format!("amount: {} -> {}", before.amount, after.amount));
        }
        if before.category != after.category {
            changes.push(format!(
                "category: '{}' -> '{}'",
                before.category, after.category
            ));
        }
        if before.date != after.date {
            changes.push(format!("date: {} -> {}", before.date, after.date));
        }
        if before.notes != after.notes {
            changes.push("notes changed".to_string());
        }

        let diff = if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        };

        self.storage.audit(AuditEntry::update(
            EntityType::Transaction,
            id.to_string(),
            Some(describe(&after)),
            &before,
            &after,
            diff,
        ));

        Ok(after)
    }

    /// Delete a transaction, returning it if it existed
    ///
    /// Nothing is saved when no transaction matched.
    pub fn delete(&self, store: &mut Store, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        let Some(txn) = store.remove(id) else {
            return Ok(None);
        };

        self.storage.save_store(store)?;

        self.storage.audit(AuditEntry::delete(
            EntityType::Transaction,
            id.to_string(),
            Some(describe(&txn)),
            &txn,
        ));

        Ok(Some(txn))
    }

    /// Remove every transaction and restart ids at 1
    ///
    /// Only the exact token `"YES"` confirms; anything else is a no-op and
    /// returns `false`.
    pub fn reset(&self, store: &mut Store, confirmation: &str) -> LedgerResult<bool> {
        if confirmation != RESET_CONFIRMATION {
            return Ok(false);
        }

        let removed = store.len();
        store.clear();
        self.storage.save_store(store)?;
        self.storage.audit(AuditEntry::reset(removed));

        Ok(true)
    }
}

fn describe(txn: &Transaction) -> String {
    format!("{} {}", txn.date, txn.category)
}
