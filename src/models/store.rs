//! The ledger aggregate
//!
//! A `Store` is the unit of persistence: the id counter plus every
//! transaction. It is always loaded and saved as a whole.

use serde::{Deserialize, Serialize};

use super::ids::TransactionId;
use super::transaction::Transaction;

/// The full in-memory ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Next id to hand out; never reused, even after deletes
    pub next_id: TransactionId,

    /// All transactions, unordered
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: TransactionId::new(1),
            transactions: Vec::new(),
        }
    }
}

impl Store {
    /// A fresh, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next id and advance the counter
    pub fn allocate_id(&mut self) -> TransactionId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TransactionId) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|t| t.id == id)
    }

    /// Remove a transaction, returning it if it existed
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|t| t.id == id)?;
        Some(self.transactions.remove(index))
    }

    /// Drop every transaction and restart the id counter
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.next_id = TransactionId::new(1);
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use chrono::NaiveDate;

    fn push(store: &mut Store) -> TransactionId {
        let id = store.allocate_id();
        store.transactions.push(Transaction::new(
            id,
            TransactionType::Expense,
            Money::from_cents(100),
            "Misc",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        ));
        id
    }

    #[test]
    fn test_fresh_store() {
        let store = Store::new();
        assert_eq!(store.next_id, TransactionId::new(1));
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut store = Store::new();
        let first = push(&mut store);
        let second = push(&mut store);
        assert!(store.remove(second).is_some());

        let third = push(&mut store);
        assert_eq!(first, TransactionId::new(1));
        assert_eq!(third, TransactionId::new(3));
        assert_eq!(store.next_id, TransactionId::new(4));
        assert!(store.remove(second).is_none());
    }

    #[test]
    fn test_clear_resets_counter() {
        let mut store = Store::new();
        push(&mut store);
        push(&mut store);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.next_id, TransactionId::new(1));
    }

    #[test]
    fn test_file_shape() {
        let store: Store = serde_json::from_str(
            r#"{
                "next_id": 3,
                "transactions": [{
                    "id": 2,
                    "type": "income",
                    "amount": 1200.0,
                    "category": "Salary",
                    "date": "2024-03-01",
                    "notes": null,
                    "created_at": "2024-03-01T10:00:00Z",
                    "updated_at": null
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(store.next_id, TransactionId::new(3));
        let txn = store.get(TransactionId::new(2)).unwrap();
        assert_eq!(txn.amount.cents(), 120000);
        assert_eq!(txn.kind, TransactionType::Income);
    }
}
