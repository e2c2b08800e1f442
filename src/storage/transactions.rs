//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. Transactions
//! are append-only: there is no update or delete.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::FinanceError;
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_poisoned;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: TransactionData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_poisoned)?;

        data.clear();
        data.extend(file_data.transactions.into_iter().map(|t| (t.id, t)));

        tracing::debug!(count = data.len(), "loaded transactions");
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let transactions = self.get_all()?;
        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FinanceError> {
        let data = self.data.read().map_err(lock_poisoned)?;
        Ok(data.get(&id).cloned())
    }

    /// All transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, FinanceError> {
        let data = self.data.read().map_err(lock_poisoned)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(transactions)
    }

    /// Transactions dated within `start..=end`, newest first
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, FinanceError> {
        let mut all = self.get_all()?;
        all.retain(|t| t.date >= start && t.date <= end);
        Ok(all)
    }

    /// Add a new transaction; ids are never reused
    pub fn insert(&self, txn: Transaction) -> Result<(), FinanceError> {
        let mut data = self.data.write().map_err(lock_poisoned)?;

        if data.contains_key(&txn.id) {
            return Err(FinanceError::Duplicate {
                entity_type: "Transaction",
                identifier: txn.id.to_string(),
            });
        }

        data.insert(txn.id, txn);
        Ok(())
    }

    /// Date of the oldest transaction, if any
    pub fn earliest_date(&self) -> Result<Option<NaiveDate>, FinanceError> {
        let data = self.data.read().map_err(lock_poisoned)?;
        Ok(data.values().map(|t| t.date).min())
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        let data = self.data.read().map_err(lock_poisoned)?;
        Ok(data.len())
    }
}
