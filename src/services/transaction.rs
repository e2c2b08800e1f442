//! Transaction service
//!
//! Records new transactions and answers filtered listings. Transactions are
//! never edited or removed once recorded.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Transaction, TransactionKind};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    /// Case-insensitive category name
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Inclusive on both ends
    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject a range whose start falls after its end
    pub fn validate(&self) -> FinanceResult<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(FinanceError::Validation(format!(
                    "Start date {} is after end date {}",
                    start, end
                )));
            }
        }
        Ok(())
    }

    fn matches(&self, txn: &Transaction) -> bool {
        self.kind.map_or(true, |k| txn.kind == k)
            && self
                .category
                .as_deref()
                .map_or(true, |c| txn.category.eq_ignore_ascii_case(c.trim()))
            && self.start_date.map_or(true, |d| txn.date >= d)
            && self.end_date.map_or(true, |d| txn.date <= d)
    }
}

/// Input for recording a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub description: String,
    pub tags: BTreeSet<String>,
}

impl CreateTransactionInput {
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            amount,
            description: String::new(),
            tags: BTreeSet::new(),
        }
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and record a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> FinanceResult<Transaction> {
        let txn = Transaction::new(input.date, input.kind, input.category.trim(), input.amount)
            .with_description(input.description.trim())
            .with_tags(input.tags);

        self.record(txn)
    }

    /// Validate and persist an already-built transaction
    pub fn record(&self, txn: Transaction) -> FinanceResult<Transaction> {
        txn.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        if self.storage.categories.get_by_name(&txn.category)?.is_none() {
            tracing::debug!(category = %txn.category, "transaction uses an unlisted category");
        }

        self.storage.transactions.insert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(format!("{} {}", txn.date, txn.category)),
            &txn,
        )?;

        Ok(txn)
    }

    /// Matching transactions, newest first
    pub fn list(&self, filter: &TransactionFilter) -> FinanceResult<Vec<Transaction>> {
        filter.validate()?;

        let iter = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| filter.matches(t));

        Ok(match filter.limit {
            Some(limit) => iter.take(limit).collect(),
            None => iter.collect(),
        })
    }

    /// Every transaction, newest first
    pub fn all(&self) -> FinanceResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    pub fn count(&self) -> FinanceResult<usize> {
        self.storage.transactions.count()
    }
}
