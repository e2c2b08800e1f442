//! Storage layer for fintrack
//!
//! One JSON document per table with atomic writes. [`Storage`] is the single
//! handle every service borrows: open it at startup, close it at shutdown.

pub mod budget_goals;
pub mod categories;
pub mod file_io;
pub mod financial_goals;
pub mod recurring;
pub mod transactions;

pub use budget_goals::BudgetGoalRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use financial_goals::FinancialGoalRepository;
pub use recurring::RecurringRepository;
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FinTrackPaths;
use crate::error::{FinanceError, FinanceResult};

pub(crate) fn lock_poisoned<E: std::fmt::Display>(e: E) -> FinanceError {
    FinanceError::Storage(format!("Storage lock poisoned: {}", e))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinTrackPaths,
    audit: AuditLogger,
    pub transactions: TransactionRepository,
    pub budget_goals: BudgetGoalRepository,
    pub financial_goals: FinancialGoalRepository,
    pub recurring: RecurringRepository,
    pub categories: CategoryRepository,
}

impl Storage {
    /// Create the data directories and load every table
    pub fn open(paths: FinTrackPaths) -> FinanceResult<Self> {
        paths.ensure_directories()?;

        let storage = Self {
            audit: AuditLogger::new(paths.audit_log()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            budget_goals: BudgetGoalRepository::new(paths.budget_goals_file()),
            financial_goals: FinancialGoalRepository::new(paths.financial_goals_file()),
            recurring: RecurringRepository::new(paths.recurring_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            paths,
        };
        storage.load_all()?;

        tracing::debug!(base = %storage.paths.base_dir().display(), "storage opened");
        Ok(storage)
    }

    /// Flush every table and release the handle
    pub fn close(self) -> FinanceResult<()> {
        self.save_all()?;
        tracing::debug!("storage closed");
        Ok(())
    }

    pub fn paths(&self) -> &FinTrackPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> FinanceResult<()> {
        self.transactions.load()?;
        self.budget_goals.load()?;
        self.financial_goals.load()?;
        self.recurring.load()?;
        self.categories.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> FinanceResult<()> {
        self.transactions.save()?;
        self.budget_goals.save()?;
        self.financial_goals.save()?;
        self.recurring.save()?;
        self.categories.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FinanceResult<()> {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity);
        tracing::info!(entity = %entity_type, id = %entry.entity_id, "created");
        self.audit.log(&entry)
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> FinanceResult<()> {
        let entry = AuditEntry::update(entity_type, entity_id, entity_name, before, after);
        tracing::info!(entity = %entity_type, id = %entry.entity_id, "updated");
        self.audit.log(&entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Money, Transaction, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert_eq!(storage.categories.get_all().unwrap().len(), 8);
    }

    #[test]
    fn test_close_flushes_tables() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::open(paths.clone()).unwrap();
        storage
            .transactions
            .insert(Transaction::new(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                TransactionKind::Income,
                "Salary",
                Money::from_units(5000),
            ))
            .unwrap();
        storage.close().unwrap();

        let reopened = Storage::open(paths).unwrap();
        assert_eq!(reopened.transactions.count().unwrap(), 1);
    }

    #[test]
    fn test_log_create_appends_audit_entry() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        storage
            .log_create(EntityType::Category, "pets", None, &"Pets")
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
    }
}
