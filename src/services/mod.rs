//! Service layer for fintrack
//!
//! Services validate input, write through the storage layer and record every
//! change in the audit log. Each one borrows the shared [`Storage`] handle.
//!
//! [`Storage`]: crate::storage::Storage

pub mod budget;
pub mod category;
pub mod goal;
pub mod import;
pub mod recurring;
pub mod settings;
pub mod transaction;

pub use budget::BudgetService;
pub use category::{CategoryService, CreateCategoryInput};
pub use goal::{CreateGoalInput, GoalService};
pub use import::{ImportReport, ImportService};
pub use recurring::{CreateTemplateInput, RecurringService, SweepResult};
pub use settings::{NotificationUpdate, SettingsService};
pub use transaction::{CreateTransactionInput, TransactionFilter, TransactionService};
