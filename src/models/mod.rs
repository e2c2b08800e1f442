//! Core data models for fintrack
//!
//! Transactions, budget goals, financial goals, recurring templates and
//! categories, plus the money and calendar value types they share.

pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod recurring;
pub mod transaction;

pub use budget::{BudgetGoal, BudgetPeriod};
pub use category::Category;
pub use goal::{FinancialGoal, GoalStatus};
pub use ids::{GoalId, TemplateId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use period::{Month, ReportPeriod};
pub use recurring::{Frequency, RecurringTemplate};
pub use transaction::{Transaction, TransactionKind};
