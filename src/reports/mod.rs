//! Reports module for fintrack
//!
//! Aggregations recomputed from stored data on every call: summary totals,
//! category breakdowns, monthly trends, budget comparison, the health score
//! and the spending report.

pub mod budget;
pub mod dashboard;
pub mod health;
pub mod spending;
pub mod summary;

pub use budget::{BudgetComparison, BudgetComparisonRow};
pub use dashboard::Dashboard;
pub use health::HealthScore;
pub use spending::SpendingReport;
pub use summary::{
    category_breakdown, category_totals, CategoryTotal, FinancialSummary, MonthlyPoint,
    MonthlyTrend,
};
