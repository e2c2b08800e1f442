//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod budget;
pub mod calc;
pub mod category;
pub mod data;
pub mod goal;
pub mod recurring;
pub mod report;
pub mod settings;
pub mod transaction;

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use calc::{handle_calc_command, CalcCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use data::{handle_export_command, handle_import_command};
pub use goal::{handle_goal_command, GoalCommands};
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use report::{
    handle_alerts_command, handle_dashboard_command, handle_report_command, ReportCommands,
};
pub use settings::{handle_settings_command, SettingsCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;

/// Parse a user-entered amount such as "12.50" or "$1,200"
pub fn parse_amount(s: &str) -> FinanceResult<Money> {
    Money::parse(s).map_err(|e| FinanceError::Validation(e.to_string()))
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| FinanceError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", s)))
}

pub fn parse_optional_date(s: Option<&str>) -> FinanceResult<Option<NaiveDate>> {
    s.map(parse_date).transpose()
}

/// Parse any value whose `FromStr` error can be shown to the user
pub fn parse_value<T>(s: &str) -> FinanceResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    s.parse().map_err(|e: T::Err| FinanceError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_amount("12.50").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("twelve").unwrap_err().is_validation());

        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").is_err());
        assert_eq!(parse_optional_date(None).unwrap(), None);

        let kind: TransactionKind = parse_value("income").unwrap();
        assert_eq!(kind, TransactionKind::Income);
        assert!(parse_value::<TransactionKind>("gift").is_err());
    }
}
