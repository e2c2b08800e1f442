//! Budget goal model
//!
//! A budget goal is a spending target for one expense category. Goals are
//! keyed by category name: setting a goal again replaces the old one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// How often a budget goal resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// Compared against expenses of the current calendar month
    #[default]
    Monthly,
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => f.pad("monthly"),
        }
    }
}

/// A spending target for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetGoal {
    /// Category name, unique across budget goals
    pub category: String,

    /// Target amount per period
    pub amount: Money,

    #[serde(default)]
    pub period: BudgetPeriod,

    pub updated_at: DateTime<Utc>,
}

impl BudgetGoal {
    pub fn monthly(category: impl Into<String>, amount: Money) -> Self {
        Self {
            category: category.into(),
            amount,
            period: BudgetPeriod::Monthly,
            updated_at: Utc::now(),
        }
    }

    /// Case-insensitive key used for the one-goal-per-category rule
    pub fn key(&self) -> String {
        self.category.trim().to_lowercase()
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount.exceeds_limit() {
            return Err(BudgetValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyCategory,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Budget goal category cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Budget amount {} exceeds the limit of {}", amount, Money::MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_goal() {
        let goal = BudgetGoal::monthly("Food", Money::from_units(400));
        assert_eq!(goal.period, BudgetPeriod::Monthly);
        assert_eq!(goal.key(), "food");
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let goal = BudgetGoal::monthly("", Money::from_units(400));
        assert_eq!(goal.validate(), Err(BudgetValidationError::EmptyCategory));

        let goal = BudgetGoal::monthly("Food", Money::from_cents(-1));
        assert!(matches!(
            goal.validate(),
            Err(BudgetValidationError::NonPositiveAmount(_))
        ));

        let too_much = Money::MAX_AMOUNT + Money::from_cents(1);
        let goal = BudgetGoal::monthly("Food", too_much);
        assert_eq!(
            goal.validate(),
            Err(BudgetValidationError::AmountTooLarge(too_much))
        );
    }

    #[test]
    fn test_period_serializes_lowercase() {
        let goal = BudgetGoal::monthly("Food", Money::from_units(400));
        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value["period"], "monthly");
    }
}
