//! Financial goal model
//!
//! Savings goals with a target amount and date. Progress is recorded by hand;
//! transactions never feed into `current_amount`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::GoalId;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        };
        f.pad(s)
    }
}

impl FromStr for GoalStatus {
    type Err = GoalValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" | "complete" | "done" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(GoalValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub id: GoalId,
    pub name: String,
    pub target_amount: Money,
    #[serde(default)]
    pub current_amount: Money,
    pub target_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: GoalStatus,
}

impl FinancialGoal {
    pub fn new(name: impl Into<String>, target_amount: Money, target_date: NaiveDate) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            current_amount: Money::zero(),
            target_date,
            created_at: Utc::now(),
            status: GoalStatus::Active,
        }
    }

    /// Completion percentage; may exceed 100 when the goal is overfunded
    pub fn progress_percent(&self) -> f64 {
        self.current_amount.percent_of(self.target_amount)
    }

    /// Whole days from `today` until the target date (negative once passed)
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.target_date - today).num_days()
    }

    /// Whole days since the goal was created
    pub fn days_elapsed(&self, today: NaiveDate) -> i64 {
        (today - self.created_at.date_naive()).num_days()
    }

    /// Planned duration in whole days, from creation to target date
    pub fn total_days(&self) -> i64 {
        (self.target_date - self.created_at.date_naive()).num_days()
    }

    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }

    /// Validate a goal being created on `today`
    pub fn validate_new(&self, today: NaiveDate) -> Result<(), GoalValidationError> {
        self.validate()?;
        if self.target_date < today {
            return Err(GoalValidationError::TargetDateInPast(self.target_date));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target_amount));
        }
        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent(self.current_amount));
        }
        for amount in [self.target_amount, self.current_amount] {
            if amount.exceeds_limit() {
                return Err(GoalValidationError::AmountTooLarge(amount));
            }
        }
        Ok(())
    }
}

impl fmt::Display for FinancialGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} / {} by {})",
            self.name, self.current_amount, self.target_amount, self.target_date
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget(Money),
    NegativeCurrent(Money),
    AmountTooLarge(Money),
    TargetDateInPast(NaiveDate),
    UnknownStatus(String),
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget(m) => {
                write!(f, "Target amount must be greater than zero (got {})", m)
            }
            Self::NegativeCurrent(m) => write!(f, "Current amount cannot be negative (got {})", m),
            Self::AmountTooLarge(m) => {
                write!(f, "Amount {} exceeds the limit of {}", m, Money::MAX_AMOUNT)
            }
            Self::TargetDateInPast(d) => write!(f, "Target date {} is in the past", d),
            Self::UnknownStatus(s) => write!(
                f,
                "Unknown goal status '{}': use active, completed or cancelled",
                s
            ),
        }
    }
}

impl std::error::Error for GoalValidationError {}
