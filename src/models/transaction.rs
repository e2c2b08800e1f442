//! Transaction model
//!
//! Transactions are immutable records of money coming in or going out.
//! Amounts are always positive; the direction lives in [`TransactionKind`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::ids::{TemplateId, TransactionId};
use super::money::Money;

/// Direction of a transaction; also the type of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("Income"),
            Self::Expense => f.pad("Expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "exp" | "out" => Ok(Self::Expense),
            other => Err(TransactionValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    pub date: NaiveDate,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Free-form category name; usually one of the known categories
    pub category: String,

    /// Always positive
    pub amount: Money,

    #[serde(default)]
    pub description: String,

    /// Tags are stored as a list inside the transaction record
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Set when the transaction was generated from a recurring template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<TemplateId>,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            kind,
            category: category.into(),
            amount,
            description: String::new(),
            tags: BTreeSet::new(),
            recurring_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add tags, trimming whitespace and dropping empty ones
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.extend(
            tags.into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty()),
        );
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount.exceeds_limit() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.category,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyCategory,
    UnknownKind(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} exceeds the limit of {}", amount, Money::MAX_AMOUNT)
            }
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
            Self::UnknownKind(kind) => {
                write!(f, "Unknown transaction type '{}': use Income or Expense", kind)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(
            date(2024, 1, 5),
            TransactionKind::Expense,
            "Food",
            Money::from_units(300),
        )
        .with_description("Groceries")
        .with_tags(["weekly", " ", "market "]);

        assert!(txn.is_expense());
        assert_eq!(txn.description, "Groceries");
        assert_eq!(txn.tags.len(), 2);
        assert!(txn.tags.contains("market"));
        assert!(txn.recurring_id.is_none());
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_positive_amount() {
        let txn = Transaction::new(
            date(2024, 1, 5),
            TransactionKind::Income,
            "Salary",
            Money::zero(),
        );
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_validation_rejects_oversized_amount() {
        let huge = Money::parse("90000000000000000").unwrap();
        let txn = Transaction::new(date(2024, 1, 5), TransactionKind::Income, "Salary", huge);
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::AmountTooLarge(huge))
        );

        let txn = Transaction::new(
            date(2024, 1, 5),
            TransactionKind::Income,
            "Salary",
            Money::MAX_AMOUNT,
        );
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_category() {
        let txn = Transaction::new(
            date(2024, 1, 5),
            TransactionKind::Income,
            "  ",
            Money::from_units(10),
        );
        assert_eq!(txn.validate(), Err(TransactionValidationError::EmptyCategory));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert_eq!("expense".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let txn = Transaction::new(
            date(2024, 1, 1),
            TransactionKind::Income,
            "Salary",
            Money::from_units(5000),
        )
        .with_tags(["job"]);

        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "Income");
        assert_eq!(value["amount"], 500000);
        assert_eq!(value["tags"][0], "job");
        assert!(value.get("recurring_id").is_none());
    }
}
