//! Recurring transaction templates
//!
//! A template describes a transaction that repeats on a fixed schedule.
//! Templates never create transactions by themselves; the recurring service
//! materializes due occurrences when asked to.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TemplateId;
use super::money::Money;
use super::transaction::TransactionKind;

/// Upper bound on occurrences produced by one sweep of one template
const MAX_OCCURRENCES_PER_SWEEP: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Date of the `n`th occurrence counted from `start` (0 is `start` itself)
    ///
    /// Monthly and yearly schedules keep the start day, clamped to the end of
    /// shorter months.
    pub fn nth_after(&self, start: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Self::Daily => start.checked_add_signed(Duration::days(i64::from(n))),
            Self::Weekly => start.checked_add_signed(Duration::weeks(i64::from(n))),
            Self::Monthly => start.checked_add_months(Months::new(n)),
            Self::Yearly => n
                .checked_mul(12)
                .and_then(|months| start.checked_add_months(Months::new(months))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        };
        f.pad(s)
    }
}

impl FromStr for Frequency {
    type Err = RecurringValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" | "annual" | "annually" => Ok(Self::Yearly),
            other => Err(RecurringValidationError::UnknownFrequency(other.to_string())),
        }
    }
}

/// A template for a repeating transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Date of the latest occurrence already turned into a transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generated: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl RecurringTemplate {
    pub fn new(
        name: impl Into<String>,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Money,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: TemplateId::new(),
            name: name.into(),
            kind,
            category: category.into(),
            amount,
            frequency,
            start_date,
            end_date: None,
            active: true,
            last_generated: None,
            created_at: Utc::now(),
        }
    }

    /// Occurrence dates up to and including `today` not yet materialized
    pub fn due_dates(&self, today: NaiveDate) -> Vec<NaiveDate> {
        if !self.active {
            return Vec::new();
        }

        let limit = match self.end_date {
            Some(end) => end.min(today),
            None => today,
        };

        let mut dates = Vec::new();
        let mut n = 0u32;
        while let Some(date) = self.frequency.nth_after(self.start_date, n) {
            if date > limit || dates.len() >= MAX_OCCURRENCES_PER_SWEEP {
                break;
            }
            if self.last_generated.map_or(true, |last| date > last) {
                dates.push(date);
            }
            n += 1;
        }
        dates
    }

    pub fn validate(&self) -> Result<(), RecurringValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecurringValidationError::EmptyName);
        }
        if self.category.trim().is_empty() {
            return Err(RecurringValidationError::EmptyCategory);
        }
        if !self.amount.is_positive() {
            return Err(RecurringValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount.exceeds_limit() {
            return Err(RecurringValidationError::AmountTooLarge(self.amount));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(RecurringValidationError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringValidationError {
    EmptyName,
    EmptyCategory,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    UnknownFrequency(String),
}

impl fmt::Display for RecurringValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Template name cannot be empty"),
            Self::EmptyCategory => write!(f, "Template category cannot be empty"),
            Self::NonPositiveAmount(m) => {
                write!(f, "Amount must be greater than zero (got {})", m)
            }
            Self::AmountTooLarge(m) => {
                write!(f, "Amount {} exceeds the limit of {}", m, Money::MAX_AMOUNT)
            }
            Self::EndBeforeStart { start, end } => {
                write!(f, "End date {} is before start date {}", end, start)
            }
            Self::UnknownFrequency(s) => write!(
                f,
                "Unknown frequency '{}': use daily, weekly, monthly or yearly",
                s
            ),
        }
    }
}

impl std::error::Error for RecurringValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rent(frequency: Frequency, start: NaiveDate) -> RecurringTemplate {
        RecurringTemplate::new(
            "Rent",
            TransactionKind::Expense,
            "Housing",
            Money::from_units(1200),
            frequency,
            start,
        )
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        let template = rent(Frequency::Monthly, date(2024, 1, 31));
        let dates = template.due_dates(date(2024, 4, 30));
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30)
            ]
        );
    }

    #[test]
    fn test_weekly_respects_end_date() {
        let mut template = rent(Frequency::Weekly, date(2024, 1, 1));
        template.end_date = Some(date(2024, 1, 20));
        let dates = template.due_dates(date(2024, 3, 1));
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15)]);
    }

    #[test]
    fn test_skips_already_generated() {
        let mut template = rent(Frequency::Daily, date(2024, 1, 1));
        template.last_generated = Some(date(2024, 1, 3));
        let dates = template.due_dates(date(2024, 1, 5));
        assert_eq!(dates, vec![date(2024, 1, 4), date(2024, 1, 5)]);
    }

    #[test]
    fn test_inactive_or_future_templates_are_not_due() {
        let mut template = rent(Frequency::Yearly, date(2024, 6, 1));
        assert!(template.due_dates(date(2024, 5, 31)).is_empty());

        template.active = false;
        assert!(template.due_dates(date(2030, 1, 1)).is_empty());
    }

    #[test]
    fn test_validation() {
        let mut template = rent(Frequency::Monthly, date(2024, 2, 1));
        template.end_date = Some(date(2024, 1, 1));
        assert!(matches!(
            template.validate(),
            Err(RecurringValidationError::EndBeforeStart { .. })
        ));

        assert!("fortnightly".parse::<Frequency>().is_err());
        assert_eq!("Annual".parse::<Frequency>().unwrap(), Frequency::Yearly);
    }
}
