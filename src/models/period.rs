//! Calendar months and report windows
//!
//! [`Month`] keys the monthly trend and the current-month budget comparison.
//! [`ReportPeriod`] selects the window for spending reports.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month (year + month), displayed as "YYYY-MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month; `month` must be 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Exact year and month match; no rolling window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Month is validated on construction so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:04}-{:02}", self.year, self.month))
    }
}

impl FromStr for Month {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError(s.to_string()))?;
        let year: i32 = year.parse().map_err(|_| PeriodParseError(s.to_string()))?;
        let month: u32 = month.parse().map_err(|_| PeriodParseError(s.to_string()))?;
        Month::new(year, month).ok_or_else(|| PeriodParseError(s.to_string()))
    }
}

/// Time window used by spending reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportPeriod {
    /// The last 30 days
    #[default]
    LastMonth,
    /// The last 90 days
    LastThreeMonths,
    /// The last 180 days
    LastSixMonths,
    /// January 1st of the current year until today
    YearToDate,
    /// From the earliest transaction until today
    AllTime,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 5] = [
        Self::LastMonth,
        Self::LastThreeMonths,
        Self::LastSixMonths,
        Self::YearToDate,
        Self::AllTime,
    ];

    /// Inclusive start date of the window ending at `today`
    ///
    /// `earliest` is the date of the oldest transaction, used by `AllTime`.
    pub fn start_date(&self, today: NaiveDate, earliest: Option<NaiveDate>) -> NaiveDate {
        match self {
            Self::LastMonth => today - Duration::days(30),
            Self::LastThreeMonths => today - Duration::days(90),
            Self::LastSixMonths => today - Duration::days(180),
            Self::YearToDate => {
                NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today)
            }
            Self::AllTime => earliest.map_or(today, |d| d.min(today)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LastMonth => "Last 30 Days",
            Self::LastThreeMonths => "Last 3 Months",
            Self::LastSixMonths => "Last 6 Months",
            Self::YearToDate => "Year to Date",
            Self::AllTime => "All Time",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for ReportPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "month" | "last-month" | "30d" => Ok(Self::LastMonth),
            "3m" | "last-3-months" | "quarter" => Ok(Self::LastThreeMonths),
            "6m" | "last-6-months" => Ok(Self::LastSixMonths),
            "ytd" | "year-to-date" => Ok(Self::YearToDate),
            "all" | "all-time" => Ok(Self::AllTime),
            _ => Err(PeriodParseError(s.to_string())),
        }
    }
}

/// Error returned when a month or report period cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(pub String);

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid period: '{}'", self.0)
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_display_and_parse() {
        let month = Month::of(date(2024, 3, 17));
        assert_eq!(month.to_string(), "2024-03");
        assert_eq!("2024-03".parse::<Month>().unwrap(), month);
        assert!("2024-13".parse::<Month>().is_err());
        assert!("March".parse::<Month>().is_err());
    }

    #[test]
    fn test_month_contains_is_exact() {
        let jan = Month::new(2024, 1).unwrap();
        assert!(jan.contains(date(2024, 1, 31)));
        assert!(!jan.contains(date(2023, 1, 15)));
        assert!(!jan.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_month_ordering_and_next() {
        let dec = Month::new(2023, 12).unwrap();
        let jan = dec.next();
        assert_eq!(jan, Month::new(2024, 1).unwrap());
        assert!(dec < jan);
        assert_eq!(jan.first_day(), date(2024, 1, 1));
    }

    #[test]
    fn test_report_period_start_dates() {
        let today = date(2024, 6, 30);
        assert_eq!(ReportPeriod::LastMonth.start_date(today, None), date(2024, 5, 31));
        assert_eq!(ReportPeriod::LastThreeMonths.start_date(today, None), date(2024, 4, 1));
        assert_eq!(ReportPeriod::YearToDate.start_date(today, None), date(2024, 1, 1));
        assert_eq!(
            ReportPeriod::AllTime.start_date(today, Some(date(2021, 2, 3))),
            date(2021, 2, 3)
        );
        assert_eq!(ReportPeriod::AllTime.start_date(today, None), today);
    }

    #[test]
    fn test_report_period_parse() {
        assert_eq!("ytd".parse::<ReportPeriod>().unwrap(), ReportPeriod::YearToDate);
        assert_eq!("all".parse::<ReportPeriod>().unwrap(), ReportPeriod::AllTime);
        assert!("fortnight".parse::<ReportPeriod>().is_err());
    }
}
