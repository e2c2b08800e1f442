//! Money type for representing currency amounts
//!
//! Amounts are stored as integer cents so that totals, net worth and
//! remaining-budget figures add up exactly. Ratios and percentages are
//! derived as `f64` only at the edges.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use fintrack::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Convert a floating point amount, rounding to the nearest cent
    ///
    /// Returns `None` for NaN, infinities and values outside the i64 range.
    pub fn from_f64(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Largest amount a single record may hold: one trillion units
    ///
    /// Sums of up to ninety thousand such amounts still fit in `i64` cents.
    pub const MAX_AMOUNT: Money = Money::from_units(1_000_000_000_000);

    pub const fn zero() -> Self {
        Self(0)
    }

    /// True when the magnitude is above [`Money::MAX_AMOUNT`]
    pub const fn exceeds_limit(&self) -> bool {
        self.0.abs() > Self::MAX_AMOUNT.0
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// The amount as a floating point number of currency units
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// This amount as a percentage of `base`; 0 when `base` is zero
    pub fn percent_of(&self, base: Money) -> f64 {
        if base.is_zero() {
            0.0
        } else {
            self.0 as f64 / base.0 as f64 * 100.0
        }
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "10.50", "-10.50", "$10.50", "1,234.56" and "10" (whole units).
    /// Digits past the second decimal place are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let (negative, rest) = match original.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, original),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (cleaned.as_str(), ""),
        };

        if fraction.contains('.') || (whole.is_empty() && fraction.is_empty()) {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        if whole.starts_with('+') || whole.starts_with('-') {
            return Err(invalid());
        }

        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction[..2].parse().map_err(|_| invalid())?,
        };

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a custom currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(self.units().abs()),
            self.cents_part()
        )
    }
}

/// Insert thousands separators into a non-negative integer
fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
