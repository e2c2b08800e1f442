//! Fixed monthly contribution needed to reach a savings target
//!
//! Each month the running balance earns interest at the monthly rate `r`,
//! then the contribution `P` is added. Solving the resulting annuity for `P`:
//!
//! ```text
//! P = (target - current * (1 + r)^n) * r / ((1 + r)^n - 1)
//! ```
//!
//! With `r == 0` this reduces to `(target - current) / n`.

use serde::Serialize;

use crate::error::{FinanceError, FinanceResult};

/// Inputs to a savings projection; amounts are in currency units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsInput {
    pub target: f64,
    pub current: f64,
    pub months: u32,
    /// Monthly interest rate as a fraction (0.005 for 0.5%)
    pub monthly_rate: f64,
}

impl SavingsInput {
    /// Build an input from an annual percentage rate such as `6.0`
    pub fn with_annual_rate(target: f64, current: f64, months: u32, annual_percent: f64) -> Self {
        Self {
            target,
            current,
            months,
            monthly_rate: annual_percent / 100.0 / 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub month: u32,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsPlan {
    pub monthly_payment: f64,
    pub total_contributions: f64,
    pub interest_earned: f64,
    /// Balance at the end of months `0..=n`; month 0 is the starting balance
    pub timeline: Vec<TimelinePoint>,
}

impl SavingsPlan {
    pub fn final_balance(&self) -> f64 {
        self.timeline.last().map_or(0.0, |p| p.balance)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SavingsOutcome {
    /// The current balance already covers the target
    AlreadyMet,
    Plan(SavingsPlan),
    NotAchievable { reason: String },
}

/// Project the monthly contribution for `input`
///
/// Fails only on invalid input; numerical trouble becomes
/// [`SavingsOutcome::NotAchievable`].
pub fn calculate(input: &SavingsInput) -> FinanceResult<SavingsOutcome> {
    if input.months == 0 {
        return Err(FinanceError::Validation(
            "Number of months must be greater than zero".into(),
        ));
    }
    for (label, value) in [
        ("Target", input.target),
        ("Current savings", input.current),
        ("Interest rate", input.monthly_rate),
    ] {
        if !value.is_finite() {
            return Err(FinanceError::Validation(format!("{} must be a number", label)));
        }
    }
    if input.target < 0.0 || input.current < 0.0 || input.monthly_rate < 0.0 {
        return Err(FinanceError::Validation(
            "Amounts and interest rate cannot be negative".into(),
        ));
    }

    if input.target <= input.current {
        return Ok(SavingsOutcome::AlreadyMet);
    }

    let n = f64::from(input.months);
    let r = input.monthly_rate;
    let payment = if r == 0.0 {
        (input.target - input.current) / n
    } else {
        let growth = (1.0 + r).powf(n);
        (input.target - input.current * growth) * r / (growth - 1.0)
    };

    if !payment.is_finite() {
        return Ok(not_achievable());
    }
    let payment = payment.max(0.0);

    let timeline = timeline(input, payment);
    if timeline.iter().any(|p| !p.balance.is_finite()) {
        return Ok(not_achievable());
    }

    let total_contributions = payment * n;
    let final_balance = timeline.last().map_or(input.current, |p| p.balance);

    Ok(SavingsOutcome::Plan(SavingsPlan {
        monthly_payment: payment,
        total_contributions,
        interest_earned: final_balance - input.current - total_contributions,
        timeline,
    }))
}

fn not_achievable() -> SavingsOutcome {
    SavingsOutcome::NotAchievable {
        reason: "Goal not achievable with these parameters".into(),
    }
}

fn timeline(input: &SavingsInput, payment: f64) -> Vec<TimelinePoint> {
    let mut balance = input.current;
    let mut points = Vec::with_capacity(input.months as usize + 1);
    points.push(TimelinePoint { month: 0, balance });

    for month in 1..=input.months {
        balance = balance * (1.0 + input.monthly_rate) + payment;
        points.push(TimelinePoint { month, balance });
    }
    points
}
