//! Financial health score
//!
//! A 0-100 score made of three independently scored factors:
//!
//! | factor                  | points                                          |
//! |-------------------------|-------------------------------------------------|
//! | expenses / income       | ≤0.5 → 30, ≤0.7 → 20, ≤0.9 → 10, else 0         |
//! | savings rate            | ≥0.2 → 30, ≥0.1 → 20, >0 → 10, else 0           |
//! | budget adherence (0-100)| ≥90 → 40, ≥80 → 30, ≥70 → 20, ≥60 → 10, else 0  |
//!
//! Without income the first two factors score nothing.

use crate::models::Money;

pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthScore {
    pub score: u8,
    /// Expenses divided by income; `None` without income
    pub expense_ratio: Option<f64>,
    /// (income - expenses) / income; `None` without income
    pub savings_rate: Option<f64>,
    pub budget_adherence: f64,
    pub ratio_points: u8,
    pub savings_points: u8,
    pub adherence_points: u8,
}

impl HealthScore {
    pub fn compute(income: Money, expenses: Money, budget_adherence: f64) -> Self {
        let (expense_ratio, savings_rate) = if income.is_positive() {
            let income = income.as_f64();
            let expenses = expenses.as_f64();
            (Some(expenses / income), Some((income - expenses) / income))
        } else {
            (None, None)
        };

        let ratio_points = expense_ratio.map_or(0, ratio_points);
        let savings_points = savings_rate.map_or(0, savings_points);
        let adherence_points = adherence_points(budget_adherence);

        Self {
            score: (ratio_points + savings_points + adherence_points).min(MAX_SCORE),
            expense_ratio,
            savings_rate,
            budget_adherence,
            ratio_points,
            savings_points,
            adherence_points,
        }
    }

    pub fn rating(&self) -> &'static str {
        match self.score {
            80..=100 => "Excellent",
            60..=79 => "Good",
            40..=59 => "Fair",
            _ => "Needs attention",
        }
    }

    pub fn format_terminal(&self) -> String {
        let pct = |v: Option<f64>| {
            v.map_or_else(|| "n/a".to_string(), |v| format!("{:.1}%", v * 100.0))
        };

        format!(
            "Financial Health Score: {}/{} ({})\n\
             {:<26} {:>8}  {:>2} pts\n\
             {:<26} {:>8}  {:>2} pts\n\
             {:<26} {:>7.1}%  {:>2} pts\n",
            self.score,
            MAX_SCORE,
            self.rating(),
            "Expense-to-income ratio",
            pct(self.expense_ratio),
            self.ratio_points,
            "Savings rate",
            pct(self.savings_rate),
            self.savings_points,
            "Budget adherence",
            self.budget_adherence,
            self.adherence_points,
        )
    }
}

fn ratio_points(ratio: f64) -> u8 {
    if ratio <= 0.5 {
        30
    } else if ratio <= 0.7 {
        20
    } else if ratio <= 0.9 {
        10
    } else {
        0
    }
}

fn savings_points(rate: f64) -> u8 {
    if rate >= 0.2 {
        30
    } else if rate >= 0.1 {
        20
    } else if rate > 0.0 {
        10
    } else {
        0
    }
}

fn adherence_points(adherence: f64) -> u8 {
    if adherence >= 90.0 {
        40
    } else if adherence >= 80.0 {
        30
    } else if adherence >= 70.0 {
        20
    } else if adherence >= 60.0 {
        10
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_score() {
        let score = HealthScore::compute(Money::from_units(5000), Money::from_units(1000), 100.0);
        assert_eq!(score.score, 100);
        assert_eq!(score.rating(), "Excellent");
    }

    #[test]
    fn test_factor_bands() {
        // ratio 0.85 -> 10, savings 0.15 -> 20, adherence 75 -> 20
        let score = HealthScore::compute(Money::from_units(1000), Money::from_units(850), 75.0);
        assert_eq!(
            (score.ratio_points, score.savings_points, score.adherence_points),
            (10, 20, 20)
        );
        assert_eq!(score.score, 50);
    }

    #[test]
    fn test_no_income_scores_only_adherence() {
        let score = HealthScore::compute(Money::zero(), Money::from_units(300), 100.0);
        assert_eq!(score.expense_ratio, None);
        assert_eq!(score.savings_rate, None);
        assert_eq!(score.score, 40);
    }

    #[test]
    fn test_overspending_scores_zero_on_income_factors() {
        let score = HealthScore::compute(Money::from_units(1000), Money::from_units(1500), 0.0);
        assert_eq!(score.score, 0);
    }

    #[test]
    fn test_score_always_in_range() {
        for income in [0, 1, 100, 5000, 1_000_000] {
            for expenses in [0, 1, 50, 4999, 5000, 10_000_000] {
                for adherence in [0.0, 59.9, 60.0, 85.0, 100.0] {
                    let score = HealthScore::compute(
                        Money::from_units(income),
                        Money::from_units(expenses),
                        adherence,
                    );
                    assert!(score.score <= MAX_SCORE);
                }
            }
        }
    }
}
