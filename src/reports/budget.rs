//! Budget-versus-actual comparison
//!
//! Each budget goal is compared with the expenses recorded in its category
//! during the calendar month being reported.

use crate::models::{BudgetGoal, Money, Month, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetComparisonRow {
    pub category: String,
    pub goal: Money,
    pub actual: Money,
    /// Never negative; overspending shows as zero remaining
    pub remaining: Money,
    /// `actual / goal * 100`, or 0 for a zero goal
    pub percentage: f64,
}

impl BudgetComparisonRow {
    pub fn new(category: impl Into<String>, goal: Money, actual: Money) -> Self {
        let remaining = goal - actual;
        Self {
            category: category.into(),
            goal,
            actual,
            remaining: if remaining.is_negative() {
                Money::zero()
            } else {
                remaining
            },
            percentage: actual.percent_of(goal),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.actual > self.goal
    }

    /// How closely spending matched the goal, from 0 to 100
    ///
    /// `(1 - |actual - goal| / goal) * 100`, clamped. Underspending lowers
    /// adherence the same way overspending does.
    pub fn adherence(&self) -> f64 {
        if self.goal.is_zero() {
            return 0.0;
        }
        let deviation = (self.actual - self.goal).abs().as_f64() / self.goal.as_f64();
        ((1.0 - deviation) * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone)]
pub struct BudgetComparison {
    pub month: Month,
    pub rows: Vec<BudgetComparisonRow>,
}

impl BudgetComparison {
    /// Compare `goals` against expenses dated in `month`
    pub fn for_month(goals: &[BudgetGoal], transactions: &[Transaction], month: Month) -> Self {
        let rows = goals
            .iter()
            .map(|goal| {
                let key = goal.key();
                let actual: Money = transactions
                    .iter()
                    .filter(|t| {
                        t.is_expense()
                            && month.contains(t.date)
                            && t.category.trim().to_lowercase() == key
                    })
                    .map(|t| t.amount)
                    .sum();
                BudgetComparisonRow::new(goal.category.clone(), goal.amount, actual)
            })
            .collect();

        Self { month, rows }
    }

    /// Average adherence across goals; 100 when there are none
    pub fn average_adherence(&self) -> f64 {
        if self.rows.is_empty() {
            return 100.0;
        }
        self.rows.iter().map(BudgetComparisonRow::adherence).sum::<f64>() / self.rows.len() as f64
    }

    pub fn total_goal(&self) -> Money {
        self.rows.iter().map(|r| r.goal).sum()
    }

    pub fn total_actual(&self) -> Money {
        self.rows.iter().map(|r| r.actual).sum()
    }

    pub fn format_terminal(&self) -> String {
        let mut output = format!("Budget vs Actual: {}\n", self.month);
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>12} {:>12} {:>12} {:>9}\n",
            "Category", "Budget", "Spent", "Remaining", "Used"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.rows {
            let marker = if row.is_over_budget() { " !" } else { "" };
            output.push_str(&format!(
                "{:<22} {:>12} {:>12} {:>12} {:>8.1}%{}\n",
                row.category, row.goal, row.actual, row.remaining, row.percentage, marker
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>12} {:>12}\n",
            "TOTAL",
            self.total_goal(),
            self.total_actual()
        ));
        output
    }
}
