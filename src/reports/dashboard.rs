//! Dashboard overview
//!
//! Combines the all-time summary, this month's spending and budgets, the
//! health score and the current alerts.

use chrono::NaiveDate;

use crate::alerts::{collect_alerts, Alert};
use crate::config::settings::NotificationSettings;
use crate::error::FinanceResult;
use crate::models::Month;
use crate::storage::Storage;

use super::{category_breakdown, BudgetComparison, CategoryTotal, FinancialSummary, HealthScore};

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub month: Month,
    pub summary: FinancialSummary,
    pub month_summary: FinancialSummary,
    pub breakdown: Vec<CategoryTotal>,
    pub budget: BudgetComparison,
    pub health: HealthScore,
    pub alerts: Vec<Alert>,
}

impl Dashboard {
    pub fn generate(
        storage: &Storage,
        notifications: &NotificationSettings,
        today: NaiveDate,
    ) -> FinanceResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let goals = storage.budget_goals.get_all()?;
        let financial_goals = storage.financial_goals.get_all()?;
        let month = Month::of(today);

        let summary = FinancialSummary::from_transactions(&transactions);
        let month_summary = FinancialSummary::from_transactions(
            transactions.iter().filter(|t| month.contains(t.date)),
        );
        let budget = BudgetComparison::for_month(&goals, &transactions, month);
        let health = HealthScore::compute(
            summary.total_income,
            summary.total_expenses,
            budget.average_adherence(),
        );
        let alerts = collect_alerts(&budget.rows, &financial_goals, notifications, today);

        Ok(Self {
            today,
            month,
            breakdown: category_breakdown(&transactions, month),
            summary,
            month_summary,
            budget,
            health,
            alerts,
        })
    }

    pub fn format_terminal(&self) -> String {
        let mut output = format!("Financial Dashboard ({})\n", self.today);
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&self.summary.format_terminal());
        output.push_str(&format!(
            "Health Score:    {:>10}/100 ({})\n\n",
            self.health.score,
            self.health.rating()
        ));

        output.push_str(&format!("This Month ({})\n", self.month));
        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&self.month_summary.format_terminal());

        if !self.breakdown.is_empty() {
            output.push('\n');
            for category in &self.breakdown {
                output.push_str(&format!(
                    "  {:<33} {:>12} {:>7.1}%\n",
                    category.category, category.amount, category.percentage
                ));
            }
        }

        if !self.budget.rows.is_empty() {
            output.push('\n');
            output.push_str(&self.budget.format_terminal());
        }

        output.push('\n');
        if self.alerts.is_empty() {
            output.push_str("No alerts.\n");
        } else {
            output.push_str(&format!("Alerts ({})\n", self.alerts.len()));
            for alert in &self.alerts {
                output.push_str(&format!("  {}\n", alert));
            }
        }

        output
    }
}
