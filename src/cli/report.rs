//! Report CLI commands
//!
//! Dashboard, alerts and the individual reports.

use std::fs::File;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use super::parse_value;
use crate::alerts::collect_alerts;
use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Month, ReportPeriod};
use crate::reports::{
    BudgetComparison, Dashboard, FinancialSummary, HealthScore, MonthlyTrend, SpendingReport,
};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Spending analysis for a period
    Spending {
        /// month, 3m, 6m, ytd or all
        #[arg(short, long, default_value = "month")]
        period: String,
        /// Also write the daily series to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Income and expenses per month
    Trend,

    /// Financial health score
    Health,
}

pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
) -> FinanceResult<()> {
    let dashboard = Dashboard::generate(storage, &settings.notifications, today)?;
    print!("{}", dashboard.format_terminal());
    Ok(())
}

pub fn handle_alerts_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
) -> FinanceResult<()> {
    let transactions = storage.transactions.get_all()?;
    let goals = storage.budget_goals.get_all()?;
    let budget = BudgetComparison::for_month(&goals, &transactions, Month::of(today));
    let alerts = collect_alerts(
        &budget.rows,
        &storage.financial_goals.get_all()?,
        &settings.notifications,
        today,
    );

    if alerts.is_empty() {
        println!("No alerts.");
    }
    for alert in &alerts {
        println!("{}", alert);
    }
    Ok(())
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    cmd: ReportCommands,
    today: NaiveDate,
) -> FinanceResult<()> {
    match cmd {
        ReportCommands::Spending { period, csv } => {
            let period: ReportPeriod = parse_value(&period)?;
            let report = SpendingReport::generate(storage, period, today)?;
            print!("{}", report.format_terminal());

            if let Some(path) = csv {
                let file = File::create(&path).map_err(|e| {
                    FinanceError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                report.export_csv(file)?;
                println!("\nDaily spending written to {}", path.display());
            }
        }

        ReportCommands::Trend => {
            let trend = MonthlyTrend::from_transactions(&storage.transactions.get_all()?);
            if trend.is_empty() {
                println!("No transactions yet.");
            } else {
                print!("{}", trend.format_terminal());
            }
        }

        ReportCommands::Health => {
            let transactions = storage.transactions.get_all()?;
            let summary = FinancialSummary::from_transactions(&transactions);
            let budget = BudgetComparison::for_month(
                &storage.budget_goals.get_all()?,
                &transactions,
                Month::of(today),
            );
            let score = HealthScore::compute(
                summary.total_income,
                summary.total_expenses,
                budget.average_adherence(),
            );
            print!("{}", score.format_terminal());
        }
    }

    Ok(())
}
