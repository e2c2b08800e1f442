//! Budget CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::parse_amount;
use crate::display::format_budget_list;
use crate::error::FinanceResult;
use crate::models::Month;
use crate::reports::BudgetComparison;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly budget for a category
    Set {
        /// Category name
        category: String,
        /// Monthly amount (e.g., "400")
        amount: String,
    },

    /// List budget goals
    List,

    /// Compare this month's spending with the budgets
    Status {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    cmd: BudgetCommands,
    today: NaiveDate,
) -> FinanceResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Set { category, amount } => {
            let goal = service.set_goal(&category, parse_amount(&amount)?)?;
            println!("Budget for '{}' set to {} per month", goal.category, goal.amount);
        }

        BudgetCommands::List => {
            print!("{}", format_budget_list(&service.list()?));
        }

        BudgetCommands::Status { month } => {
            let month = match month {
                Some(m) => super::parse_value::<Month>(&m)?,
                None => Month::of(today),
            };
            let transactions = storage.transactions.get_all()?;
            let comparison = BudgetComparison::for_month(&service.list()?, &transactions, month);
            print!("{}", comparison.format_terminal());
        }
    }

    Ok(())
}
