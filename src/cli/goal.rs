//! Financial goal CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{parse_amount, parse_date, parse_value};
use crate::display::{format_goal_details, format_goal_list};
use crate::error::FinanceResult;
use crate::models::{GoalStatus, Money};
use crate::services::{CreateGoalInput, GoalService};
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Amount already saved
        #[arg(long)]
        current: Option<String>,
    },

    /// List goals
    List,

    /// Show one goal
    Show {
        /// Goal name or ID
        goal: String,
    },

    /// Record the amount saved so far
    Progress {
        /// Goal name or ID
        goal: String,
        /// Total saved
        amount: String,
    },

    /// Change a goal's status
    Status {
        /// Goal name or ID
        goal: String,
        /// "active", "completed" or "cancelled"
        status: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    cmd: GoalCommands,
    today: NaiveDate,
) -> FinanceResult<()> {
    let service = GoalService::new(storage);

    match cmd {
        GoalCommands::Add {
            name,
            target,
            date,
            current,
        } => {
            let current_amount = match current {
                Some(c) => parse_amount(&c)?,
                None => Money::zero(),
            };
            let goal = service.create(
                CreateGoalInput {
                    name,
                    target_amount: parse_amount(&target)?,
                    target_date: parse_date(&date)?,
                    current_amount,
                },
                today,
            )?;
            println!("Created goal '{}' ({})", goal.name, goal.id);
        }

        GoalCommands::List => {
            print!("{}", format_goal_list(&service.list()?, today));
        }

        GoalCommands::Show { goal } => {
            print!("{}", format_goal_details(&service.find(&goal)?, today));
        }

        GoalCommands::Progress { goal, amount } => {
            let goal = service.update_progress(&goal, parse_amount(&amount)?)?;
            print!("{}", format_goal_details(&goal, today));
        }

        GoalCommands::Status { goal, status } => {
            let status: GoalStatus = parse_value(&status)?;
            let goal = service.set_status(&goal, status)?;
            println!("Goal '{}' is now {}", goal.name, goal.status);
        }
    }

    Ok(())
}
