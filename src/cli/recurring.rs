//! Recurring transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{parse_amount, parse_optional_date, parse_value};
use crate::display::{format_template_list, format_transaction_list};
use crate::error::FinanceResult;
use crate::services::{CreateTemplateInput, RecurringService};
use crate::storage::Storage;

/// Recurring subcommands
#[derive(Subcommand)]
pub enum RecurringCommands {
    /// Create a recurring transaction template
    Add {
        /// Template name, used as the description of generated transactions
        name: String,
        /// "income" or "expense"
        kind: String,
        /// Amount per occurrence
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// daily, weekly, monthly or yearly
        #[arg(short = 'e', long = "every", default_value = "monthly")]
        frequency: String,
        /// First occurrence (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<String>,
        /// Last possible occurrence (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// List templates
    List,

    /// Stop a template from generating transactions
    Deactivate {
        /// Template name or ID
        template: String,
    },

    /// Create every transaction that has come due
    Run,
}

/// Handle a recurring command
pub fn handle_recurring_command(
    storage: &Storage,
    cmd: RecurringCommands,
    today: NaiveDate,
) -> FinanceResult<()> {
    let service = RecurringService::new(storage);

    match cmd {
        RecurringCommands::Add {
            name,
            kind,
            amount,
            category,
            frequency,
            start,
            end,
        } => {
            let template = service.create(CreateTemplateInput {
                name,
                kind: parse_value(&kind)?,
                category,
                amount: parse_amount(&amount)?,
                frequency: parse_value(&frequency)?,
                start_date: parse_optional_date(start.as_deref())?.unwrap_or(today),
                end_date: parse_optional_date(end.as_deref())?,
            })?;
            println!(
                "Created {} template '{}' ({})",
                template.frequency.to_string().to_lowercase(),
                template.name,
                template.id
            );
        }

        RecurringCommands::List => {
            print!("{}", format_template_list(&service.list()?));
        }

        RecurringCommands::Deactivate { template } => {
            let template = service.deactivate(&template)?;
            println!("Template '{}' deactivated", template.name);
        }

        RecurringCommands::Run => {
            let result = service.materialize_due(today)?;
            println!(
                "Checked {} template(s), created {} transaction(s)",
                result.templates_checked,
                result.created.len()
            );
            if !result.created.is_empty() {
                print!("{}", format_transaction_list(&result.created));
            }
        }
    }

    Ok(())
}
