//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{parse_amount, parse_date, parse_optional_date, parse_value};
use crate::display::{format_transaction_details, format_transaction_list};
use crate::error::FinanceResult;
use crate::models::TransactionKind;
use crate::services::{CreateTransactionInput, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// "income" or "expense"
        kind: String,
        /// Amount (e.g., "42" or "42.50")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Tag (repeat for several)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List transactions, newest first
    List {
        /// Only "income" or "expense"
        #[arg(long = "type")]
        kind: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    cmd: TransactionCommands,
    today: NaiveDate,
) -> FinanceResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            date,
            description,
            tags,
        } => {
            let kind: TransactionKind = parse_value(&kind)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today,
            };

            let mut input =
                CreateTransactionInput::new(date, kind, category, parse_amount(&amount)?);
            input.description = description.unwrap_or_default();
            input.tags = tags.into_iter().collect();

            let txn = service.create(input)?;
            println!("Recorded {}", txn.kind.to_string().to_lowercase());
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::List {
            kind,
            category,
            start,
            end,
            limit,
        } => {
            let mut filter = TransactionFilter::new()
                .date_range(
                    parse_optional_date(start.as_deref())?,
                    parse_optional_date(end.as_deref())?,
                )
                .limit(limit);
            if let Some(kind) = kind {
                filter = filter.kind(parse_value(&kind)?);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }

            let transactions = service.list(&filter)?;
            print!("{}", format_transaction_list(&transactions));
            let total = service.count()?;
            if transactions.len() < total {
                println!("Showing {} of {} transactions", transactions.len(), total);
            }
        }
    }

    Ok(())
}
