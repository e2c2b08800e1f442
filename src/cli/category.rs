//! Category CLI commands

use clap::Subcommand;

use super::parse_value;
use crate::display::format_category_list;
use crate::error::FinanceResult;
use crate::services::{CategoryService, CreateCategoryInput};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List built-in and custom categories
    List {
        /// Only categories for "income" or "expense"
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Add a custom category
    Add {
        /// Category name
        name: String,
        /// "income" or "expense"
        #[arg(long = "type")]
        kind: String,
        /// Icon shown next to the name
        #[arg(long)]
        icon: Option<String>,
        /// Color as #RRGGBB
        #[arg(long)]
        color: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> FinanceResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { kind } => {
            let categories = match kind {
                Some(kind) => service.list_for_kind(parse_value(&kind)?)?,
                None => service.list()?,
            };
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Add {
            name,
            kind,
            icon,
            color,
            description,
        } => {
            let category = service.create(CreateCategoryInput {
                name,
                kind: parse_value(&kind)?,
                icon,
                color,
                description,
            })?;
            println!(
                "Created {} category '{}'",
                category.kind.to_string().to_lowercase(),
                category.name
            );
        }
    }

    Ok(())
}
