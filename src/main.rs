use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fintrack::cli::{
    handle_alerts_command, handle_audit_command, handle_budget_command, handle_calc_command,
    handle_category_command, handle_dashboard_command, handle_export_command, handle_goal_command,
    handle_import_command, handle_recurring_command, handle_report_command,
    handle_settings_command, handle_transaction_command, parse_date, BudgetCommands, CalcCommands,
    CategoryCommands, GoalCommands, RecurringCommands, ReportCommands, SettingsCommands,
    TransactionCommands,
};
use fintrack::config::{paths::FinTrackPaths, settings::Settings};
use fintrack::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "FINTRACK_LOG";

#[derive(Parser)]
#[command(
    name = "fintrack",
    author = "Kaylee Beyene",
    version,
    about = "Terminal personal-finance tracker",
    long_about = "fintrack records income and expenses, tracks monthly budgets and \
                  savings goals, raises alerts when spending nears a budget or a goal \
                  falls behind, and projects the savings needed to reach a target."
)]
struct Cli {
    /// Evaluate dates as if today were this day (YYYY-MM-DD)
    #[arg(long, global = true, env = "FINTRACK_AS_OF")]
    as_of: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Recurring transaction commands
    #[command(subcommand)]
    Recurring(RecurringCommands),

    /// Overview of totals, this month, budgets and alerts
    Dashboard,

    /// Show budget and goal alerts
    Alerts,

    /// Reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Notification settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Import transactions from a file
    Import {
        /// CSV, TSV, JSON or YAML file
        file: PathBuf,
        /// csv, tsv, json or yaml (defaults to the file extension)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Export transactions to a file
    Export {
        /// Output file
        file: PathBuf,
        /// csv, tsv, json or yaml (defaults to the file extension)
        #[arg(short, long)]
        format: Option<String>,
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// Financial calculators
    #[command(subcommand)]
    Calc(CalcCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let today: NaiveDate = match cli.as_of.as_deref() {
        Some(date) => parse_date(date)?,
        None => Local::now().date_naive(),
    };

    let paths = FinTrackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Calculators need no stored data
    let command = match cli.command {
        Some(Commands::Calc(cmd)) => {
            handle_calc_command(cmd)?;
            return Ok(());
        }
        other => other,
    };

    let storage = Storage::open(paths.clone())?;
    tracing::debug!(%today, "fintrack started");

    match command {
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Initialized fintrack at: {}", paths.base_dir().display());
            println!();
            println!("Built-in categories are ready:");
            println!("  Income:  Salary, Investment");
            println!("  Expense: Food, Transport, Housing, Utilities, Entertainment, Other");
            println!();
            println!("Run 'fintrack txn add expense 12.50 -c Food' to record a transaction.");
        }
        Some(Commands::Config) => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Alert threshold: {}%",
                settings.notifications.budget_alert_threshold
            );
        }
        Some(Commands::Txn(cmd)) => handle_transaction_command(&storage, cmd, today)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, cmd, today)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&storage, cmd, today)?,
        Some(Commands::Recurring(cmd)) => handle_recurring_command(&storage, cmd, today)?,
        Some(Commands::Dashboard) => handle_dashboard_command(&storage, &settings, today)?,
        Some(Commands::Alerts) => handle_alerts_command(&storage, &settings, today)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, cmd, today)?,
        Some(Commands::Settings(cmd)) => handle_settings_command(&storage, cmd)?,
        Some(Commands::Import { file, format }) => {
            handle_import_command(&storage, &file, format.as_deref())?
        }
        Some(Commands::Export {
            file,
            format,
            start,
            end,
        }) => handle_export_command(
            &storage,
            &file,
            format.as_deref(),
            start.as_deref(),
            end.as_deref(),
        )?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Calc(_)) => {}
        None => {
            println!("fintrack - terminal personal-finance tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack dashboard' for an overview.");
        }
    }

    storage.close()?;
    Ok(())
}
