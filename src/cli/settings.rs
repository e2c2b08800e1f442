//! Settings CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::services::{NotificationUpdate, SettingsService};
use crate::storage::Storage;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show notification settings
    Show,

    /// Change notification settings
    Set {
        /// Budget alert threshold in percent (50-100, steps of 5)
        #[arg(long)]
        threshold: Option<u8>,
        /// Days before a goal's target date to start alerting (1-30)
        #[arg(long)]
        deadline_days: Option<u32>,
        /// Turn email notifications on or off
        #[arg(long)]
        email_notifications: Option<bool>,
        /// Address for email notifications
        #[arg(long)]
        email: Option<String>,
    },
}

fn format_settings(settings: &Settings) -> String {
    let n = &settings.notifications;
    format!(
        "Budget alert threshold:   {}%\n\
         Goal deadline alerts:     {} day(s) ahead\n\
         Email notifications:      {}\n\
         Email address:            {}\n",
        n.budget_alert_threshold,
        n.goal_deadline_alert_days,
        if n.email_notifications { "on" } else { "off" },
        n.email_address.as_deref().unwrap_or("-"),
    )
}

/// Handle a settings command
pub fn handle_settings_command(storage: &Storage, cmd: SettingsCommands) -> FinanceResult<()> {
    let service = SettingsService::new(storage);

    match cmd {
        SettingsCommands::Show => {
            print!("{}", format_settings(&service.load()?));
        }

        SettingsCommands::Set {
            threshold,
            deadline_days,
            email_notifications,
            email,
        } => {
            let update = NotificationUpdate {
                budget_alert_threshold: threshold,
                goal_deadline_alert_days: deadline_days,
                email_notifications,
                email_address: email,
            };
            if update.is_empty() {
                return Err(FinanceError::Validation(
                    "Nothing to change; pass at least one option".into(),
                ));
            }

            let settings = service.update_notifications(update)?;
            println!("Settings saved.");
            print!("{}", format_settings(&settings));
        }
    }

    Ok(())
}
