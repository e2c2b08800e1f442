//! User settings for fintrack
//!
//! Holds display preferences and the single notification settings record
//! that drives budget and goal alerts.

use serde::{Deserialize, Serialize};

use super::paths::FinTrackPaths;
use crate::error::FinanceError;

/// Lowest accepted budget alert threshold (percent)
pub const MIN_ALERT_THRESHOLD: u8 = 50;
/// Highest accepted budget alert threshold (percent)
pub const MAX_ALERT_THRESHOLD: u8 = 100;
/// Threshold values must be a multiple of this step
pub const ALERT_THRESHOLD_STEP: u8 = 5;
/// Accepted range for goal deadline lead days
pub const DEADLINE_DAYS_RANGE: std::ops::RangeInclusive<u32> = 1..=30;

/// Alerting preferences
///
/// The email address is collected for future use only; nothing is ever sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Budget alerts below this percentage of a budget are suppressed
    #[serde(default = "default_threshold")]
    pub budget_alert_threshold: u8,

    /// Goals due within this many days raise a deadline alert
    #[serde(default = "default_deadline_days")]
    pub goal_deadline_alert_days: u32,

    #[serde(default)]
    pub email_notifications: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

fn default_threshold() -> u8 {
    80
}

fn default_deadline_days() -> u32 {
    7
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            budget_alert_threshold: default_threshold(),
            goal_deadline_alert_days: default_deadline_days(),
            email_notifications: false,
            email_address: None,
        }
    }
}

impl NotificationSettings {
    /// Check the ranges accepted by the settings form
    pub fn validate(&self) -> Result<(), FinanceError> {
        let threshold = self.budget_alert_threshold;
        if !(MIN_ALERT_THRESHOLD..=MAX_ALERT_THRESHOLD).contains(&threshold)
            || threshold % ALERT_THRESHOLD_STEP != 0
        {
            return Err(FinanceError::Validation(format!(
                "Alert threshold must be between {} and {} in steps of {} (got {})",
                MIN_ALERT_THRESHOLD, MAX_ALERT_THRESHOLD, ALERT_THRESHOLD_STEP, threshold
            )));
        }

        if !DEADLINE_DAYS_RANGE.contains(&self.goal_deadline_alert_days) {
            return Err(FinanceError::Validation(format!(
                "Goal deadline alert days must be between {} and {} (got {})",
                DEADLINE_DAYS_RANGE.start(),
                DEADLINE_DAYS_RANGE.end(),
                self.goal_deadline_alert_days
            )));
        }

        if self.email_notifications {
            match self.email_address.as_deref().map(str::trim) {
                Some(addr) if addr.contains('@') => {}
                _ => {
                    return Err(FinanceError::Validation(
                        "Email notifications require a valid email address".into(),
                    ))
                }
            }
        }

        Ok(())
    }
}

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            notifications: NotificationSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &FinTrackPaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    pub fn save(&self, paths: &FinTrackPaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.notifications.budget_alert_threshold, 80);
        assert_eq!(settings.notifications.goal_deadline_alert_days, 7);
        assert!(!settings.notifications.email_notifications);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.notifications.budget_alert_threshold = 90;
        settings.notifications.goal_deadline_alert_days = 14;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.notifications.budget_alert_threshold, 90);
        assert_eq!(loaded.notifications.goal_deadline_alert_days, 14);
    }

    #[test]
    fn test_missing_notification_block_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.notifications, NotificationSettings::default());
    }

    #[test]
    fn test_threshold_validation() {
        let mut n = NotificationSettings::default();
        assert!(n.validate().is_ok());

        n.budget_alert_threshold = 45;
        assert!(n.validate().is_err());

        n.budget_alert_threshold = 83;
        assert!(n.validate().is_err());

        n.budget_alert_threshold = 100;
        assert!(n.validate().is_ok());
    }

    #[test]
    fn test_deadline_days_validation() {
        let mut n = NotificationSettings::default();
        n.goal_deadline_alert_days = 0;
        assert!(n.validate().is_err());

        n.goal_deadline_alert_days = 31;
        assert!(n.validate().is_err());

        n.goal_deadline_alert_days = 30;
        assert!(n.validate().is_ok());
    }

    #[test]
    fn test_email_requires_address() {
        let mut n = NotificationSettings::default();
        n.email_notifications = true;
        assert!(n.validate().is_err());

        n.email_address = Some("me@example.com".into());
        assert!(n.validate().is_ok());
    }
}
