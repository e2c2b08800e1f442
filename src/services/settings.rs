//! Notification settings service
//!
//! There is exactly one notification settings record, stored inside the
//! settings file.

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::error::FinanceResult;
use crate::storage::Storage;

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct NotificationUpdate {
    pub budget_alert_threshold: Option<u8>,
    pub goal_deadline_alert_days: Option<u32>,
    pub email_notifications: Option<bool>,
    pub email_address: Option<String>,
}

impl NotificationUpdate {
    pub fn is_empty(&self) -> bool {
        self.budget_alert_threshold.is_none()
            && self.goal_deadline_alert_days.is_none()
            && self.email_notifications.is_none()
            && self.email_address.is_none()
    }
}

pub struct SettingsService<'a> {
    storage: &'a Storage,
}

impl<'a> SettingsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> FinanceResult<Settings> {
        Settings::load_or_create(self.storage.paths())
    }

    /// Apply `update`, validate and persist
    ///
    /// Turning email notifications off clears the stored address. Invalid
    /// values leave the saved settings untouched.
    pub fn update_notifications(&self, update: NotificationUpdate) -> FinanceResult<Settings> {
        let mut settings = self.load()?;
        let before = settings.notifications.clone();

        let mut next = before.clone();
        if let Some(threshold) = update.budget_alert_threshold {
            next.budget_alert_threshold = threshold;
        }
        if let Some(days) = update.goal_deadline_alert_days {
            next.goal_deadline_alert_days = days;
        }
        if let Some(enabled) = update.email_notifications {
            next.email_notifications = enabled;
        }
        if let Some(address) = update.email_address {
            let address = address.trim().to_string();
            next.email_address = (!address.is_empty()).then_some(address);
        }
        if !next.email_notifications {
            next.email_address = None;
        }

        next.validate()?;
        if next == before {
            return Ok(settings);
        }

        settings.notifications = next;
        settings.save(self.storage.paths())?;
        self.storage.log_update(
            EntityType::Settings,
            "notifications",
            None,
            &before,
            &settings.notifications,
        )?;

        Ok(settings)
    }
}
