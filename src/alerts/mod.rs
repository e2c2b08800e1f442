//! Budget and goal alerts
//!
//! Alerts are derived on demand from the current budget comparison and the
//! active financial goals; nothing is persisted.

pub mod budget;
pub mod goals;

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::settings::NotificationSettings;
use crate::models::FinancialGoal;
use crate::reports::BudgetComparisonRow;

pub use budget::budget_alerts;
pub use goals::goal_alerts;

/// How urgent an alert is; declared from most to least urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    OverBudget,
    BudgetWarning,
    BudgetNotice,
    GoalOverdue,
    GoalApproaching,
    GoalBehindSchedule,
}

impl AlertKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OverBudget => "Over budget",
            Self::BudgetWarning => "Budget warning",
            Self::BudgetNotice => "Budget notice",
            Self::GoalOverdue => "Goal overdue",
            Self::GoalApproaching => "Approaching deadline",
            Self::GoalBehindSchedule => "Behind schedule",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: Severity,
    /// Category or goal name the alert is about
    pub subject: String,
    pub message: String,
}

impl Alert {
    pub fn new(
        kind: AlertKind,
        severity: Severity,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:<6}] {}: {}", self.severity, self.kind.label(), self.message)
    }
}

/// Order alerts high, medium, low; ties keep their input order
pub fn sort_alerts(alerts: &mut [Alert]) {
    alerts.sort_by_key(|a| a.severity);
}

/// Every budget and goal alert for `today`, most urgent first
pub fn collect_alerts(
    budget_rows: &[BudgetComparisonRow],
    goals: &[FinancialGoal],
    settings: &NotificationSettings,
    today: NaiveDate,
) -> Vec<Alert> {
    let mut alerts = budget_alerts(budget_rows, settings.budget_alert_threshold);
    alerts.extend(goal_alerts(goals, today, settings.goal_deadline_alert_days));
    sort_alerts(&mut alerts);
    alerts
}
