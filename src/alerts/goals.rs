//! Goal deadline and progress alerts

use chrono::NaiveDate;

use super::{Alert, AlertKind, Severity};
use crate::models::FinancialGoal;

/// Progress below this share of the expected progress is behind schedule
const SLOW_PROGRESS_RATIO: f64 = 0.7;

/// Goals younger than this are never flagged as behind schedule
const MIN_ELAPSED_DAYS: i64 = 30;

/// Deadline and progress alerts for active goals
///
/// A goal can produce both a deadline alert and a behind-schedule alert.
pub fn goal_alerts(goals: &[FinancialGoal], today: NaiveDate, lead_days: u32) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for goal in goals.iter().filter(|g| g.is_active()) {
        let days_left = goal.days_left(today);
        if days_left <= 0 {
            alerts.push(Alert::new(
                AlertKind::GoalOverdue,
                Severity::High,
                goal.name.clone(),
                format!(
                    "'{}' reached its target date {} at {:.1}% progress",
                    goal.name,
                    goal.target_date,
                    goal.progress_percent()
                ),
            ));
        } else if days_left <= i64::from(lead_days) {
            alerts.push(Alert::new(
                AlertKind::GoalApproaching,
                Severity::Medium,
                goal.name.clone(),
                format!(
                    "'{}' is due in {} day{} ({:.1}% complete)",
                    goal.name,
                    days_left,
                    if days_left == 1 { "" } else { "s" },
                    goal.progress_percent()
                ),
            ));
        }

        if let Some(expected) = expected_progress(goal, today) {
            let progress = goal.progress_percent();
            let behind = progress < SLOW_PROGRESS_RATIO * expected;
            if behind && goal.days_elapsed(today) > MIN_ELAPSED_DAYS {
                alerts.push(Alert::new(
                    AlertKind::GoalBehindSchedule,
                    Severity::Medium,
                    goal.name.clone(),
                    format!(
                        "'{}' is behind schedule: {:.1}% done, {:.1}% expected by now",
                        goal.name, progress, expected
                    ),
                ));
            }
        }
    }

    alerts
}

/// Percent of the planned duration already elapsed; `None` for an empty plan
fn expected_progress(goal: &FinancialGoal, today: NaiveDate) -> Option<f64> {
    let total = goal.total_days();
    (total > 0).then(|| goal.days_elapsed(today) as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalStatus, Money};
    use chrono::{Duration, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(created: NaiveDate, target: NaiveDate, current: i64) -> FinancialGoal {
        let mut goal = FinancialGoal::new("Vacation", Money::from_units(1000), target);
        goal.created_at = Utc.from_utc_datetime(&created.and_hms_opt(12, 0, 0).unwrap());
        goal.current_amount = Money::from_units(current);
        goal
    }

    #[test]
    fn test_due_today_is_overdue() {
        let today = date(2024, 6, 1);
        let alerts = goal_alerts(&[goal(today, today, 1000)], today, 7);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::GoalOverdue);
        assert_eq!(alerts[0].severity, Severity::High);
    }

    #[test]
    fn test_approaching_deadline() {
        let today = date(2024, 6, 1);
        let g = goal(today - Duration::days(5), today + Duration::days(7), 900);
        let alerts = goal_alerts(&[g.clone()], today, 7);
        assert_eq!(alerts[0].kind, AlertKind::GoalApproaching);
        assert_eq!(alerts[0].severity, Severity::Medium);

        assert!(goal_alerts(&[g], today, 6).is_empty());
    }

    #[test]
    fn test_behind_schedule() {
        let today = date(2024, 6, 1);
        // 60 of 120 days elapsed: 50% expected, 10% done
        let g = goal(today - Duration::days(60), today + Duration::days(60), 100);
        let alerts = goal_alerts(&[g], today, 7);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::GoalBehindSchedule);

        // Same ratio but only 20 days in
        let young = goal(today - Duration::days(20), today + Duration::days(20), 100);
        assert!(goal_alerts(&[young], today, 7).is_empty());
    }

    #[test]
    fn test_on_track_goal_is_quiet() {
        let today = date(2024, 6, 1);
        let g = goal(today - Duration::days(60), today + Duration::days(60), 400);
        assert!(goal_alerts(&[g], today, 7).is_empty());
    }

    #[test]
    fn test_inactive_goals_skipped() {
        let today = date(2024, 6, 1);
        let mut g = goal(today, today, 0);
        g.status = GoalStatus::Completed;
        assert!(goal_alerts(&[g], today, 7).is_empty());
    }
}
