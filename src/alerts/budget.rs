//! Budget threshold alerts

use super::{Alert, AlertKind, Severity};
use crate::reports::BudgetComparisonRow;

/// Bands checked from the top; the first match wins
const BANDS: [(f64, AlertKind, Severity); 3] = [
    (100.0, AlertKind::OverBudget, Severity::High),
    (90.0, AlertKind::BudgetWarning, Severity::Medium),
    (80.0, AlertKind::BudgetNotice, Severity::Low),
];

/// One alert per category whose spending reached a band and is at or above
/// `threshold` percent of its goal
pub fn budget_alerts(rows: &[BudgetComparisonRow], threshold: u8) -> Vec<Alert> {
    rows.iter()
        .filter_map(|row| {
            if row.percentage < f64::from(threshold) {
                return None;
            }
            let (_, kind, severity) = BANDS
                .iter()
                .copied()
                .find(|(band, _, _)| row.percentage >= *band)?;

            let message = match kind {
                AlertKind::OverBudget => format!(
                    "{} is over budget: spent {} of {} ({:.0}%)",
                    row.category, row.actual, row.goal, row.percentage
                ),
                _ => format!(
                    "{} has used {:.0}% of its budget ({} of {})",
                    row.category, row.percentage, row.actual, row.goal
                ),
            };
            Some(Alert::new(kind, severity, row.category.clone(), message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn row(goal: i64, actual: i64) -> BudgetComparisonRow {
        BudgetComparisonRow::new("Food", Money::from_units(goal), Money::from_units(actual))
    }

    #[test]
    fn test_bands() {
        let cases = [
            (400, 300, None),
            (300, 300, Some(Severity::High)),
            (100, 95, Some(Severity::Medium)),
            (100, 85, Some(Severity::Low)),
            (100, 79, None),
        ];
        for (goal, actual, expected) in cases {
            let alerts = budget_alerts(&[row(goal, actual)], 80);
            assert_eq!(alerts.first().map(|a| a.severity), expected, "{actual}/{goal}");
        }
    }

    #[test]
    fn test_over_budget_message() {
        let alerts = budget_alerts(&[row(300, 300)], 80);
        assert_eq!(alerts[0].kind, AlertKind::OverBudget);
        assert!(alerts[0].message.contains("over budget"));
    }

    #[test]
    fn test_threshold_filters_lower_bands() {
        let rows = [row(100, 85), row(100, 95), row(100, 120)];
        assert_eq!(budget_alerts(&rows, 80).len(), 3);
        assert_eq!(budget_alerts(&rows, 90).len(), 2);
        assert_eq!(budget_alerts(&rows, 95).len(), 2);
        assert_eq!(budget_alerts(&rows, 100).len(), 1);
    }

    #[test]
    fn test_threshold_between_bands_uses_actual_percentage() {
        let alerts = budget_alerts(&[row(100, 87)], 85);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Low);

        let alerts = budget_alerts(&[row(100, 97)], 95);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::BudgetWarning);

        assert!(budget_alerts(&[row(100, 84)], 85).is_empty());
    }

    #[test]
    fn test_zero_goal_never_alerts() {
        let rows = [BudgetComparisonRow::new("Gifts", Money::zero(), Money::from_units(50))];
        assert!(budget_alerts(&rows, 50).is_empty());
    }
}
