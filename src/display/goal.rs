//! Financial goal and recurring template display formatting

use chrono::NaiveDate;
use tabled::Tabled;

use super::render_table;
use crate::models::{FinancialGoal, RecurringTemplate};

const BAR_WIDTH: usize = 20;

/// A `[#####-----]` style progress bar, capped at full
pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Saved")]
    current: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn format_goal_list(goals: &[FinancialGoal], today: NaiveDate) -> String {
    let rows = goals
        .iter()
        .map(|g| {
            let days_left = g.days_left(today);
            let due = if g.is_active() && days_left >= 0 {
                format!("{} ({}d)", g.target_date, days_left)
            } else {
                g.target_date.to_string()
            };
            GoalRow {
                id: g.id.to_string(),
                name: g.name.clone(),
                current: g.current_amount.to_string(),
                target: g.target_amount.to_string(),
                progress: format!(
                    "{} {:>5.1}%",
                    progress_bar(g.progress_percent()),
                    g.progress_percent()
                ),
                due,
                status: g.status.to_string(),
            }
        })
        .collect();
    render_table(rows, "No financial goals yet.")
}

pub fn format_goal_details(goal: &FinancialGoal, today: NaiveDate) -> String {
    let mut output = String::new();
    output.push_str(&format!("Goal:      {} ({})\n", goal.name, goal.id));
    output.push_str(&format!("Status:    {}\n", goal.status));
    output.push_str(&format!("Saved:     {} of {}\n", goal.current_amount, goal.target_amount));
    output.push_str(&format!(
        "Progress:  {} {:.1}%\n",
        progress_bar(goal.progress_percent()),
        goal.progress_percent()
    ));
    output.push_str(&format!(
        "Due:       {} ({} days left)\n",
        goal.target_date,
        goal.days_left(today)
    ));
    output
}

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Every")]
    frequency: String,
    #[tabled(rename = "From")]
    start: String,
    #[tabled(rename = "Until")]
    end: String,
    #[tabled(rename = "Last Run")]
    last: String,
    #[tabled(rename = "Active")]
    active: &'static str,
}

pub fn format_template_list(templates: &[RecurringTemplate]) -> String {
    let rows = templates
        .iter()
        .map(|t| TemplateRow {
            id: t.id.to_string(),
            name: t.name.clone(),
            kind: t.kind.to_string(),
            category: t.category.clone(),
            amount: t.amount.to_string(),
            frequency: t.frequency.to_string(),
            start: t.start_date.to_string(),
            end: t.end_date.map_or_else(|| "-".to_string(), |d| d.to_string()),
            last: t.last_generated.map_or_else(|| "never".to_string(), |d| d.to_string()),
            active: if t.active { "yes" } else { "no" },
        })
        .collect();
    render_table(rows, "No recurring transactions.")
}
