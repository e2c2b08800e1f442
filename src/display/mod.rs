//! Display formatting for terminal output
//!
//! List views are rendered with `tabled`; detail views and reports build
//! plain strings.

pub mod category;
pub mod goal;
pub mod transaction;

pub use category::{format_budget_list, format_category_list};
pub use goal::{format_goal_details, format_goal_list, format_template_list};
pub use transaction::{format_transaction_details, format_transaction_list};

use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Render rows as a table, or `empty` when there are none
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>, empty: &str) -> String {
    if rows.is_empty() {
        return format!("{}\n", empty);
    }
    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Shorten `s` to at most `max` characters, marking the cut with "..."
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long description", 10), "a long ...");
    }
}
