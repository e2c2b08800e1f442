//! Category and budget goal display formatting

use tabled::Tabled;

use super::{render_table, truncate};
use crate::models::{BudgetGoal, Category};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "")]
    icon: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Source")]
    source: &'static str,
    #[tabled(rename = "Description")]
    description: String,
}

pub fn format_category_list(categories: &[Category]) -> String {
    let rows = categories
        .iter()
        .map(|c| CategoryRow {
            icon: c.icon.clone(),
            name: c.name.clone(),
            kind: c.kind.to_string(),
            color: c.color.clone(),
            source: if c.builtin { "built-in" } else { "custom" },
            description: truncate(&c.description, 40),
        })
        .collect();
    render_table(rows, "No categories found.")
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Period")]
    period: String,
}

pub fn format_budget_list(goals: &[BudgetGoal]) -> String {
    let rows = goals
        .iter()
        .map(|g| BudgetRow {
            category: g.category.clone(),
            amount: g.amount.to_string(),
            period: g.period.to_string(),
        })
        .collect();
    render_table(
        rows,
        "No budget goals set. Use 'fintrack budget set <category> <amount>'.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_category_list_marks_source() {
        let mut categories = Category::builtins();
        categories.push(Category::new("Pets", crate::models::TransactionKind::Expense));

        let output = format_category_list(&categories);
        assert!(output.contains("built-in"));
        assert!(output.contains("Pets"));
        assert!(output.contains("custom"));
    }

    #[test]
    fn test_budget_list() {
        let output = format_budget_list(&[BudgetGoal::monthly("Food", Money::from_units(400))]);
        assert!(output.contains("$400.00"));
        assert!(output.contains("monthly"));
        assert!(format_budget_list(&[]).starts_with("No budget goals"));
    }
}
