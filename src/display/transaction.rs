//! Transaction display formatting

use tabled::Tabled;

use super::{render_table, truncate};
use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(txn: &Transaction) -> Self {
        let recurring = if txn.recurring_id.is_some() { " ↻" } else { "" };
        Self {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            amount: format!("{}{}", txn.amount, recurring),
            description: truncate(&txn.description, 30),
            tags: txn.tags.iter().cloned().collect::<Vec<_>>().join(", "),
        }
    }
}

/// Format transactions as a table, in the order given
pub fn format_transaction_list(transactions: &[Transaction]) -> String {
    render_table(
        transactions.iter().map(TransactionRow::from).collect(),
        "No transactions found.",
    )
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Amount:      {}\n", txn.amount));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }
    if !txn.tags.is_empty() {
        let tags: Vec<_> = txn.tags.iter().map(String::as_str).collect();
        output.push_str(&format!("Tags:        {}\n", tags.join(", ")));
    }
    if let Some(template) = txn.recurring_id {
        output.push_str(&format!("Recurring:   {}\n", template));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            TransactionKind::Expense,
            "Food",
            Money::from_cents(1250),
        )
        .with_description("Lunch")
        .with_tags(["work", "meal"])
    }

    #[test]
    fn test_list() {
        let output = format_transaction_list(&[sample()]);
        assert!(output.contains("Food"));
        assert!(output.contains("$12.50"));
        assert!(output.contains("meal, work"));

        assert_eq!(format_transaction_list(&[]), "No transactions found.\n");
    }

    #[test]
    fn test_details() {
        let output = format_transaction_details(&sample());
        assert!(output.contains("Type:        Expense"));
        assert!(output.contains("Description: Lunch"));
        assert!(!output.contains("Recurring"));
    }
}
