//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Longest string value shown verbatim in a change summary
const MAX_SUMMARY_STRING: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => f.pad("CREATE"),
            Operation::Update => f.pad("UPDATE"),
        }
    }
}

/// Kinds of records that show up in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Transaction,
    BudgetGoal,
    FinancialGoal,
    RecurringTemplate,
    Category,
    Settings,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityType::Transaction => "Transaction",
            EntityType::BudgetGoal => "BudgetGoal",
            EntityType::FinancialGoal => "FinancialGoal",
            EntityType::RecurringTemplate => "RecurringTemplate",
            EntityType::Category => "Category",
            EntityType::Settings => "Settings",
        };
        f.pad(s)
    }
}

/// A single line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// Top-level fields that changed, e.g. `amount: 30000 -> 40000`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: serde_json::to_value(entity).ok(),
            changes: None,
        }
    }

    /// Record an update; the change summary is computed from both states
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        let before = serde_json::to_value(before).ok();
        let after = serde_json::to_value(after).ok();
        let changes = match (&before, &after) {
            (Some(b), Some(a)) => summarize_changes(b, a),
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before,
            after,
            changes,
        }
    }

    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }
        if let Some(changes) = &self.changes {
            output.push_str(&format!("\n  Changes: {}", changes));
        }

        output
    }
}

/// Describe top-level field changes between two JSON objects
fn summarize_changes(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before), Value::Object(after)) = (before, after) else {
        return (before != after).then(|| format!("{} -> {}", short(before), short(after)));
    };

    let mut changes: Vec<String> = before
        .iter()
        .filter_map(|(key, old)| match after.get(key) {
            Some(new) if new == old => None,
            Some(new) => Some(format!("{}: {} -> {}", key, short(old), short(new))),
            None => Some(format!("{}: {} -> (removed)", key, short(old))),
        })
        .collect();

    changes.extend(
        after
            .iter()
            .filter(|(key, _)| !before.contains_key(*key))
            .map(|(key, new)| format!("{}: (added) -> {}", key, short(new))),
    );

    (!changes.is_empty()).then(|| changes.join(", "))
}

fn short(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_SUMMARY_STRING => {
            let head: String = s.chars().take(MAX_SUMMARY_STRING - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(
            EntityType::Transaction,
            "txn-1a2b3c4d",
            Some("Food".to_string()),
            &json!({"category": "Food", "amount": 30000}),
        );

        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert_eq!(entry.after.as_ref().unwrap()["amount"], 30000);
        assert!(entry.changes.is_none());
    }

    #[test]
    fn test_update_entry_summarizes_changes() {
        let entry = AuditEntry::update(
            EntityType::BudgetGoal,
            "food",
            None,
            &json!({"category": "Food", "amount": 30000}),
            &json!({"category": "Food", "amount": 40000, "period": "monthly"}),
        );

        let changes = entry.changes.unwrap();
        assert!(changes.contains("amount: 30000 -> 40000"));
        assert!(changes.contains("period: (added) -> \"monthly\""));
        assert!(!changes.contains("category"));
    }

    #[test]
    fn test_update_without_changes() {
        let state = json!({"name": "Car"});
        let entry = AuditEntry::update(EntityType::FinancialGoal, "goal-1", None, &state, &state);
        assert!(entry.changes.is_none());
    }

    #[test]
    fn test_entity_type_serialization() {
        let value = serde_json::to_value(EntityType::RecurringTemplate).unwrap();
        assert_eq!(value, "recurring_template");
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::create(
            EntityType::Category,
            "pets",
            Some("Pets".to_string()),
            &json!({"name": "Pets"}),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("CREATE"));
        assert!(formatted.contains("Category"));
        assert!(formatted.contains("(Pets)"));
    }
}
