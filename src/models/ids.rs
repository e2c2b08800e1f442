//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Check whether a user-supplied identifier refers to this ID
            ///
            /// Accepts the full UUID, or the short display form
            /// (prefix + first 8 hex digits), with or without the prefix.
            pub fn matches(&self, identifier: &str) -> bool {
                let identifier = identifier.trim();
                let full = self.0.to_string();
                let short = &full[..8];
                let bare = identifier.strip_prefix($display_prefix).unwrap_or(identifier);
                bare.eq_ignore_ascii_case(&full) || bare.eq_ignore_ascii_case(short)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(GoalId, "goal-");
define_id!(TemplateId, "rec-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = TransactionId::new();
        let display = id.to_string();
        assert!(display.starts_with("txn-"));
        assert_eq!(display.len(), 12); // "txn-" + 8 chars
    }

    #[test]
    fn test_id_serialization() {
        let id = GoalId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: GoalId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse_with_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: TemplateId = format!("rec-{}", uuid_str).parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_matches_short_and_full_forms() {
        let id = GoalId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap());

        assert!(id.matches("goal-550e8400"));
        assert!(id.matches("550e8400"));
        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!id.matches("goal-deadbeef"));
    }
}
