//! Custom error types for fintrack
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for fintrack operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV / TSV reading or writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Validation errors for data models and user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FinanceError {
    /// Create a "not found" error for financial goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Financial goal",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budget goals
    pub fn budget_goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget goal",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for recurring templates
    pub fn template_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Recurring template",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a duplicate error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FinanceError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_yaml::Error> for FinanceError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for fintrack operations
pub type FinanceResult<T> = Result<T, FinanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinanceError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FinanceError::goal_not_found("Vacation");
        assert_eq!(err.to_string(), "Financial goal not found: Vacation");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_duplicate_error() {
        let err = FinanceError::Duplicate {
            entity_type: "Category",
            identifier: "Pets".into(),
        };
        assert_eq!(err.to_string(), "Category already exists: Pets");
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FinanceError = io_err.into();
        assert!(matches!(err, FinanceError::Io(_)));
    }
}
