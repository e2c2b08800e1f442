//! Category model
//!
//! Categories label transactions. A fixed set ships with the application and
//! users can add their own; both kinds live in one lookup table at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::TransactionKind;

/// Longest accepted category name
pub const MAX_NAME_LEN: usize = 50;

/// Categories available before any custom ones are added
pub const BUILTIN_CATEGORIES: &[(&str, TransactionKind, &str)] = &[
    ("Salary", TransactionKind::Income, "💰"),
    ("Investment", TransactionKind::Income, "📈"),
    ("Food", TransactionKind::Expense, "🍽️"),
    ("Transport", TransactionKind::Expense, "🚗"),
    ("Housing", TransactionKind::Expense, "🏠"),
    ("Utilities", TransactionKind::Expense, "💡"),
    ("Entertainment", TransactionKind::Expense, "🎬"),
    ("Other", TransactionKind::Expense, "📦"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub description: String,

    /// Built-in categories are never persisted
    #[serde(skip)]
    pub builtin: bool,
}

impl Category {
    /// Create a custom category
    pub fn new(name: impl Into<String>, kind: TransactionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            icon: String::new(),
            color: String::new(),
            description: String::new(),
            builtin: false,
        }
    }

    /// The fixed built-in set, in display order
    pub fn builtins() -> Vec<Category> {
        BUILTIN_CATEGORIES
            .iter()
            .map(|(name, kind, icon)| Self {
                name: (*name).to_string(),
                kind: *kind,
                icon: (*icon).to_string(),
                color: String::new(),
                description: String::new(),
                builtin: true,
            })
            .collect()
    }

    /// Case-insensitive lookup key
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if name.len() > MAX_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(name.len()));
        }
        if !self.color.is_empty() && !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.icon.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.icon, self.name)
        }
    }
}

fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_NAME_LEN
            ),
            Self::InvalidColor(c) => write!(f, "Invalid color '{}': expected #RRGGBB", c),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
