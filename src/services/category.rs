//! Category service
//!
//! Lists the merged built-in and custom categories and adds custom ones.
//! Callers pass the transaction kind explicitly when they need a filtered
//! list; no selection state is kept between calls.

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, TransactionKind};
use crate::storage::Storage;

pub struct CategoryService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    pub name: String,
    pub kind: TransactionKind,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a custom category; names must be unique across all categories
    pub fn create(&self, input: CreateCategoryInput) -> FinanceResult<Category> {
        let mut category = Category::new(input.name.trim(), input.kind);
        category.icon = input.icon.unwrap_or_default().trim().to_string();
        category.color = input.color.unwrap_or_default().trim().to_string();
        category.description = input.description.unwrap_or_default().trim().to_string();

        category
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.categories.insert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.key(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    /// Every category: built-ins first, then custom ones in the order added
    pub fn list(&self) -> FinanceResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    pub fn list_for_kind(&self, kind: TransactionKind) -> FinanceResult<Vec<Category>> {
        self.storage.categories.for_kind(kind)
    }

    pub fn get(&self, name: &str) -> FinanceResult<Option<Category>> {
        self.storage.categories.get_by_name(name)
    }
}
