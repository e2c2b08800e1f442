//! Category repository for JSON storage
//!
//! Only custom categories are written to categories.json. The repository
//! keeps a merged lookup table (built-ins first, then custom categories in
//! the order they were added) that is rebuilt on load and on every insert.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{Category, TransactionKind};

use super::file_io::{read_json, write_json_atomic};
use super::lock_poisoned;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

#[derive(Default)]
struct CategoryTables {
    custom: Vec<Category>,
    lookup: Vec<Category>,
}

impl CategoryTables {
    fn rebuild_lookup(&mut self) {
        let mut lookup = Category::builtins();
        lookup.extend(self.custom.iter().cloned());
        self.lookup = lookup;
    }
}

pub struct CategoryRepository {
    path: PathBuf,
    tables: RwLock<CategoryTables>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        let mut tables = CategoryTables::default();
        tables.rebuild_lookup();

        Self {
            path,
            tables: RwLock::new(tables),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: CategoryData = read_json(&self.path)?;
        let mut tables = self.tables.write().map_err(lock_poisoned)?;

        tables.custom = file_data.categories;
        for category in &mut tables.custom {
            category.builtin = false;
        }
        tables.rebuild_lookup();

        tracing::debug!(custom = tables.custom.len(), "loaded categories");
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        let file_data = CategoryData {
            categories: tables.custom.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Add a custom category
    ///
    /// Fails with `Duplicate` when the name matches any known category,
    /// built-in or custom, ignoring case.
    pub fn insert(&self, mut category: Category) -> Result<(), FinanceError> {
        let mut tables = self.tables.write().map_err(lock_poisoned)?;

        let key = category.key();
        if tables.lookup.iter().any(|c| c.key() == key) {
            return Err(FinanceError::Duplicate {
                entity_type: "Category",
                identifier: category.name,
            });
        }

        category.name = category.name.trim().to_string();
        category.builtin = false;
        tables.custom.push(category);
        tables.rebuild_lookup();
        Ok(())
    }

    /// Every known category in lookup order
    pub fn get_all(&self) -> Result<Vec<Category>, FinanceError> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        Ok(tables.lookup.clone())
    }

    /// Categories usable for transactions of the given kind
    pub fn for_kind(&self, kind: TransactionKind) -> Result<Vec<Category>, FinanceError> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        Ok(tables
            .lookup
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect())
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, FinanceError> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        let key = name.trim().to_lowercase();
        Ok(tables.lookup.iter().find(|c| c.key() == key).cloned())
    }

    pub fn custom(&self) -> Result<Vec<Category>, FinanceError> {
        let tables = self.tables.read().map_err(lock_poisoned)?;
        Ok(tables.custom.clone())
    }
}
