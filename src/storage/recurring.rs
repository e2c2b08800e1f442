//! Recurring template repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{RecurringTemplate, TemplateId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_poisoned;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RecurringData {
    templates: Vec<RecurringTemplate>,
}

pub struct RecurringRepository {
    path: PathBuf,
    templates: RwLock<HashMap<TemplateId, RecurringTemplate>>,
}

impl RecurringRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            templates: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: RecurringData = read_json(&self.path)?;
        let mut templates = self.templates.write().map_err(lock_poisoned)?;

        templates.clear();
        templates.extend(file_data.templates.into_iter().map(|t| (t.id, t)));

        tracing::debug!(count = templates.len(), "loaded recurring templates");
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let templates = self.get_all()?;
        write_json_atomic(&self.path, &RecurringData { templates })
    }

    pub fn get(&self, id: TemplateId) -> Result<Option<RecurringTemplate>, FinanceError> {
        let templates = self.templates.read().map_err(lock_poisoned)?;
        Ok(templates.get(&id).cloned())
    }

    /// All templates in creation order
    pub fn get_all(&self) -> Result<Vec<RecurringTemplate>, FinanceError> {
        let templates = self.templates.read().map_err(lock_poisoned)?;

        let mut list: Vec<_> = templates.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        Ok(list)
    }

    pub fn get_active(&self) -> Result<Vec<RecurringTemplate>, FinanceError> {
        let mut list = self.get_all()?;
        list.retain(|t| t.active);
        Ok(list)
    }

    /// Look a template up by id (full or short form) or by name, ignoring case
    pub fn find(&self, identifier: &str) -> Result<Option<RecurringTemplate>, FinanceError> {
        let templates = self.templates.read().map_err(lock_poisoned)?;
        let identifier = identifier.trim();

        Ok(templates
            .values()
            .find(|t| t.id.matches(identifier))
            .or_else(|| {
                templates
                    .values()
                    .find(|t| t.name.eq_ignore_ascii_case(identifier))
            })
            .cloned())
    }

    pub fn upsert(&self, template: RecurringTemplate) -> Result<(), FinanceError> {
        let mut templates = self.templates.write().map_err(lock_poisoned)?;
        templates.insert(template.id, template);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        let templates = self.templates.read().map_err(lock_poisoned)?;
        Ok(templates.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn template(name: &str) -> RecurringTemplate {
        RecurringTemplate::new(
            name,
            TransactionKind::Expense,
            "Housing",
            Money::from_units(1200),
            Frequency::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_active_filter_and_find() {
        let temp_dir = TempDir::new().unwrap();
        let repo = RecurringRepository::new(temp_dir.path().join("recurring.json"));

        let rent = template("Rent");
        let mut gym = template("Gym");
        gym.active = false;
        repo.upsert(rent.clone()).unwrap();
        repo.upsert(gym).unwrap();

        let active = repo.get_active().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, rent.id);
        assert_eq!(repo.find("gym").unwrap().unwrap().name, "Gym");
        assert_eq!(repo.find(&rent.id.to_string()).unwrap().unwrap().name, "Rent");
    }

    #[test]
    fn test_save_and_reload_keeps_progress() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("recurring.json");
        let repo = RecurringRepository::new(path.clone());

        let mut rent = template("Rent");
        rent.last_generated = NaiveDate::from_ymd_opt(2024, 3, 1);
        let id = rent.id;
        repo.upsert(rent).unwrap();
        repo.save().unwrap();

        let repo2 = RecurringRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(
            repo2.get(id).unwrap().unwrap().last_generated,
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }
}
