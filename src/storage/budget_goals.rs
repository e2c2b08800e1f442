//! Budget goal repository for JSON storage
//!
//! One goal per category, keyed case-insensitively by category name.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::BudgetGoal;

use super::file_io::{read_json, write_json_atomic};
use super::lock_poisoned;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetGoalData {
    #[serde(default)]
    goals: Vec<BudgetGoal>,
}

pub struct BudgetGoalRepository {
    path: PathBuf,
    goals: RwLock<HashMap<String, BudgetGoal>>,
}

impl BudgetGoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            goals: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: BudgetGoalData = read_json(&self.path)?;
        let mut goals = self.goals.write().map_err(lock_poisoned)?;

        goals.clear();
        for goal in file_data.goals {
            // A later duplicate wins, same as a second upsert would
            goals.insert(goal.key(), goal);
        }

        tracing::debug!(count = goals.len(), "loaded budget goals");
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let goals = self.get_all()?;
        write_json_atomic(&self.path, &BudgetGoalData { goals })
    }

    pub fn get(&self, category: &str) -> Result<Option<BudgetGoal>, FinanceError> {
        let goals = self.goals.read().map_err(lock_poisoned)?;
        Ok(goals.get(&category.trim().to_lowercase()).cloned())
    }

    /// All goals ordered by category name
    pub fn get_all(&self) -> Result<Vec<BudgetGoal>, FinanceError> {
        let goals = self.goals.read().map_err(lock_poisoned)?;

        let mut list: Vec<_> = goals.values().cloned().collect();
        list.sort_by_key(|g| g.key());
        Ok(list)
    }

    /// Insert or replace the goal for a category, returning the replaced one
    pub fn upsert(&self, goal: BudgetGoal) -> Result<Option<BudgetGoal>, FinanceError> {
        let mut goals = self.goals.write().map_err(lock_poisoned)?;
        Ok(goals.insert(goal.key(), goal))
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        let goals = self.goals.read().map_err(lock_poisoned)?;
        Ok(goals.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetGoalRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetGoalRepository::new(temp_dir.path().join("budget_goals.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_replaces_existing_category() {
        let (_temp_dir, repo) = create_test_repo();

        let first = repo
            .upsert(BudgetGoal::monthly("Food", Money::from_units(300)))
            .unwrap();
        assert!(first.is_none());

        let replaced = repo
            .upsert(BudgetGoal::monthly("food", Money::from_units(400)))
            .unwrap();
        assert_eq!(replaced.unwrap().amount, Money::from_units(300));

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(
            repo.get("FOOD").unwrap().unwrap().amount,
            Money::from_units(400)
        );
    }

    #[test]
    fn test_save_and_reload_sorted() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert(BudgetGoal::monthly("Transport", Money::from_units(100)))
            .unwrap();
        repo.upsert(BudgetGoal::monthly("Food", Money::from_units(400)))
            .unwrap();
        repo.save().unwrap();

        let repo2 = BudgetGoalRepository::new(temp_dir.path().join("budget_goals.json"));
        repo2.load().unwrap();

        let names: Vec<_> = repo2
            .get_all()
            .unwrap()
            .into_iter()
            .map(|g| g.category)
            .collect();
        assert_eq!(names, ["Food", "Transport"]);
    }
}
