//! Financial goal repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{FinancialGoal, GoalId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_poisoned;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct FinancialGoalData {
    goals: Vec<FinancialGoal>,
}

pub struct FinancialGoalRepository {
    path: PathBuf,
    goals: RwLock<HashMap<GoalId, FinancialGoal>>,
}

impl FinancialGoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            goals: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: FinancialGoalData = read_json(&self.path)?;
        let mut goals = self.goals.write().map_err(lock_poisoned)?;

        goals.clear();
        goals.extend(file_data.goals.into_iter().map(|g| (g.id, g)));

        tracing::debug!(count = goals.len(), "loaded financial goals");
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let goals = self.get_all()?;
        write_json_atomic(&self.path, &FinancialGoalData { goals })
    }

    pub fn get(&self, id: GoalId) -> Result<Option<FinancialGoal>, FinanceError> {
        let goals = self.goals.read().map_err(lock_poisoned)?;
        Ok(goals.get(&id).cloned())
    }

    /// All goals in creation order
    pub fn get_all(&self) -> Result<Vec<FinancialGoal>, FinanceError> {
        let goals = self.goals.read().map_err(lock_poisoned)?;

        let mut list: Vec<_> = goals.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        Ok(list)
    }

    /// Look a goal up by id (full or short form) or by exact name, ignoring case
    pub fn find(&self, identifier: &str) -> Result<Option<FinancialGoal>, FinanceError> {
        let goals = self.goals.read().map_err(lock_poisoned)?;
        let identifier = identifier.trim();

        Ok(goals
            .values()
            .find(|g| g.id.matches(identifier))
            .or_else(|| {
                goals
                    .values()
                    .find(|g| g.name.eq_ignore_ascii_case(identifier))
            })
            .cloned())
    }

    pub fn upsert(&self, goal: FinancialGoal) -> Result<(), FinanceError> {
        let mut goals = self.goals.write().map_err(lock_poisoned)?;
        goals.insert(goal.id, goal);
        Ok(())
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
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn goal(name: &str) -> FinancialGoal {
        FinancialGoal::new(
            name,
            Money::from_units(1000),
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_find_by_id_or_name() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FinancialGoalRepository::new(temp_dir.path().join("financial_goals.json"));

        let vacation = goal("Vacation");
        let id = vacation.id;
        repo.upsert(vacation).unwrap();
        repo.upsert(goal("Car")).unwrap();

        assert_eq!(repo.find("vacation").unwrap().unwrap().id, id);
        assert_eq!(repo.find(&id.to_string()).unwrap().unwrap().id, id);
        assert!(repo.find("House").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("financial_goals.json");
        let repo = FinancialGoalRepository::new(path.clone());

        let mut car = goal("Car");
        car.current_amount = Money::from_units(250);
        let id = car.id;
        repo.upsert(car).unwrap();
        repo.save().unwrap();

        let repo2 = FinancialGoalRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(
            repo2.get(id).unwrap().unwrap().current_amount,
            Money::from_units(250)
        );
    }
}
