//! Budget goal service
//!
//! Setting a goal for a category that already has one replaces it.

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetGoal, Money};
use crate::storage::Storage;

pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create or replace the monthly goal for `category`
    pub fn set_goal(&self, category: &str, amount: Money) -> FinanceResult<BudgetGoal> {
        let category = category.trim();

        // Keep the spelling of a known category
        let category = match self.storage.categories.get_by_name(category)? {
            Some(known) => known.name,
            None => category.to_string(),
        };

        let goal = BudgetGoal::monthly(category, amount);
        goal.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let previous = self.storage.budget_goals.upsert(goal.clone())?;
        self.storage.budget_goals.save()?;

        match previous {
            Some(before) => self.storage.log_update(
                EntityType::BudgetGoal,
                goal.key(),
                Some(goal.category.clone()),
                &before,
                &goal,
            )?,
            None => self.storage.log_create(
                EntityType::BudgetGoal,
                goal.key(),
                Some(goal.category.clone()),
                &goal,
            )?,
        }

        Ok(goal)
    }

    pub fn get_goal(&self, category: &str) -> FinanceResult<BudgetGoal> {
        self.storage
            .budget_goals
            .get(category)?
            .ok_or_else(|| FinanceError::budget_goal_not_found(category))
    }

    /// All goals ordered by category
    pub fn list(&self) -> FinanceResult<Vec<BudgetGoal>> {
        self.storage.budget_goals.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::FinTrackPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_set_goal_upserts() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.set_goal("food", Money::from_units(300)).unwrap();
        let goal = service.set_goal("Food", Money::from_units(400)).unwrap();

        assert_eq!(goal.category, "Food");
        assert_eq!(service.list().unwrap().len(), 1);
        assert_eq!(
            service.get_goal("FOOD").unwrap().amount,
            Money::from_units(400)
        );

        let ops: Vec<_> = storage
            .audit()
            .read_all()
            .unwrap()
            .into_iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(ops, [Operation::Create, Operation::Update]);
    }

    #[test]
    fn test_set_goal_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        assert!(service
            .set_goal("Food", Money::zero())
            .unwrap_err()
            .is_validation());
        assert!(service
            .set_goal("  ", Money::from_units(5))
            .unwrap_err()
            .is_validation());
        assert!(service.get_goal("Food").unwrap_err().is_not_found());
    }
}
