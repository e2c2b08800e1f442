//! Financial goal service
//!
//! Goals are created once; afterwards only the saved amount and the status
//! change. Progress is entered by hand.

use chrono::{NaiveDate, NaiveTime};

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{FinancialGoal, GoalStatus, Money};
use crate::storage::Storage;

pub struct GoalService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    pub name: String,
    pub target_amount: Money,
    pub target_date: NaiveDate,
    pub current_amount: Money,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a goal; the target date may not lie before `today`
    pub fn create(&self, input: CreateGoalInput, today: NaiveDate) -> FinanceResult<FinancialGoal> {
        let name = input.name.trim();

        if self.storage.financial_goals.find(name)?.is_some() {
            return Err(FinanceError::Duplicate {
                entity_type: "Financial goal",
                identifier: name.to_string(),
            });
        }

        let mut goal = FinancialGoal::new(name, input.target_amount, input.target_date);
        goal.current_amount = input.current_amount;
        // Elapsed days are measured from the caller's today
        goal.created_at = today.and_time(NaiveTime::MIN).and_utc();
        goal.validate_new(today)
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.financial_goals.upsert(goal.clone())?;
        self.storage.financial_goals.save()?;

        self.storage.log_create(
            EntityType::FinancialGoal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &goal,
        )?;

        Ok(goal)
    }

    /// Find a goal by id or name
    pub fn find(&self, identifier: &str) -> FinanceResult<FinancialGoal> {
        self.storage
            .financial_goals
            .find(identifier)?
            .ok_or_else(|| FinanceError::goal_not_found(identifier))
    }

    pub fn list(&self) -> FinanceResult<Vec<FinancialGoal>> {
        self.storage.financial_goals.get_all()
    }

    pub fn active(&self) -> FinanceResult<Vec<FinancialGoal>> {
        let mut goals = self.list()?;
        goals.retain(FinancialGoal::is_active);
        Ok(goals)
    }

    /// Record how much has been saved so far
    pub fn update_progress(&self, identifier: &str, amount: Money) -> FinanceResult<FinancialGoal> {
        let before = self.find(identifier)?;
        let mut goal = before.clone();
        goal.current_amount = amount;
        goal.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.save_update(&before, &goal)?;
        Ok(goal)
    }

    pub fn set_status(&self, identifier: &str, status: GoalStatus) -> FinanceResult<FinancialGoal> {
        let before = self.find(identifier)?;
        if before.status == status {
            return Ok(before);
        }

        let mut goal = before.clone();
        goal.status = status;
        self.save_update(&before, &goal)?;
        Ok(goal)
    }

    fn save_update(&self, before: &FinancialGoal, after: &FinancialGoal) -> FinanceResult<()> {
        self.storage.financial_goals.upsert(after.clone())?;
        self.storage.financial_goals.save()?;
        self.storage.log_update(
            EntityType::FinancialGoal,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
        )
    }
}
