//! Recurring template service
//!
//! Templates are stored until a sweep turns their due occurrences into
//! transactions. Sweeps only happen when asked for, and each template
//! remembers the last date it produced so a second sweep adds nothing.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Frequency, Money, RecurringTemplate, Transaction, TransactionKind};
use crate::storage::Storage;

pub struct RecurringService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct CreateTemplateInput {
    pub name: String,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Outcome of a materialization sweep
#[derive(Debug, Clone, Default)]
pub struct SweepResult {
    /// Transactions created, in template then date order
    pub created: Vec<Transaction>,
    /// Number of active templates examined
    pub templates_checked: usize,
}

impl<'a> RecurringService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateTemplateInput) -> FinanceResult<RecurringTemplate> {
        let mut template = RecurringTemplate::new(
            input.name.trim(),
            input.kind,
            input.category.trim(),
            input.amount,
            input.frequency,
            input.start_date,
        );
        template.end_date = input.end_date;

        template
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.recurring.upsert(template.clone())?;
        self.storage.recurring.save()?;

        self.storage.log_create(
            EntityType::RecurringTemplate,
            template.id.to_string(),
            Some(template.name.clone()),
            &template,
        )?;

        Ok(template)
    }

    pub fn find(&self, identifier: &str) -> FinanceResult<RecurringTemplate> {
        self.storage
            .recurring
            .find(identifier)?
            .ok_or_else(|| FinanceError::template_not_found(identifier))
    }

    pub fn list(&self) -> FinanceResult<Vec<RecurringTemplate>> {
        self.storage.recurring.get_all()
    }

    /// Stop a template from producing further transactions
    pub fn deactivate(&self, identifier: &str) -> FinanceResult<RecurringTemplate> {
        let before = self.find(identifier)?;
        if !before.active {
            return Ok(before);
        }

        let mut template = before.clone();
        template.active = false;
        self.save_update(&before, &template)?;
        Ok(template)
    }

    /// Create every due occurrence up to and including `today`
    ///
    /// Each template's progress marker is saved before its batch of
    /// transactions, so an interrupted sweep can skip occurrences but never
    /// repeat them.
    pub fn materialize_due(&self, today: NaiveDate) -> FinanceResult<SweepResult> {
        let mut result = SweepResult::default();

        for before in self.storage.recurring.get_active()? {
            result.templates_checked += 1;

            let due = before.due_dates(today);
            let Some(&last) = due.last() else {
                continue;
            };

            let batch = due
                .into_iter()
                .map(|date| occurrence(&before, date))
                .collect::<FinanceResult<Vec<_>>>()?;

            let mut template = before.clone();
            template.last_generated = Some(last);
            self.storage.recurring.upsert(template.clone())?;
            self.storage.recurring.save()?;

            for txn in &batch {
                self.storage.transactions.insert(txn.clone())?;
            }
            self.storage.transactions.save()?;

            self.storage.log_update(
                EntityType::RecurringTemplate,
                template.id.to_string(),
                Some(template.name.clone()),
                &before,
                &template,
            )?;
            for txn in &batch {
                self.storage.log_create(
                    EntityType::Transaction,
                    txn.id.to_string(),
                    Some(format!("{} {}", txn.date, txn.category)),
                    txn,
                )?;
            }

            tracing::info!(
                template = %template.name,
                count = batch.len(),
                until = %last,
                "materialized recurring transactions"
            );
            result.created.extend(batch);
        }

        Ok(result)
    }

    fn save_update(
        &self,
        before: &RecurringTemplate,
        after: &RecurringTemplate,
    ) -> FinanceResult<()> {
        self.storage.recurring.upsert(after.clone())?;
        self.storage.recurring.save()?;
        self.storage.log_update(
            EntityType::RecurringTemplate,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
        )
    }
}

/// The transaction a template produces on `date`
fn occurrence(template: &RecurringTemplate, date: NaiveDate) -> FinanceResult<Transaction> {
    let mut txn = Transaction::new(date, template.kind, template.category.clone(), template.amount)
        .with_description(template.name.clone());
    txn.recurring_id = Some(template.id);
    txn.validate()
        .map_err(|e| FinanceError::Validation(e.to_string()))?;
    Ok(txn)
}
