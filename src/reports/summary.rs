//! Totals, category breakdown and monthly trend
//!
//! Pure aggregations over a slice of transactions. Every figure is summed in
//! integer cents, so `net_worth == total_income - total_expenses` holds
//! exactly.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Money, Month, Transaction, TransactionKind};

/// Income, expenses and their difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FinancialSummary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_worth: Money,
    pub transaction_count: usize,
}

impl FinancialSummary {
    pub fn from_transactions<'t, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'t Transaction>,
    {
        let mut summary = Self::default();
        for txn in transactions {
            match txn.kind {
                TransactionKind::Income => summary.total_income += txn.amount,
                TransactionKind::Expense => summary.total_expenses += txn.amount,
            }
            summary.transaction_count += 1;
        }
        summary.net_worth = summary.total_income - summary.total_expenses;
        summary
    }

    /// Share of income left after expenses; `None` without income
    pub fn savings_rate(&self) -> Option<f64> {
        self.total_income
            .is_positive()
            .then(|| self.net_worth.as_f64() / self.total_income.as_f64())
    }

    pub fn format_terminal(&self) -> String {
        format!(
            "Total Income:    {:>14}\nTotal Expenses:  {:>14}\nNet Worth:       {:>14}\n",
            self.total_income, self.total_expenses, self.net_worth
        )
    }
}

/// Spending in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
    pub count: usize,
    /// Share of all spending in the breakdown
    pub percentage: f64,
}

/// Sum expenses per category, largest first
///
/// Category names are grouped case-insensitively; the first spelling seen
/// is kept. Ties are ordered by name.
pub fn category_totals<'t, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'t Transaction>,
{
    let mut by_key: HashMap<String, CategoryTotal> = HashMap::new();
    let mut total = Money::zero();

    for txn in transactions.into_iter().filter(|t| t.is_expense()) {
        let entry = by_key
            .entry(txn.category.trim().to_lowercase())
            .or_insert_with(|| CategoryTotal {
                category: txn.category.trim().to_string(),
                amount: Money::zero(),
                count: 0,
                percentage: 0.0,
            });
        entry.amount += txn.amount;
        entry.count += 1;
        total += txn.amount;
    }

    let mut totals: Vec<_> = by_key
        .into_values()
        .map(|mut t| {
            t.percentage = t.amount.percent_of(total);
            t
        })
        .collect();
    totals.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    totals
}

/// Expense breakdown for one calendar month
pub fn category_breakdown(transactions: &[Transaction], month: Month) -> Vec<CategoryTotal> {
    category_totals(transactions.iter().filter(|t| month.contains(t.date)))
}

/// Income and expenses for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyPoint {
    pub month: Month,
    pub income: Money,
    pub expenses: Money,
}

impl MonthlyPoint {
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// Income and expense series keyed by month
///
/// The timeline holds every month that has at least one transaction of
/// either kind, in chronological order. A month present in only one series
/// shows zero for the other.
#[derive(Debug, Clone, Default)]
pub struct MonthlyTrend {
    pub points: Vec<MonthlyPoint>,
}

impl MonthlyTrend {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut months: BTreeMap<Month, (Money, Money)> = BTreeMap::new();

        for txn in transactions {
            let entry = months.entry(Month::of(txn.date)).or_default();
            match txn.kind {
                TransactionKind::Income => entry.0 += txn.amount,
                TransactionKind::Expense => entry.1 += txn.amount,
            }
        }

        Self {
            points: months
                .into_iter()
                .map(|(month, (income, expenses))| MonthlyPoint {
                    month,
                    income,
                    expenses,
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The income series alone
    pub fn income(&self) -> BTreeMap<Month, Money> {
        self.points.iter().map(|p| (p.month, p.income)).collect()
    }

    /// The expense series alone
    pub fn expenses(&self) -> BTreeMap<Month, Money> {
        self.points.iter().map(|p| (p.month, p.expenses)).collect()
    }

    pub fn format_terminal(&self) -> String {
        let mut output = format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            "Month", "Income", "Expenses", "Net"
        );
        output.push_str(&"-".repeat(55));
        output.push('\n');

        for point in &self.points {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14}\n",
                point.month,
                point.income,
                point.expenses,
                point.net()
            ));
        }
        output
    }
}
