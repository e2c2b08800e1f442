//! Spending Report
//!
//! Expense analysis for a report window ending today: daily series,
//! category totals and headline statistics.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use chrono::NaiveDate;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, ReportPeriod, Transaction};
use crate::storage::Storage;

use super::summary::{category_totals, CategoryTotal};

/// Number of tags listed in the report
pub const TOP_TAGS: usize = 5;

/// Spending Report
#[derive(Debug, Clone)]
pub struct SpendingReport {
    pub period: ReportPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Expense total per day that had any spending
    pub daily: BTreeMap<NaiveDate, Money>,
    /// Largest category first
    pub categories: Vec<CategoryTotal>,
    pub total_spending: Money,
    /// Number of expense transactions in the window
    pub expense_count: usize,
    /// Most used tags with their counts
    pub top_tags: Vec<(String, usize)>,
}

impl SpendingReport {
    /// Generate a report over stored transactions
    pub fn generate(
        storage: &Storage,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> FinanceResult<Self> {
        let earliest = storage.transactions.earliest_date()?;
        let start_date = period.start_date(today, earliest);
        let transactions = storage.transactions.get_by_date_range(start_date, today)?;
        Ok(Self::from_transactions(&transactions, period, start_date, today))
    }

    /// Build the report from transactions dated in `start_date..=end_date`
    pub fn from_transactions(
        transactions: &[Transaction],
        period: ReportPeriod,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        let expenses: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.is_expense() && t.date >= start_date && t.date <= end_date)
            .collect();

        let mut daily: BTreeMap<NaiveDate, Money> = BTreeMap::new();
        let mut tag_counts: HashMap<&str, usize> = HashMap::new();
        for txn in &expenses {
            *daily.entry(txn.date).or_default() += txn.amount;
            for tag in &txn.tags {
                *tag_counts.entry(tag.as_str()).or_default() += 1;
            }
        }

        let mut top_tags: Vec<(String, usize)> = tag_counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        top_tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_tags.truncate(TOP_TAGS);

        Self {
            period,
            start_date,
            end_date,
            total_spending: expenses.iter().map(|t| t.amount).sum(),
            expense_count: expenses.len(),
            categories: category_totals(expenses.iter().copied()),
            daily,
            top_tags,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expense_count == 0
    }

    /// Mean over the days that had spending
    pub fn average_daily(&self) -> Money {
        average(self.total_spending, self.daily.len())
    }

    /// The day with the largest total; earliest wins a tie
    pub fn highest_day(&self) -> Option<(NaiveDate, Money)> {
        self.daily
            .iter()
            .fold(None, |best: Option<(NaiveDate, Money)>, (&date, &amount)| match best {
                Some((_, top)) if top >= amount => best,
                _ => Some((date, amount)),
            })
    }

    pub fn most_expensive_category(&self) -> Option<&CategoryTotal> {
        self.categories.first()
    }

    pub fn average_expense(&self) -> Money {
        average(self.total_spending, self.expense_count)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending Report: {} ({} to {})\n",
            self.period, self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No expense data available for the selected period.\n");
            return output;
        }

        output.push_str(&format!("Total Spending:          {}\n", self.total_spending));
        output.push_str(&format!("Number of Expenses:      {}\n", self.expense_count));
        output.push_str(&format!("Average Expense:         {}\n", self.average_expense()));
        output.push_str(&format!("Average Daily Spending:  {}\n", self.average_daily()));
        if let Some((date, amount)) = self.highest_day() {
            output.push_str(&format!("Highest Spending Day:    {} ({})\n", amount, date));
        }
        if let Some(top) = self.most_expensive_category() {
            output.push_str(&format!("Most Expensive Category: {}\n", top.category));
        }
        output.push('\n');

        output.push_str(&format!(
            "{:<35} {:>12} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');
        for category in &self.categories {
            output.push_str(&format!(
                "{:<35} {:>12} {:>8} {:>7.1}%\n",
                category.category, category.amount, category.count, category.percentage
            ));
        }

        if !self.top_tags.is_empty() {
            let tags: Vec<_> = self.top_tags.iter().map(|(tag, _)| tag.as_str()).collect();
            output.push_str(&format!("\nMost used tags: {}\n", tags.join(", ")));
        }

        output
    }

    /// Export the daily series as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> FinanceResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["date", "amount"])?;
        for (date, amount) in &self.daily {
            csv.write_record([date.to_string(), format!("{:.2}", amount.as_f64())])?;
        }
        csv.flush().map_err(|e| FinanceError::Export(e.to_string()))?;
        Ok(())
    }
}

fn average(total: Money, count: usize) -> Money {
    if count == 0 {
        return Money::zero();
    }
    Money::from_cents((total.cents() as f64 / count as f64).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinTrackPaths;
    use crate::models::TransactionKind;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(d: NaiveDate, category: &str, units: i64, tags: &[&str]) -> Transaction {
        Transaction::new(d, TransactionKind::Expense, category, Money::from_units(units))
            .with_tags(tags.iter().copied())
    }

    fn sample() -> Vec<Transaction> {
        vec![
            expense(date(2024, 3, 1), "Food", 40, &["groceries"]),
            expense(date(2024, 3, 1), "Transport", 20, &["commute"]),
            expense(date(2024, 3, 10), "Food", 100, &["groceries", "party"]),
            expense(date(2023, 1, 1), "Housing", 900, &[]),
            Transaction::new(
                date(2024, 3, 5),
                TransactionKind::Income,
                "Salary",
                Money::from_units(3000),
            ),
        ]
    }

    #[test]
    fn test_report_statistics() {
        let report = SpendingReport::from_transactions(
            &sample(),
            ReportPeriod::LastMonth,
            date(2024, 2, 15),
            date(2024, 3, 16),
        );

        assert_eq!(report.expense_count, 3);
        assert_eq!(report.total_spending, Money::from_units(160));
        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.average_daily(), Money::from_units(80));
        assert_eq!(report.highest_day(), Some((date(2024, 3, 10), Money::from_units(100))));
        assert_eq!(report.most_expensive_category().unwrap().category, "Food");
        assert_eq!(report.top_tags[0], ("groceries".to_string(), 2));
        assert_eq!(report.top_tags.len(), 3);
    }

    #[test]
    fn test_empty_report() {
        let report = SpendingReport::from_transactions(
            &[],
            ReportPeriod::AllTime,
            date(2024, 1, 1),
            date(2024, 1, 1),
        );
        assert!(report.is_empty());
        assert_eq!(report.average_daily(), Money::zero());
        assert_eq!(report.highest_day(), None);
        assert!(report.format_terminal().contains("No expense data"));
    }

    #[test]
    fn test_generate_all_time_reaches_earliest() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        for txn in sample() {
            storage.transactions.insert(txn).unwrap();
        }

        let report =
            SpendingReport::generate(&storage, ReportPeriod::AllTime, date(2024, 3, 16)).unwrap();
        assert_eq!(report.start_date, date(2023, 1, 1));
        assert_eq!(report.expense_count, 4);

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert!(csv.starts_with("date,amount\n"));
        assert!(csv.contains("2023-01-01,900.00"));
    }
}
