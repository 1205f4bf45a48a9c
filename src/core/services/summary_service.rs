use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::Expense;

/// Headline figures shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    pub today: f64,
    pub month: f64,
    pub all_time: f64,
}

/// Total for one chart bucket (a category or a `YYYY-MM` month).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub value: f64,
}

/// Criteria for the expense log view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(date) = self.date {
            if expense.parsed_date() != Some(date) {
                return false;
            }
        }
        match self.category.as_deref() {
            Some(category) => expense.category_or_default() == category,
            None => true,
        }
    }
}

pub struct SummaryService;

impl SummaryService {
    pub fn dashboard_totals(expenses: &[Expense], today: NaiveDate) -> DashboardTotals {
        expenses
            .iter()
            .fold(DashboardTotals::default(), |mut totals, expense| {
                let amount = expense.amount_value();
                totals.all_time += amount;
                if let Some(date) = expense.parsed_date() {
                    if date == today {
                        totals.today += amount;
                    }
                    if date.year() == today.year() && date.month() == today.month() {
                        totals.month += amount;
                    }
                }
                totals
            })
    }

    /// Spend per category, largest first.
    pub fn totals_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
        let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
        for expense in expenses {
            *by_category.entry(expense.category_or_default()).or_default() +=
                expense.amount_value();
        }
        let mut totals: Vec<CategoryTotal> = by_category
            .into_iter()
            .map(|(name, value)| CategoryTotal {
                name: name.to_string(),
                value,
            })
            .collect();
        // Stable sort keeps equal totals in name order.
        totals.sort_by(|a, b| b.value.total_cmp(&a.value));
        totals
    }

    /// Spend per `YYYY-MM` month, oldest first. Undated expenses are skipped.
    pub fn totals_by_month(expenses: &[Expense]) -> Vec<CategoryTotal> {
        let mut by_month: BTreeMap<String, f64> = BTreeMap::new();
        for expense in expenses {
            let month: String = expense.date.chars().take(7).collect();
            if month.is_empty() {
                continue;
            }
            *by_month.entry(month).or_default() += expense.amount_value();
        }
        by_month
            .into_iter()
            .map(|(name, value)| CategoryTotal { name, value })
            .collect()
    }

    /// Spend per date string, in date order.
    pub fn daily_totals(expenses: &[Expense]) -> BTreeMap<String, f64> {
        let mut by_date = BTreeMap::new();
        for expense in expenses {
            *by_date.entry(expense.date.clone()).or_default() += expense.amount_value();
        }
        by_date
    }

    /// Expenses matching `filter`, newest first; same-day entries by id descending.
    pub fn filter_log<'e>(expenses: &'e [Expense], filter: &ExpenseFilter) -> Vec<&'e Expense> {
        let mut list: Vec<&Expense> = expenses
            .iter()
            .filter(|expense| filter.matches(expense))
            .collect();
        list.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.sort_key().cmp(a.sort_key()))
        });
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new("2026-02-15", "Food", "10").with_id("b"),
            Expense::new("2026-02-15", "Transport", "5").with_id("c"),
            Expense::new("2026-02-02", "Food", "20").with_id("a"),
            Expense::new("2026-01-20", "", "7.5").with_id("d"),
            Expense::new("2025-02-15", "Food", "100").with_id("e"),
            Expense::new("", "Food", "oops").with_id("f"),
        ]
    }

    #[test]
    fn dashboard_splits_today_month_and_all_time() {
        let totals = SummaryService::dashboard_totals(&sample(), date(2026, 2, 15));
        assert_eq!(totals.today, 15.0);
        assert_eq!(totals.month, 35.0);
        assert_eq!(totals.all_time, 142.5);
    }

    #[test]
    fn categories_sorted_by_total() {
        let totals = SummaryService::totals_by_category(&sample());
        let names: Vec<&str> = totals.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Other", "Transport"]);
        assert_eq!(totals[0].value, 130.0);
    }

    #[test]
    fn months_ascending_and_skip_undated() {
        let months = SummaryService::totals_by_month(&sample());
        let names: Vec<&str> = months.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["2025-02", "2026-01", "2026-02"]);
        assert_eq!(months[2].value, 35.0);
    }

    #[test]
    fn log_sorted_newest_first_with_id_tie_break() {
        let expenses = sample();
        let list = SummaryService::filter_log(&expenses, &ExpenseFilter::default());
        let ids: Vec<&str> = list.iter().map(|e| e.sort_key()).collect();
        assert_eq!(ids, vec!["c", "b", "a", "d", "e", "f"]);
    }

    #[test]
    fn log_filters_by_date_and_category() {
        let expenses = sample();
        let filter = ExpenseFilter {
            date: Some(date(2026, 2, 15)),
            category: Some("Food".into()),
        };
        let list = SummaryService::filter_log(&expenses, &filter);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].sort_key(), "b");

        let other = ExpenseFilter {
            date: None,
            category: Some("Other".into()),
        };
        assert_eq!(SummaryService::filter_log(&expenses, &other).len(), 1);
    }

    #[test]
    fn daily_totals_group_by_date() {
        let totals = SummaryService::daily_totals(&sample());
        assert_eq!(totals.get("2026-02-15"), Some(&15.0));
        assert_eq!(totals.get(""), Some(&0.0));
    }
}
