//! Budget progress over the current period and the chart data derived from it.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{
    amount, BudgetDefinition, BudgetProgress, BudgetState, DateWindow, Displayable, Expense,
};

/// Expense reduced to the fields the progress engine reads.
struct DatedAmount<'e> {
    date: NaiveDate,
    category: &'e str,
    amount: f64,
}

/// Number of budgets in each state.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub ok: usize,
    pub near: usize,
    pub over: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.ok + self.near + self.over
    }

    /// Non-empty buckets in display order, for the status chart.
    pub fn non_empty(&self) -> Vec<(BudgetState, usize)> {
        [
            (BudgetState::Ok, self.ok),
            (BudgetState::Near, self.near),
            (BudgetState::Over, self.over),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}

/// One bar of the budget-vs-spent chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetChartRow {
    pub name: String,
    pub full_name: String,
    pub limit: f64,
    pub spent: f64,
    pub over: f64,
    pub state: BudgetState,
}

/// Stateless budgeting utilities that operate over expense snapshots.
pub struct BudgetService;

impl BudgetService {
    /// Computes each budget's spend in the period containing `today`.
    ///
    /// One entry per budget, in input order. Expenses without a valid date
    /// never match a window; unparsable amounts count as zero.
    pub fn compute_progress<'b>(
        expenses: &[Expense],
        budgets: &'b [BudgetDefinition],
        today: NaiveDate,
    ) -> Vec<BudgetProgress<'b>> {
        let dated = Self::dated_amounts(expenses);
        budgets
            .iter()
            .map(|budget| {
                let spent = match budget.period_type.window_containing(today) {
                    Some(window) => Self::spent_in(&dated, budget, window),
                    None => {
                        warn!(%today, period = %budget.period_type, "no period window for date");
                        0.0
                    }
                };
                BudgetProgress::new(budget, spent)
            })
            .collect()
    }

    /// Same as [`BudgetService::compute_progress`], using the local date of `now`.
    pub fn compute_progress_at<'b, Tz: TimeZone>(
        expenses: &[Expense],
        budgets: &'b [BudgetDefinition],
        now: &DateTime<Tz>,
    ) -> Vec<BudgetProgress<'b>> {
        Self::compute_progress(expenses, budgets, now.date_naive())
    }

    /// Sum of the expenses counted by `budget` inside `window`.
    pub fn spent_in_window(
        expenses: &[Expense],
        budget: &BudgetDefinition,
        window: DateWindow,
    ) -> f64 {
        Self::spent_in(&Self::dated_amounts(expenses), budget, window)
    }

    pub fn status_counts(progress: &[BudgetProgress<'_>]) -> StatusCounts {
        progress
            .iter()
            .fold(StatusCounts::default(), |mut counts, entry| {
                match entry.state {
                    BudgetState::Ok => counts.ok += 1,
                    BudgetState::Near => counts.near += 1,
                    BudgetState::Over => counts.over += 1,
                }
                counts
            })
    }

    pub fn chart_rows(progress: &[BudgetProgress<'_>]) -> Vec<BudgetChartRow> {
        progress
            .iter()
            .map(|entry| BudgetChartRow {
                name: entry.label(),
                full_name: entry.budget.display_label(),
                limit: entry.budget.amount,
                spent: entry.spent,
                over: entry.overage(),
                state: entry.state,
            })
            .collect()
    }

    fn dated_amounts(expenses: &[Expense]) -> Vec<DatedAmount<'_>> {
        let dated: Vec<DatedAmount<'_>> = expenses
            .iter()
            .filter_map(|expense| {
                expense.parsed_date().map(|date| DatedAmount {
                    date,
                    category: expense.category_or_default(),
                    amount: expense.amount_value(),
                })
            })
            .collect();
        let skipped = expenses.len() - dated.len();
        if skipped > 0 {
            debug!(skipped, "expenses without a valid date excluded from budgets");
        }
        dated
    }

    fn spent_in(dated: &[DatedAmount<'_>], budget: &BudgetDefinition, window: DateWindow) -> f64 {
        amount::sum(
            dated
                .iter()
                .filter(|entry| window.contains(entry.date))
                .filter(|entry| budget.matches_category(entry.category))
                .map(|entry| entry.amount),
        )
    }
}
