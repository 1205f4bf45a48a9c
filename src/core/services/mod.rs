pub mod budget_service;
pub mod summary_service;

pub use budget_service::{BudgetChartRow, BudgetService, StatusCounts};
pub use summary_service::{CategoryTotal, DashboardTotals, ExpenseFilter, SummaryService};
