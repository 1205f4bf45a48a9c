//! Records consumed by the engines and the aggregates they produce.

pub mod amount;
pub mod budget;
pub mod common;
pub mod expense;
pub mod period;

pub use amount::parse_amount;
pub use budget::{BudgetDefinition, BudgetProgress, BudgetScope, BudgetState, NEAR_LIMIT_RATIO};
pub use common::{Displayable, DEFAULT_CATEGORY};
pub use expense::Expense;
pub use period::{DateWindow, PeriodType};
