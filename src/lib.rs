#![doc(test(attr(deny(warnings))))]

//! Expense Core holds the pure aggregation engines behind the expense tracker:
//! budget progress over the current period and the day-cycle slot used to
//! theme the client by time of day.

pub mod config;
pub mod core;
pub mod daycycle;
pub mod domain;
pub mod errors;
pub mod utils;

pub use crate::core::services::{BudgetService, SummaryService};
pub use daycycle::{slot_from_hour, slot_from_sun_times, Slot, SunTimes};
pub use domain::{BudgetDefinition, BudgetProgress, BudgetState, Expense};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}
