//! Recurring budget periods and the half-open date windows they produce.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

/// Half-open calendar window `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TrackerError> {
        if end <= start {
            return Err(TrackerError::InvalidInput(
                "window end must be after start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Recurrence unit over which a budget's spend accumulates before resetting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Day,
    Week,
    Month,
}

impl PeriodType {
    /// Returns the window of this period type that contains `date`.
    ///
    /// Weeks start on Monday. Only dates at the very edge of chrono's range
    /// have no window.
    pub fn window_containing(self, date: NaiveDate) -> Option<DateWindow> {
        let (start, end) = match self {
            PeriodType::Day => (date, date.succ_opt()?),
            PeriodType::Week => {
                let delta = date.weekday().num_days_from_monday() as i64;
                let start = date.checked_sub_signed(Duration::days(delta))?;
                (start, start.checked_add_signed(Duration::days(7))?)
            }
            PeriodType::Month => {
                let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
                (start, start.checked_add_months(Months::new(1))?)
            }
        };
        Some(DateWindow { start, end })
    }

    /// Abbreviation used on compact chart labels.
    pub fn short_label(self) -> &'static str {
        match self {
            PeriodType::Day => "Day",
            PeriodType::Week => "Wk",
            PeriodType::Month => "Mo",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PeriodType::Day => "day",
            PeriodType::Week => "week",
            PeriodType::Month => "month",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(PeriodType::Day),
            "week" => Ok(PeriodType::Week),
            "month" => Ok(PeriodType::Month),
            other => Err(TrackerError::InvalidInput(format!(
                "unknown period type `{}`",
                other
            ))),
        }
    }
}
