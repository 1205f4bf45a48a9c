//! Expense records as delivered by the backend store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    amount::{self, parse_amount},
    common::DEFAULT_CATEGORY,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single logged expense.
///
/// Fields keep the loose shape of the stored row; the engines read them through
/// the accessor methods, which never fail.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(
        default,
        deserialize_with = "amount::deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "amount::deserialize_raw")]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "amount::deserialize_raw")]
    pub amount: String,
    #[serde(default, deserialize_with = "amount::deserialize_raw")]
    pub description: String,
    #[serde(default, deserialize_with = "amount::deserialize_raw")]
    pub payment_method: String,
    #[serde(default, deserialize_with = "amount::deserialize_raw")]
    pub notes: String,
}

impl Expense {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            category: Some(category.into()),
            amount: amount.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Category label, with empty or missing values reported as `"Other"`.
    pub fn category_or_default(&self) -> &str {
        match self.category.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => DEFAULT_CATEGORY,
        }
    }

    /// Parsed amount; malformed values count as zero.
    pub fn amount_value(&self) -> f64 {
        parse_amount(&self.amount)
    }

    /// Calendar date of the expense, if it is a valid `YYYY-MM-DD` string.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Identifier used for ordering ties; missing ids sort as the empty string.
    pub fn sort_key(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}
