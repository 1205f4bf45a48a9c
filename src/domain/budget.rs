//! Budget definitions and the progress derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{amount, common::Displayable, period::PeriodType};

/// Share of the limit at which a budget is reported as near its limit.
pub const NEAR_LIMIT_RATIO: f64 = 0.8;

/// Whether a budget applies to total spending or to one category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BudgetScope {
    Overall,
    Category,
}

/// A spending limit over a recurring period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDefinition {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub scope: BudgetScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub period_type: PeriodType,
    #[serde(default, deserialize_with = "amount::deserialize_value")]
    pub amount: f64,
}

impl BudgetDefinition {
    pub fn overall(period_type: PeriodType, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            scope: BudgetScope::Overall,
            category: None,
            period_type,
            amount,
        }
    }

    pub fn for_category(
        category: impl Into<String>,
        period_type: PeriodType,
        amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            scope: BudgetScope::Category,
            category: Some(category.into()),
            period_type,
            amount,
        }
    }

    /// Scope name as shown to users: `Overall`, the category, or `Category` when unnamed.
    pub fn scope_label(&self) -> &str {
        match self.scope {
            BudgetScope::Overall => "Overall",
            BudgetScope::Category => match self.category.as_deref() {
                Some(name) if !name.is_empty() => name,
                _ => "Category",
            },
        }
    }

    /// True when an expense in `category` counts toward this budget.
    pub fn matches_category(&self, category: &str) -> bool {
        match self.scope {
            BudgetScope::Overall => true,
            BudgetScope::Category => self.category.as_deref() == Some(category),
        }
    }
}

impl Displayable for BudgetDefinition {
    fn display_label(&self) -> String {
        format!("{} · {}", self.scope_label(), self.period_type)
    }
}

/// Health of a budget in its current period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BudgetState {
    Ok,
    Near,
    Over,
}

impl BudgetState {
    /// Classifies spend against a limit.
    ///
    /// `over` once spend exceeds the limit; reaching it exactly is still `near`.
    /// A zero or negative limit has no near band.
    pub fn classify(spent: f64, limit: f64) -> Self {
        if spent > limit {
            BudgetState::Over
        } else if limit > 0.0 && spent >= limit * NEAR_LIMIT_RATIO {
            BudgetState::Near
        } else {
            BudgetState::Ok
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BudgetState::Ok => "On track",
            BudgetState::Near => "Near limit",
            BudgetState::Over => "Over budget",
        }
    }
}

impl fmt::Display for BudgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Spend of one budget over its current period.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BudgetProgress<'a> {
    pub budget: &'a BudgetDefinition,
    pub spent: f64,
    pub state: BudgetState,
}

impl<'a> BudgetProgress<'a> {
    pub fn new(budget: &'a BudgetDefinition, spent: f64) -> Self {
        Self {
            budget,
            spent,
            state: BudgetState::classify(spent, budget.amount),
        }
    }

    /// Compact chart label such as `Overall (Mo)` or `Food (Wk)`.
    pub fn label(&self) -> String {
        format!(
            "{} ({})",
            self.budget.scope_label(),
            self.budget.period_type.short_label()
        )
    }

    /// Amount spent beyond the limit, zero unless over budget.
    pub fn overage(&self) -> f64 {
        match self.state {
            BudgetState::Over => self.spent - self.budget.amount,
            _ => 0.0,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.budget.amount - self.spent
    }
}
