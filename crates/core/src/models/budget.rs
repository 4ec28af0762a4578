use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Traffic-light classification of a budget line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    OnTrack,
    NearLimit,
    OverBudget,
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetStatus::OnTrack => write!(f, "on-track"),
            BudgetStatus::NearLimit => write!(f, "near-limit"),
            BudgetStatus::OverBudget => write!(f, "over-budget"),
        }
    }
}

/// A configured spending cap for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub category: String,
    pub limit: f64,
    pub color: String,
}

impl BudgetLimit {
    pub fn new(category: impl Into<String>, limit: f64, color: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            limit,
            color: color.into(),
        }
    }
}

/// Spending in a category measured against its limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,

    /// Amount spent so far (non-negative)
    pub spent: f64,

    /// Spending cap (positive)
    pub limit: f64,

    pub color: String,
}

impl Budget {
    /// Create a budget, rejecting negative spend and non-positive limits.
    pub fn new(
        category: impl Into<String>,
        spent: f64,
        limit: f64,
        color: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let category = category.into();
        if !spent.is_finite() || spent < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Budget '{category}' spent amount must be a non-negative number, got {spent}"
            )));
        }
        if !limit.is_finite() || limit <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Budget '{category}' limit must be positive, got {limit}"
            )));
        }
        Ok(Self {
            category,
            spent,
            limit,
            color: color.into(),
        })
    }
}

/// A budget after evaluation: everything a progress bar needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    pub color: String,
    pub status: BudgetStatus,

    /// `limit - spent`; negative once over budget
    pub remaining: f64,

    /// Uncapped spent/limit × 100
    pub percentage: f64,

    /// Primary bar width, capped at 100
    pub fill_pct: f64,

    /// Portion beyond 100%, drawn as a separate overflow indicator
    pub overflow_pct: f64,

    /// Human text for the remaining amount, e.g. "$60 left" or "Over limit by $40"
    pub remaining_label: String,
}
