use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::CoreError;

use super::budget::BudgetLimit;

/// Savings target shown on the "Savings Progress" card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

impl Default for SavingsGoal {
    fn default() -> Self {
        Self {
            name: "Emergency fund".to_string(),
            target_amount: 5000.0,
            target_date: None,
        }
    }
}

/// Dashboard configuration. Loaded by the host and handed to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The currency all amounts are displayed in (e.g., "USD", "EUR", "PLN").
    pub currency: String,

    /// Spent/limit ratio at which a budget turns "near-limit".
    pub near_limit_threshold: f64,

    pub savings_goal: SavingsGoal,

    /// Monthly limits, in display order.
    pub budgets: Vec<BudgetLimit>,

    /// Category → color tag overrides for the spending chart.
    pub category_colors: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            near_limit_threshold: 0.8,
            savings_goal: SavingsGoal::default(),
            budgets: vec![
                BudgetLimit::new("Food", 900.0, "#FF6B6B"),
                BudgetLimit::new("Transport", 600.0, "#4ECDC4"),
                BudgetLimit::new("Entertainment", 300.0, "#45B7D1"),
                BudgetLimit::new("Shopping", 400.0, "#FFA07A"),
                BudgetLimit::new("Utilities", 350.0, "#98D8C8"),
            ],
            category_colors: HashMap::new(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    /// Load settings from a JSON file on disk.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every field the derivations depend on.
    pub fn validate(&self) -> Result<(), CoreError> {
        let code = self.currency.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{}': must be exactly 3 ASCII letters (e.g., USD, EUR, PLN)",
                self.currency
            )));
        }
        if !(self.near_limit_threshold > 0.0 && self.near_limit_threshold <= 1.0) {
            return Err(CoreError::ValidationError(format!(
                "Near-limit threshold must be in (0, 1], got {}",
                self.near_limit_threshold
            )));
        }
        if !self.savings_goal.target_amount.is_finite() || self.savings_goal.target_amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Savings goal '{}' must have a positive target",
                self.savings_goal.name
            )));
        }
        for budget in &self.budgets {
            if !budget.limit.is_finite() || budget.limit <= 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Budget '{}' limit must be positive, got {}",
                    budget.category, budget.limit
                )));
            }
        }
        Ok(())
    }
}
