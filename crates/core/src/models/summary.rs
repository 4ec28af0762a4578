use serde::{Deserialize, Serialize};

use super::budget::BudgetLine;
use super::spending::CategorySegment;

/// Headline numbers for the summary cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Sum of positive amounts
    pub total_income: f64,

    /// Sum of absolute negative amounts
    pub total_expenses: f64,

    /// `total_income - total_expenses`
    pub net_cash_flow: f64,

    /// Sum of budget limits minus sum of budget spend; negative when over overall
    pub budget_remaining: f64,

    /// Overall budget usage, 0–∞ (0 when no budgets are configured)
    pub budget_used_pct: f64,

    /// Net cash flow toward the savings goal, clamped to 0–100
    pub savings_progress_pct: f64,

    pub savings_goal_name: String,
    pub savings_goal_target: f64,
}

/// Owned copy of the derived figures handed to the insight generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub currency: String,
    pub summary: FinancialSummary,
    pub spending: Vec<CategorySegment>,
    pub budgets: Vec<BudgetLine>,
}
