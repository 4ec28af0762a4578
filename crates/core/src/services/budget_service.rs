use crate::models::budget::{Budget, BudgetLimit, BudgetLine, BudgetStatus};
use crate::models::spending::CategorySpend;
use crate::services::format_service;

/// Default spent/limit ratio at which a budget is flagged "near-limit".
pub const DEFAULT_NEAR_LIMIT_THRESHOLD: f64 = 0.8;

/// Evaluates budgets against spending: status tier, remaining amount, bar widths.
///
/// Both tier boundaries are inclusive: spending exactly the threshold share
/// of the limit is near-limit, spending exactly the limit is over budget.
pub struct BudgetService {
    near_limit_threshold: f64,
}

impl BudgetService {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_NEAR_LIMIT_THRESHOLD)
    }

    pub fn with_threshold(near_limit_threshold: f64) -> Self {
        Self {
            near_limit_threshold,
        }
    }

    /// One budget per configured limit, in configured order.
    /// `spent` is taken from the matching category's spending, or 0.
    pub fn build_budgets(&self, spending: &[CategorySpend], limits: &[BudgetLimit]) -> Vec<Budget> {
        limits
            .iter()
            .map(|limit| {
                let spent = spending
                    .iter()
                    .find(|s| s.category == limit.category)
                    .map(|s| s.amount)
                    .unwrap_or(0.0);
                Budget {
                    category: limit.category.clone(),
                    spent,
                    limit: limit.limit,
                    color: limit.color.clone(),
                }
            })
            .collect()
    }

    pub fn status(&self, spent: f64, limit: f64) -> BudgetStatus {
        if limit <= 0.0 {
            // A zero cap is blown by any spending at all.
            return if spent > 0.0 {
                BudgetStatus::OverBudget
            } else {
                BudgetStatus::OnTrack
            };
        }
        if spent >= limit {
            BudgetStatus::OverBudget
        } else if spent >= self.near_limit_threshold * limit {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::OnTrack
        }
    }

    /// Evaluate a single budget for display in `currency`.
    pub fn evaluate(&self, budget: &Budget, currency: &str) -> BudgetLine {
        let status = self.status(budget.spent, budget.limit);
        let remaining = budget.limit - budget.spent;

        let percentage = if budget.limit > 0.0 {
            budget.spent / budget.limit * 100.0
        } else if budget.spent > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };
        let fill_pct = percentage.min(100.0);
        let overflow_pct = (percentage - 100.0).max(0.0);

        BudgetLine {
            category: budget.category.clone(),
            spent: budget.spent,
            limit: budget.limit,
            color: budget.color.clone(),
            status,
            remaining,
            percentage,
            fill_pct,
            overflow_pct,
            remaining_label: Self::remaining_label(status, remaining, currency),
        }
    }

    pub fn evaluate_all(&self, budgets: &[Budget], currency: &str) -> Vec<BudgetLine> {
        budgets.iter().map(|b| self.evaluate(b, currency)).collect()
    }

    fn remaining_label(status: BudgetStatus, remaining: f64, currency: &str) -> String {
        match status {
            BudgetStatus::OverBudget if remaining < 0.0 => format!(
                "Over limit by {}",
                format_service::format_currency_whole(-remaining, currency)
            ),
            BudgetStatus::OverBudget => "Limit reached".to_string(),
            BudgetStatus::OnTrack | BudgetStatus::NearLimit => format!(
                "{} left",
                format_service::format_currency_whole(remaining, currency)
            ),
        }
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}
