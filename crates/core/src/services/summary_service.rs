use crate::models::budget::BudgetLine;
use crate::models::settings::SavingsGoal;
use crate::models::summary::FinancialSummary;
use crate::models::transaction::Transaction;

/// Computes the headline figures for the summary cards.
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Build the summary from the full (unfiltered) transaction set.
    ///
    /// - Income / expenses split on the sign of each amount
    /// - Budget remaining and usage across all budget lines
    /// - Savings progress = net cash flow as a share of the goal, clamped to 0–100
    pub fn summarize(
        &self,
        transactions: &[Transaction],
        budgets: &[BudgetLine],
        goal: &SavingsGoal,
    ) -> FinancialSummary {
        let total_income: f64 = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let total_expenses: f64 = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| -t.amount)
            .sum();
        let net_cash_flow = total_income - total_expenses;

        let total_limit: f64 = budgets.iter().map(|b| b.limit).sum();
        let total_spent: f64 = budgets.iter().map(|b| b.spent).sum();
        let budget_used_pct = if total_limit > 0.0 {
            total_spent / total_limit * 100.0
        } else {
            0.0
        };

        let savings_progress_pct = if goal.target_amount > 0.0 {
            (net_cash_flow / goal.target_amount * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        FinancialSummary {
            total_income,
            total_expenses,
            net_cash_flow,
            budget_remaining: total_limit - total_spent,
            budget_used_pct,
            savings_progress_pct,
            savings_goal_name: goal.name.clone(),
            savings_goal_target: goal.target_amount,
        }
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}
