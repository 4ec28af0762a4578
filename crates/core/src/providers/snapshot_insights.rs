use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::budget::BudgetStatus;
use crate::models::summary::FinancialSnapshot;
use crate::services::format_service::{format_currency, format_currency_whole, format_percentage};

use super::traits::InsightGenerator;

/// Rule-based insight generator working purely from the snapshot.
///
/// Emits, in order: budget warnings, the largest spending category,
/// and the period's cash-flow result relative to the savings goal.
pub struct SnapshotInsightGenerator;

impl SnapshotInsightGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn insights_for(&self, snapshot: &FinancialSnapshot) -> Vec<String> {
        let currency = snapshot.currency.as_str();
        let summary = &snapshot.summary;
        let mut insights = Vec::new();

        for budget in &snapshot.budgets {
            match budget.status {
                BudgetStatus::OverBudget => insights.push(format!(
                    "{} is over budget: {} spent against a {} limit.",
                    budget.category,
                    format_currency_whole(budget.spent, currency),
                    format_currency_whole(budget.limit, currency),
                )),
                BudgetStatus::NearLimit => insights.push(format!(
                    "{} is at {} of its budget with {}.",
                    budget.category,
                    format_percentage(budget.percentage, 0),
                    budget.remaining_label,
                )),
                BudgetStatus::OnTrack => {}
            }
        }

        let largest = snapshot.spending.iter().max_by(|a, b| {
            a.amount
                .partial_cmp(&b.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        if let Some(top) = largest {
            insights.push(format!(
                "{} is your largest expense category at {} of spending.",
                top.category,
                format_percentage(top.percentage, 1),
            ));
        }

        if summary.net_cash_flow > 0.0 {
            insights.push(format!(
                "You saved {} this period, {} of your {} goal.",
                format_currency(summary.net_cash_flow, currency),
                format_percentage(summary.savings_progress_pct, 0),
                summary.savings_goal_name,
            ));
        } else if summary.net_cash_flow < 0.0 {
            insights.push(format!(
                "You spent {} more than you earned this period.",
                format_currency(-summary.net_cash_flow, currency),
            ));
        }

        if insights.is_empty() {
            insights.push("No activity in this period yet. Add transactions to get insights.".into());
        }
        insights
    }
}

impl Default for SnapshotInsightGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InsightGenerator for SnapshotInsightGenerator {
    fn name(&self) -> &str {
        "Snapshot"
    }

    async fn generate(&self, snapshot: FinancialSnapshot) -> Result<Vec<String>, CoreError> {
        Ok(self.insights_for(&snapshot))
    }
}
