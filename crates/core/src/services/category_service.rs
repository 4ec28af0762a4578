use std::collections::HashMap;

use crate::models::spending::{CategorySegment, CategorySpend};
use crate::models::transaction::Transaction;

/// Fallback colors, assigned by first-seen category index.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E2",
];

/// Groups transactions by category and lays the totals out as donut segments.
///
/// Pure business logic, no I/O. Output order follows the order in which
/// categories first appear, so chart segments keep their position across reloads.
pub struct CategoryService;

impl CategoryService {
    pub fn new() -> Self {
        Self
    }

    /// Sum `abs(amount)` per category, keeping first-seen order.
    /// Categories whose total is zero are dropped.
    pub fn aggregate(
        &self,
        transactions: &[Transaction],
        colors: &HashMap<String, String>,
    ) -> Vec<CategorySpend> {
        let mut order: Vec<&str> = Vec::new();
        let mut totals: HashMap<&str, f64> = HashMap::new();

        for transaction in transactions {
            let category = transaction.category.as_str();
            let total = totals.entry(category).or_insert_with(|| {
                order.push(category);
                0.0
            });
            *total += transaction.amount.abs();
        }

        order
            .into_iter()
            .enumerate()
            .filter_map(|(idx, category)| {
                let amount = totals.get(category).copied().unwrap_or(0.0);
                if amount == 0.0 {
                    return None;
                }
                let color = colors
                    .get(category)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_PALETTE[idx % DEFAULT_PALETTE.len()].to_string());
                Some(CategorySpend {
                    category: category.to_string(),
                    amount,
                    color,
                })
            })
            .collect()
    }

    /// Total of all category amounts.
    pub fn total(&self, spending: &[CategorySpend]) -> f64 {
        spending.iter().map(|s| s.amount).sum()
    }

    /// Compute percentage and angles for each category.
    ///
    /// The total is computed once and every slice is measured against it,
    /// so start angles are exact prefix sums. A zero total yields all-zero slices.
    pub fn segments(&self, spending: &[CategorySpend]) -> Vec<CategorySegment> {
        let total = self.total(spending);
        let mut cumulative = 0.0;

        spending
            .iter()
            .map(|item| {
                let (percentage, start_angle, sweep_angle) = if total > 0.0 {
                    (
                        item.amount / total * 100.0,
                        cumulative / total * 360.0,
                        item.amount / total * 360.0,
                    )
                } else {
                    (0.0, 0.0, 0.0)
                };
                cumulative += item.amount;

                CategorySegment {
                    category: item.category.clone(),
                    amount: item.amount,
                    color: item.color.clone(),
                    percentage,
                    start_angle,
                    sweep_angle,
                }
            })
            .collect()
    }
}

impl Default for CategoryService {
    fn default() -> Self {
        Self::new()
    }
}
