use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

use crate::errors::CoreError;
use crate::models::date_range::DateWindow;
use crate::models::transaction::Transaction;

use super::traits::TransactionSource;

/// In-memory transaction source.
///
/// Serves a fixed list, filtered to the requested window. Useful for demos,
/// offline mode, and as a stand-in until a real backend is wired up.
pub struct StaticTransactionSource {
    transactions: Vec<Transaction>,
}

impl StaticTransactionSource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Demo dataset, dated backwards from `today` so recent ranges are populated.
    pub fn sample(today: NaiveDate) -> Self {
        let day = |offset: i64| today - Duration::days(offset);
        let transactions = vec![
            Transaction::new(day(0), "Whole Foods Market", "Food", -87.43, "Chase Sapphire"),
            Transaction::new(day(1), "Salary Deposit", "Income", 5420.00, "Chase Checking"),
            Transaction::new(day(2), "Netflix Subscription", "Entertainment", -15.99, "Chase Sapphire"),
            Transaction::new(day(3), "Shell Gas Station", "Transport", -52.30, "Amex Gold"),
            Transaction::new(day(4), "Amazon Purchase", "Shopping", -134.99, "Amex Gold"),
            Transaction::new(day(5), "Electric Bill", "Utilities", -142.50, "Chase Checking"),
            Transaction::new(day(6), "Freelance Payment", "Income", 850.00, "PayPal"),
            Transaction::new(day(7), "Uber Ride", "Transport", -24.75, "Amex Gold"),
            Transaction::new(day(8), "Trader Joe's", "Food", -63.12, "Chase Sapphire"),
            Transaction::new(day(9), "Spotify Premium", "Entertainment", -9.99, "Chase Sapphire"),
        ];
        Self::new(transactions)
    }
}

#[async_trait]
impl TransactionSource for StaticTransactionSource {
    fn name(&self) -> &str {
        "Static"
    }

    async fn fetch_transactions(&self, window: DateWindow) -> Result<Vec<Transaction>, CoreError> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| window.contains(t.date))
            .cloned()
            .collect())
    }
}
