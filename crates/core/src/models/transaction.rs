use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which slice of the transaction table is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionFilter {
    /// Every transaction (default)
    #[default]
    All,
    /// Only money coming in (amount > 0)
    Income,
    /// Only money going out (amount < 0)
    Expense,
}

impl TransactionFilter {
    /// Whether a transaction belongs to this view.
    /// Zero-amount transactions only show up under `All`.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Income => transaction.is_income(),
            TransactionFilter::Expense => transaction.is_expense(),
        }
    }
}

impl std::fmt::Display for TransactionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionFilter::All => write!(f, "All"),
            TransactionFilter::Income => write!(f, "Income"),
            TransactionFilter::Expense => write!(f, "Expenses"),
        }
    }
}

/// A single money movement shown on the dashboard.
///
/// The sign of `amount` carries the direction: positive is income,
/// negative is an expense. Transactions are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Booking date (daily granularity)
    pub date: NaiveDate,

    /// Free-text description (e.g., "Whole Foods Market")
    pub description: String,

    /// Category label (e.g., "Food", "Transport", "Salary")
    pub category: String,

    /// Signed amount in the display currency
    pub amount: f64,

    /// Where the transaction came from (e.g., "Chase Checking", "Manual")
    pub source: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            description: description.into(),
            category: category.into(),
            amount,
            source: source.into(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}
