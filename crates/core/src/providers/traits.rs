use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::date_range::DateWindow;
use crate::models::summary::FinancialSnapshot;
use crate::models::transaction::Transaction;

/// Where the dashboard's transactions come from (a REST backend, a local
/// database, a bank sync service...).
///
/// The controller only ever talks to this trait, and always from a spawned
/// task, so implementations must be `Send + Sync`.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch every transaction dated inside `window` (inclusive).
    /// An empty Vec is a valid answer; unreachable backends should return
    /// `CoreError::DataSourceUnavailable`.
    async fn fetch_transactions(&self, window: DateWindow) -> Result<Vec<Transaction>, CoreError>;
}

/// Produces textual recommendations from the current financial picture.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Generate insights for `snapshot`. Failures should be reported as
    /// `CoreError::InsightGenerationFailed`.
    async fn generate(&self, snapshot: FinancialSnapshot) -> Result<Vec<String>, CoreError>;
}
