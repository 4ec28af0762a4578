use chrono::NaiveDate;
use thiserror::Error;

/// Unified error type for the entire finance-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
///
/// None of these are fatal: the controller records them and stays interactive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    // ── Collaborators ───────────────────────────────────────────────
    #[error("Transaction data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Insight generation failed: {0}")]
    InsightGenerationFailed(String),

    #[error("Not authenticated — sign in to view the dashboard")]
    NotAuthenticated,

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Invalid date range {from} to {to}: {reason}")]
    InvalidDateRange {
        from: NaiveDate,
        to: NaiveDate,
        reason: String,
    },

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Runtime ─────────────────────────────────────────────────────
    #[error("Async runtime error: {0}")]
    Runtime(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<tokio::runtime::TryCurrentError> for CoreError {
    fn from(e: tokio::runtime::TryCurrentError) -> Self {
        CoreError::Runtime(e.to_string())
    }
}
