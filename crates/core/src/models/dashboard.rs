use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::budget::BudgetLine;
use super::date_range::{DateRange, DateWindow};
use super::spending::CategorySegment;
use super::summary::FinancialSummary;
use super::transaction::{Transaction, TransactionFilter};

/// Lifecycle of the transaction load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A load for the selected range is in flight
    Loading,
    /// The selected range's data is on screen
    Loaded,
    /// The latest load failed; the previous data stays visible
    LoadFailed,
}

/// State of the insights panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightsStatus {
    #[default]
    Idle,
    Generating,
    Ready,
    /// Last request failed; prior insights are kept and a retry can be offered.
    Failed { error: String, retry_available: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsPanel {
    pub status: InsightsStatus,
    pub insights: Vec<String>,
}

impl InsightsPanel {
    pub fn is_generating(&self) -> bool {
        self.status == InsightsStatus::Generating
    }
}

/// The read-only snapshot the presentation layer renders.
///
/// Rebuilt from scratch after every state change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardViewModel {
    pub greeting_name: String,
    pub currency: String,

    pub selected_range: DateRange,
    /// Concrete dates of the data currently shown, if any has loaded
    pub loaded_window: Option<DateWindow>,
    pub filter: TransactionFilter,

    pub load_status: LoadStatus,
    pub is_loading: bool,
    /// Non-blocking error indicator (e.g., a banner); data below stays usable
    pub error: Option<String>,

    pub summary: FinancialSummary,
    pub spending: Vec<CategorySegment>,
    pub total_spent: f64,
    pub budgets: Vec<BudgetLine>,

    /// Transactions matching `filter`, in load order
    pub transactions: Vec<Transaction>,
    /// Count of all loaded transactions, regardless of filter
    pub transaction_count: usize,

    pub insights: InsightsPanel,
}

/// User intents the presentation layer sends back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardIntent {
    RangeChanged(DateRange),
    FilterChanged(TransactionFilter),
    AddTransactionRequested,
    GenerateInsightsRequested,
    LogoutRequested,
}

/// What the host should do after an intent was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    /// Nothing beyond re-rendering the view model
    None,
    /// Show the add-transaction form (owned by the host)
    OpenAddTransactionForm,
    /// The session ended; route to the login gate
    NavigateToLogin,
}

/// Result of a transaction load task, tagged with the request generation.
#[derive(Debug, Clone)]
pub struct LoadCompletion {
    pub generation: u64,
    pub range: DateRange,
    pub window: DateWindow,
    pub result: Result<Vec<Transaction>, CoreError>,
}

/// Result of an insight generation task, tagged with the request generation.
#[derive(Debug, Clone)]
pub struct InsightCompletion {
    pub generation: u64,
    pub result: Result<Vec<String>, CoreError>,
}

/// Anything delivered back to the controller through its completion channel.
#[derive(Debug, Clone)]
pub enum Completion {
    Load(LoadCompletion),
    Insights(InsightCompletion),
}
