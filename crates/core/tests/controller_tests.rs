// ═══════════════════════════════════════════════════════════════════
// Controller Tests — DashboardController lifecycle, supersession,
// failure recovery, filters, insights, intents, settings
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

use finance_dashboard_core::errors::CoreError;
use finance_dashboard_core::models::budget::{BudgetLimit, BudgetStatus};
use finance_dashboard_core::models::dashboard::{
    Completion, DashboardIntent, InsightsStatus, IntentOutcome, LoadCompletion, LoadStatus,
};
use finance_dashboard_core::models::date_range::{DateRange, DateWindow};
use finance_dashboard_core::models::session::Session;
use finance_dashboard_core::models::settings::Settings;
use finance_dashboard_core::models::summary::FinancialSnapshot;
use finance_dashboard_core::models::transaction::{Transaction, TransactionFilter};
use finance_dashboard_core::providers::snapshot_insights::SnapshotInsightGenerator;
use finance_dashboard_core::providers::static_source::StaticTransactionSource;
use finance_dashboard_core::providers::traits::{InsightGenerator, TransactionSource};
use finance_dashboard_core::DashboardController;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn today() -> NaiveDate {
    d(2025, 3, 31)
}

fn session() -> Session {
    Session::new("user-1", "token-abc").with_display_name("Alex")
}

fn tx(category: &str, amount: f64) -> Transaction {
    Transaction::new(today(), format!("{category} item"), category, amount, "Manual")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ═══════════════════════════════════════════════════════════════════
// Mock collaborators
// ═══════════════════════════════════════════════════════════════════

type LoadResult = Result<Vec<Transaction>, CoreError>;

/// Source whose answers the test releases by hand, keyed by window start.
struct ScriptedSource {
    pending: Mutex<HashMap<NaiveDate, oneshot::Receiver<LoadResult>>>,
}

impl ScriptedSource {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            pending: Mutex::new(HashMap::new()),
        })
    }

    fn expect(&self, window_from: NaiveDate) -> oneshot::Sender<LoadResult> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().insert(window_from, rx);
        tx
    }
}

#[async_trait]
impl TransactionSource for ScriptedSource {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn fetch_transactions(&self, window: DateWindow) -> LoadResult {
        let rx = self.pending.lock().unwrap().remove(&window.from);
        match rx {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(CoreError::DataSourceUnavailable("dropped".into()))),
            None => Ok(Vec::new()),
        }
    }
}

/// Succeeds on the first call, then reports the backend as down.
struct FlakySource {
    calls: AtomicUsize,
    data: Vec<Transaction>,
}

#[async_trait]
impl TransactionSource for FlakySource {
    fn name(&self) -> &str {
        "Flaky"
    }

    async fn fetch_transactions(&self, _window: DateWindow) -> LoadResult {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(self.data.clone())
        } else {
            Err(CoreError::DataSourceUnavailable("connection refused".into()))
        }
    }
}

/// Answers once with fixed insights, then fails.
struct FlakyInsights {
    calls: AtomicUsize,
}

#[async_trait]
impl InsightGenerator for FlakyInsights {
    fn name(&self) -> &str {
        "FlakyInsights"
    }

    async fn generate(&self, _snapshot: FinancialSnapshot) -> Result<Vec<String>, CoreError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(vec!["Spend less on coffee.".into()])
        } else {
            Err(CoreError::InsightGenerationFailed("model timeout".into()))
        }
    }
}

/// Source that panics mid-fetch.
struct PanickingSource;

#[async_trait]
impl TransactionSource for PanickingSource {
    fn name(&self) -> &str {
        "Panicking"
    }

    async fn fetch_transactions(&self, _window: DateWindow) -> LoadResult {
        panic!("source crashed")
    }
}

/// Generator that panics on every request.
struct PanickingInsights;

#[async_trait]
impl InsightGenerator for PanickingInsights {
    fn name(&self) -> &str {
        "PanickingInsights"
    }

    async fn generate(&self, _snapshot: FinancialSnapshot) -> Result<Vec<String>, CoreError> {
        panic!("generator crashed")
    }
}

fn controller_with(source: Arc<dyn TransactionSource>) -> DashboardController {
    DashboardController::new(
        session(),
        source,
        Arc::new(SnapshotInsightGenerator::new()),
        Settings::default(),
    )
    .unwrap()
    .with_reference_date(today())
}

fn demo() -> DashboardController {
    DashboardController::demo(session(), today()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════

mod construction {
    use super::*;

    #[tokio::test]
    async fn rejects_anonymous_session() {
        let result = DashboardController::new(
            Session::anonymous(),
            Arc::new(StaticTransactionSource::new(vec![])),
            Arc::new(SnapshotInsightGenerator::new()),
            Settings::default(),
        );
        assert!(matches!(result, Err(CoreError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.near_limit_threshold = 2.0;
        let result = DashboardController::new(
            session(),
            Arc::new(StaticTransactionSource::new(vec![])),
            Arc::new(SnapshotInsightGenerator::new()),
            settings,
        );
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn requires_a_runtime() {
        let result = DashboardController::new(
            session(),
            Arc::new(StaticTransactionSource::new(vec![])),
            Arc::new(SnapshotInsightGenerator::new()),
            Settings::default(),
        );
        assert!(matches!(result, Err(CoreError::Runtime(_))));
    }

    #[tokio::test]
    async fn initial_view_is_idle_and_empty() {
        let controller = demo();
        let view = controller.view_model();
        assert_eq!(view.load_status, LoadStatus::Idle);
        assert!(!view.is_loading);
        assert!(view.transactions.is_empty());
        assert!(view.spending.is_empty());
        assert_eq!(view.budgets.len(), 5);
        assert_eq!(view.greeting_name, "Alex");
        assert_eq!(view.currency, "USD");
        assert!(!controller.has_pending_work());
    }

    #[tokio::test]
    async fn next_completion_returns_immediately_when_idle() {
        let mut controller = demo();
        assert_eq!(controller.next_completion().await, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════

mod loading {
    use super::*;

    #[tokio::test]
    async fn demo_load_populates_view_model() {
        let mut controller = demo();
        controller.start().unwrap();
        assert!(controller.view_model().is_loading);

        controller.settle().await;
        let view = controller.view_model();

        assert_eq!(view.load_status, LoadStatus::Loaded);
        assert!(!view.is_loading);
        assert!(view.error.is_none());
        assert_eq!(view.transaction_count, 10);
        assert_eq!(view.transactions.len(), 10);
        assert_eq!(
            view.loaded_window,
            Some(DateWindow { from: d(2025, 3, 1), to: today() })
        );

        assert!(approx(view.summary.total_income, 6270.0));
        assert!(approx(view.summary.total_expenses, 531.07));
        assert!(approx(view.summary.net_cash_flow, 6270.0 - 531.07));
        assert_eq!(view.summary.savings_progress_pct, 100.0);
        assert!(approx(view.total_spent, 531.07));

        let categories: Vec<&str> = view.spending.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["Food", "Entertainment", "Transport", "Shopping", "Utilities"]);
        assert!(approx(view.spending[0].amount, 150.55));
        assert_eq!(view.spending[0].color, "#FF6B6B");
        let pct_sum: f64 = view.spending.iter().map(|s| s.percentage).sum();
        assert!(approx(pct_sum, 100.0));

        let food = &view.budgets[0];
        assert_eq!(food.category, "Food");
        assert!(approx(food.spent, 150.55));
        assert_eq!(food.status, BudgetStatus::OnTrack);
    }

    #[tokio::test]
    async fn start_is_idempotent() {
        let mut controller = demo();
        let first = controller.start().unwrap();
        let second = controller.start().unwrap();
        assert_eq!(first, second);
        controller.settle().await;
        assert_eq!(controller.start().unwrap(), first);
    }

    #[tokio::test]
    async fn refresh_always_reloads() {
        let mut controller = demo();
        let first = controller.refresh().unwrap();
        let second = controller.refresh().unwrap();
        assert_eq!(second, first + 1);
        controller.settle().await;
        assert_eq!(controller.load_status(), LoadStatus::Loaded);
    }

    #[tokio::test]
    async fn range_change_keeps_previous_data_while_loading() {
        let source = ScriptedSource::new();
        let mut controller = controller_with(source.clone());

        let first = source.expect(d(2025, 3, 1));
        controller.start().unwrap();
        first.send(Ok(vec![tx("Food", -10.0)])).unwrap();
        controller.settle().await;

        let _pending = source.expect(d(2025, 3, 2));
        controller.select_range(DateRange::Last30).unwrap();

        let view = controller.view_model();
        assert!(view.is_loading);
        assert_eq!(view.selected_range, DateRange::Last30);
        assert_eq!(view.transaction_count, 1);
    }

    #[tokio::test]
    async fn invalid_range_is_rejected_without_state_change() {
        let mut controller = demo();
        controller.start().unwrap();
        controller.settle().await;

        let bad = DateRange::Custom { from: d(2025, 3, 10), to: d(2025, 3, 1) };
        let err = controller.select_range(bad).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDateRange { .. }));

        let view = controller.view_model();
        assert_eq!(view.selected_range, DateRange::ThisMonth);
        assert_eq!(view.load_status, LoadStatus::Loaded);
        assert!(!controller.has_pending_work());
    }

    #[tokio::test]
    async fn drain_applies_delivered_completions() {
        let mut controller = demo();
        controller.start().unwrap();

        let mut applied = 0;
        for _ in 0..100 {
            tokio::task::yield_now().await;
            applied += controller.drain_completions();
            if applied > 0 {
                break;
            }
        }
        assert_eq!(applied, 1);
        assert_eq!(controller.load_status(), LoadStatus::Loaded);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Supersession
// ═══════════════════════════════════════════════════════════════════

mod supersession {
    use super::*;

    #[tokio::test]
    async fn late_completion_of_older_range_is_ignored() {
        let mut controller = controller_with(ScriptedSource::new());
        let window_a = DateRange::Last30.resolve(today()).unwrap();
        let window_b = DateRange::Last60.resolve(today()).unwrap();

        let gen_a = controller.select_range(DateRange::Last30).unwrap();
        let gen_b = controller.select_range(DateRange::Last60).unwrap();
        assert!(gen_b > gen_a);

        // B finishes first...
        let applied_b = controller.apply_completion(Completion::Load(LoadCompletion {
            generation: gen_b,
            range: DateRange::Last60,
            window: window_b,
            result: Ok(vec![tx("Transport", -60.0)]),
        }));
        // ...then A arrives late.
        let applied_a = controller.apply_completion(Completion::Load(LoadCompletion {
            generation: gen_a,
            range: DateRange::Last30,
            window: window_a,
            result: Ok(vec![tx("Food", -30.0), tx("Food", -5.0)]),
        }));

        assert!(applied_b);
        assert!(!applied_a);
        let view = controller.view_model();
        assert_eq!(view.selected_range, DateRange::Last60);
        assert_eq!(view.loaded_window, Some(window_b));
        assert_eq!(view.transaction_count, 1);
        assert_eq!(view.transactions[0].category, "Transport");
    }

    #[tokio::test]
    async fn stale_completion_while_newer_is_pending_is_ignored() {
        let mut controller = controller_with(ScriptedSource::new());
        let gen_a = controller.select_range(DateRange::Last30).unwrap();
        controller.select_range(DateRange::Last60).unwrap();

        let applied = controller.apply_completion(Completion::Load(LoadCompletion {
            generation: gen_a,
            range: DateRange::Last30,
            window: DateRange::Last30.resolve(today()).unwrap(),
            result: Ok(vec![tx("Food", -30.0)]),
        }));

        assert!(!applied);
        let view = controller.view_model();
        assert!(view.is_loading);
        assert_eq!(view.transaction_count, 0);
    }

    #[tokio::test]
    async fn spawned_loads_only_apply_latest_range() {
        let source = ScriptedSource::new();
        let mut controller = controller_with(source.clone());

        let release_a = source.expect(d(2025, 3, 2));
        let release_b = source.expect(d(2025, 1, 31));
        controller.select_range(DateRange::Last30).unwrap();
        controller.select_range(DateRange::Last60).unwrap();

        release_b.send(Ok(vec![tx("Utilities", -99.0)])).unwrap();
        // A's task was aborted; its answer has nowhere to go.
        let _ = release_a.send(Ok(vec![tx("Food", -1.0)]));

        controller.settle().await;
        let view = controller.view_model();
        assert_eq!(view.load_status, LoadStatus::Loaded);
        assert_eq!(view.selected_range, DateRange::Last60);
        assert_eq!(view.transaction_count, 1);
        assert_eq!(view.transactions[0].category, "Utilities");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Failure recovery
// ═══════════════════════════════════════════════════════════════════

mod failures {
    use super::*;

    #[tokio::test]
    async fn failed_reload_keeps_last_loaded_data() {
        let source = Arc::new(FlakySource {
            calls: AtomicUsize::new(0),
            data: vec![tx("Income", 1000.0), tx("Food", -200.0)],
        });
        let mut controller = controller_with(source);

        controller.start().unwrap();
        controller.settle().await;
        assert_eq!(controller.load_status(), LoadStatus::Loaded);

        controller.refresh().unwrap();
        controller.settle().await;

        let view = controller.view_model();
        assert_eq!(view.load_status, LoadStatus::LoadFailed);
        assert!(!view.is_loading);
        assert!(view.error.as_deref().unwrap().contains("connection refused"));
        assert_eq!(view.transaction_count, 2);
        assert!(approx(view.summary.net_cash_flow, 800.0));

        // Still interactive.
        controller.set_filter(TransactionFilter::Income);
        assert_eq!(controller.view_model().transactions.len(), 1);
    }

    #[tokio::test]
    async fn first_load_failure_leaves_empty_view() {
        let source = Arc::new(FlakySource {
            calls: AtomicUsize::new(1),
            data: vec![],
        });
        let mut controller = controller_with(source);
        controller.start().unwrap();
        controller.settle().await;

        let view = controller.view_model();
        assert_eq!(view.load_status, LoadStatus::LoadFailed);
        assert!(view.loaded_window.is_none());
        assert_eq!(view.transaction_count, 0);
    }

    #[tokio::test]
    async fn panicking_source_ends_in_load_failed() {
        let mut controller = controller_with(Arc::new(PanickingSource));
        controller.select_range(DateRange::Last30).unwrap();

        tokio::time::timeout(Duration::from_secs(5), controller.settle())
            .await
            .expect("controller settles after a source panic");

        let view = controller.view_model();
        assert!(!controller.has_pending_work());
        assert_eq!(view.load_status, LoadStatus::LoadFailed);
        assert!(!view.is_loading);
        assert!(view.error.as_deref().unwrap().contains("transaction source task failed"));

        // A later range selection is still accepted.
        assert!(controller.select_range(DateRange::ThisMonth).is_ok());
    }

    #[tokio::test]
    async fn successful_reload_clears_error() {
        let source = ScriptedSource::new();
        let mut controller = controller_with(source.clone());

        let fail = source.expect(d(2025, 3, 1));
        controller.start().unwrap();
        fail.send(Err(CoreError::DataSourceUnavailable("down".into()))).unwrap();
        controller.settle().await;
        assert!(controller.view_model().error.is_some());

        let ok = source.expect(d(2025, 3, 1));
        controller.refresh().unwrap();
        ok.send(Ok(vec![tx("Food", -1.0)])).unwrap();
        controller.settle().await;

        let view = controller.view_model();
        assert_eq!(view.load_status, LoadStatus::Loaded);
        assert!(view.error.is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Filters
// ═══════════════════════════════════════════════════════════════════

mod filters {
    use super::*;

    #[tokio::test]
    async fn filter_changes_visible_subset_only() {
        let mut controller = demo();
        controller.start().unwrap();
        controller.settle().await;
        let summary_before = controller.view_model().summary.clone();

        controller.set_filter(TransactionFilter::Income);
        let view = controller.view_model();
        assert_eq!(view.filter, TransactionFilter::Income);
        assert_eq!(view.transactions.len(), 2);
        assert!(view.transactions.iter().all(|t| t.amount > 0.0));
        assert_eq!(view.transaction_count, 10);
        assert_eq!(view.summary, summary_before);

        controller.set_filter(TransactionFilter::Expense);
        assert_eq!(controller.view_model().transactions.len(), 8);

        controller.set_filter(TransactionFilter::All);
        assert_eq!(controller.view_model().transactions.len(), 10);
    }

    #[tokio::test]
    async fn filter_survives_reload() {
        let mut controller = demo();
        controller.set_filter(TransactionFilter::Expense);
        controller.start().unwrap();
        controller.settle().await;
        assert_eq!(controller.view_model().transactions.len(), 8);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Insights
// ═══════════════════════════════════════════════════════════════════

mod insights {
    use super::*;

    #[tokio::test]
    async fn generate_then_ready() {
        let mut controller = demo();
        controller.start().unwrap();
        controller.settle().await;

        let generation = controller.generate_insights().unwrap();
        assert_eq!(generation, Some(1));
        assert_eq!(controller.view_model().insights.status, InsightsStatus::Generating);

        // Pending request: a second click does nothing.
        assert_eq!(controller.generate_insights().unwrap(), None);

        controller.settle().await;
        let panel = &controller.view_model().insights;
        assert_eq!(panel.status, InsightsStatus::Ready);
        assert!(!panel.insights.is_empty());
        assert!(panel.insights.iter().any(|i| i.contains("largest expense")));
    }

    #[tokio::test]
    async fn failure_keeps_prior_insights_with_retry() {
        let mut controller = DashboardController::new(
            session(),
            Arc::new(StaticTransactionSource::sample(today())),
            Arc::new(FlakyInsights { calls: AtomicUsize::new(0) }),
            Settings::default(),
        )
        .unwrap()
        .with_reference_date(today());

        controller.generate_insights().unwrap();
        controller.settle().await;
        assert_eq!(controller.view_model().insights.insights, vec!["Spend less on coffee."]);

        controller.generate_insights().unwrap();
        controller.settle().await;
        let panel = &controller.view_model().insights;
        assert!(matches!(
            &panel.status,
            InsightsStatus::Failed { retry_available: true, error } if error.contains("model timeout")
        ));
        assert_eq!(panel.insights, vec!["Spend less on coffee."]);

        // Retry is allowed after a failure.
        assert!(controller.generate_insights().unwrap().is_some());
    }

    #[tokio::test]
    async fn panicking_generator_allows_retry() {
        let mut controller = DashboardController::new(
            session(),
            Arc::new(StaticTransactionSource::sample(today())),
            Arc::new(PanickingInsights),
            Settings::default(),
        )
        .unwrap()
        .with_reference_date(today());

        controller.generate_insights().unwrap();
        tokio::time::timeout(Duration::from_secs(5), controller.settle())
            .await
            .expect("controller settles after a generator panic");

        assert!(matches!(
            &controller.view_model().insights.status,
            InsightsStatus::Failed { retry_available: true, error }
                if error.contains("insight generator task failed")
        ));
        assert!(controller.generate_insights().unwrap().is_some());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Intents & session
// ═══════════════════════════════════════════════════════════════════

mod intents {
    use super::*;

    #[tokio::test]
    async fn dispatches_intents() {
        let mut controller = demo();

        let outcome = controller
            .handle_intent(DashboardIntent::RangeChanged(DateRange::Last60))
            .unwrap();
        assert_eq!(outcome, IntentOutcome::None);
        assert_eq!(controller.view_model().selected_range, DateRange::Last60);

        let outcome = controller
            .handle_intent(DashboardIntent::FilterChanged(TransactionFilter::Expense))
            .unwrap();
        assert_eq!(outcome, IntentOutcome::None);
        assert_eq!(controller.view_model().filter, TransactionFilter::Expense);

        assert_eq!(
            controller.handle_intent(DashboardIntent::AddTransactionRequested).unwrap(),
            IntentOutcome::OpenAddTransactionForm
        );

        controller
            .handle_intent(DashboardIntent::GenerateInsightsRequested)
            .unwrap();
        assert!(controller.view_model().insights.is_generating());

        controller.settle().await;
        assert_eq!(controller.load_status(), LoadStatus::Loaded);
    }

    #[tokio::test]
    async fn logout_ends_session_and_clears_view() {
        let mut controller = demo();
        controller.start().unwrap();
        controller.settle().await;

        let outcome = controller.handle_intent(DashboardIntent::LogoutRequested).unwrap();
        assert_eq!(outcome, IntentOutcome::NavigateToLogin);
        assert!(!controller.session().is_authenticated());

        let view = controller.view_model();
        assert_eq!(view.load_status, LoadStatus::Idle);
        assert_eq!(view.transaction_count, 0);
        assert!(!controller.has_pending_work());

        assert!(matches!(
            controller.handle_intent(DashboardIntent::RangeChanged(DateRange::Last30)),
            Err(CoreError::NotAuthenticated)
        ));
        assert!(matches!(
            controller.generate_insights(),
            Err(CoreError::NotAuthenticated)
        ));
        assert!(matches!(
            controller.handle_intent(DashboardIntent::AddTransactionRequested),
            Err(CoreError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn load_in_flight_at_logout_is_ignored() {
        let mut controller = controller_with(ScriptedSource::new());
        let generation = controller.start().unwrap();
        controller.logout();

        let applied = controller.apply_completion(Completion::Load(LoadCompletion {
            generation,
            range: DateRange::ThisMonth,
            window: DateRange::ThisMonth.resolve(today()).unwrap(),
            result: Ok(vec![tx("Food", -1.0)]),
        }));
        assert!(!applied);
        assert_eq!(controller.view_model().transaction_count, 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[tokio::test]
    async fn update_settings_recomputes_budgets() {
        let source = Arc::new(StaticTransactionSource::new(vec![tx("Food", -840.0)]));
        let mut controller = controller_with(source);
        controller.start().unwrap();
        controller.settle().await;
        let line = &controller.view_model().budgets[0];
        assert_eq!(line.category, "Food");
        assert_eq!(line.status, BudgetStatus::NearLimit);
        assert_eq!(line.remaining_label, "$60 left");

        let mut settings = Settings::default();
        settings.near_limit_threshold = 0.95;
        controller.update_settings(settings.clone()).unwrap();
        assert_eq!(controller.view_model().budgets[0].status, BudgetStatus::OnTrack);

        settings.budgets = vec![BudgetLimit::new("Food", 800.0, "#FF6B6B")];
        controller.update_settings(settings).unwrap();
        let view = controller.view_model();
        assert_eq!(view.budgets.len(), 1);
        assert_eq!(view.budgets[0].status, BudgetStatus::OverBudget);
        assert_eq!(view.budgets[0].remaining_label, "Over limit by $40");
        assert!(approx(view.summary.budget_remaining, -40.0));
    }

    #[tokio::test]
    async fn invalid_update_is_rejected() {
        let mut controller = demo();
        let mut settings = Settings::default();
        settings.currency = "US".into();
        assert!(controller.update_settings(settings).is_err());
        assert_eq!(controller.settings().currency, "USD");
    }

    #[tokio::test]
    async fn income_in_a_budget_category_is_not_spend() {
        let source = Arc::new(StaticTransactionSource::new(vec![
            tx("Food", 840.0),
            tx("Food", -100.0),
        ]));
        let mut controller = controller_with(source);
        controller.start().unwrap();
        controller.settle().await;

        let view = controller.view_model();
        assert_eq!(view.budgets[0].category, "Food");
        assert!(approx(view.budgets[0].spent, 100.0));
        assert_eq!(view.budgets[0].remaining_label, "$800 left");
        assert!(approx(view.total_spent, 100.0));
        assert!(approx(view.summary.total_income, 840.0));
    }

    #[tokio::test]
    async fn currency_flows_into_labels() {
        let source = Arc::new(StaticTransactionSource::new(vec![tx("Food", -100.0)]));
        let mut controller = controller_with(source);
        let mut settings = Settings::default();
        settings.currency = "EUR".into();
        controller.update_settings(settings).unwrap();
        controller.start().unwrap();
        controller.settle().await;

        let view = controller.view_model();
        assert_eq!(view.currency, "EUR");
        assert_eq!(view.budgets[0].remaining_label, "€800 left");
        assert_eq!(controller.snapshot().currency, "EUR");
    }
}
