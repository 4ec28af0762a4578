pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use models::{
    dashboard::{
        Completion, DashboardIntent, DashboardViewModel, InsightCompletion, InsightsPanel,
        InsightsStatus, IntentOutcome, LoadCompletion, LoadStatus,
    },
    date_range::{DateRange, DateWindow},
    session::Session,
    settings::Settings,
    summary::FinancialSnapshot,
    transaction::{Transaction, TransactionFilter},
};
use providers::{
    snapshot_insights::SnapshotInsightGenerator,
    static_source::StaticTransactionSource,
    traits::{InsightGenerator, TransactionSource},
};
use services::{
    budget_service::BudgetService, category_service::CategoryService,
    filter_service::FilterService, summary_service::SummaryService,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use errors::CoreError;

/// Main entry point for the finance dashboard core.
///
/// Owns all dashboard state and the services that derive the view model from it.
/// Data loads and insight generation run as Tokio tasks; their results come back
/// through a completion channel and are applied here, by the single owner.
/// Every request bumps a generation counter, and only the completion matching
/// the latest generation is applied.
#[must_use]
pub struct DashboardController {
    session: Session,
    settings: Settings,
    source: Arc<dyn TransactionSource>,
    insight_generator: Arc<dyn InsightGenerator>,
    category_service: CategoryService,
    budget_service: BudgetService,
    filter_service: FilterService,
    summary_service: SummaryService,
    runtime: Handle,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    /// Pins "today" for range resolution; `None` means the local date.
    reference_date: Option<NaiveDate>,
    state: DashboardState,
    view: DashboardViewModel,
}

/// Everything the user can change or the controller has loaded.
#[derive(Debug, Default)]
struct DashboardState {
    selected_range: DateRange,
    filter: TransactionFilter,
    load_status: LoadStatus,
    load_generation: u64,
    load_task: Option<JoinHandle<()>>,
    /// Last successfully loaded data; survives failed reloads.
    loaded: Option<LoadedData>,
    error: Option<CoreError>,
    insights: InsightsPanel,
    insight_generation: u64,
    insight_task: Option<JoinHandle<()>>,
}

/// Aborts a collaborator task when the task awaiting it is aborted.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[derive(Debug)]
struct LoadedData {
    window: DateWindow,
    transactions: Vec<Transaction>,
}

impl std::fmt::Debug for DashboardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardController")
            .field("user", &self.session.user_id)
            .field("source", &self.source.name())
            .field("insight_generator", &self.insight_generator.name())
            .field("range", &self.state.selected_range)
            .field("filter", &self.state.filter)
            .field("load_status", &self.state.load_status)
            .field("load_generation", &self.state.load_generation)
            .finish()
    }
}

impl DashboardController {
    /// Create a controller for an authenticated session.
    ///
    /// Must be called from within a Tokio runtime: loads are spawned on it.
    pub fn new(
        session: Session,
        source: Arc<dyn TransactionSource>,
        insight_generator: Arc<dyn InsightGenerator>,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        if !session.is_authenticated() {
            return Err(CoreError::NotAuthenticated);
        }
        settings.validate()?;
        let runtime = Handle::try_current()?;
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        let mut controller = Self {
            budget_service: BudgetService::with_threshold(settings.near_limit_threshold),
            session,
            settings,
            source,
            insight_generator,
            category_service: CategoryService::new(),
            filter_service: FilterService::new(),
            summary_service: SummaryService::new(),
            runtime,
            completion_tx,
            completion_rx,
            reference_date: None,
            state: DashboardState::default(),
            view: DashboardViewModel::default(),
        };
        controller.recompute_view();
        Ok(controller)
    }

    /// Controller wired to the built-in demo data and rule-based insights.
    pub fn demo(session: Session, today: NaiveDate) -> Result<Self, CoreError> {
        Ok(Self::new(
            session,
            Arc::new(StaticTransactionSource::sample(today)),
            Arc::new(SnapshotInsightGenerator::new()),
            Settings::default(),
        )?
        .with_reference_date(today))
    }

    /// Pin the date that relative ranges ("this month", "last 30 days") resolve against.
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.reference_date = Some(today);
        self
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Kick off the first load. Does nothing if a load already happened or is running.
    /// Returns the generation of the current load.
    pub fn start(&mut self) -> Result<u64, CoreError> {
        if self.state.load_status == LoadStatus::Idle {
            self.refresh()
        } else {
            Ok(self.state.load_generation)
        }
    }

    /// Reload the currently selected range.
    pub fn refresh(&mut self) -> Result<u64, CoreError> {
        self.select_range(self.state.selected_range)
    }

    /// Select a reporting range and request its transactions.
    ///
    /// Supersedes any load still in flight: its task is aborted and, should its
    /// result already be queued, that result is ignored. An invalid range is
    /// rejected and leaves the current state untouched.
    pub fn select_range(&mut self, range: DateRange) -> Result<u64, CoreError> {
        self.ensure_authenticated()?;
        let window = range.resolve(self.today()).inspect_err(|e| {
            warn!(%range, error = %e, "rejected date range");
        })?;

        if let Some(task) = self.state.load_task.take() {
            task.abort();
        }
        self.state.load_generation += 1;
        let generation = self.state.load_generation;
        self.state.selected_range = range;
        self.state.load_status = LoadStatus::Loading;

        let source = Arc::clone(&self.source);
        let tx = self.completion_tx.clone();
        let runtime = self.runtime.clone();
        self.state.load_task = Some(self.runtime.spawn(async move {
            // The fetch runs in its own task so a panicking source still
            // produces a completion instead of leaving the load pending.
            let fetch = runtime.spawn(async move { source.fetch_transactions(window).await });
            let _guard = AbortOnDrop(fetch.abort_handle());
            let result = fetch.await.unwrap_or_else(|e| {
                Err(CoreError::DataSourceUnavailable(format!(
                    "transaction source task failed: {e}"
                )))
            });
            // A closed channel means the controller is gone; nothing to report to.
            let _ = tx.send(Completion::Load(LoadCompletion {
                generation,
                range,
                window,
                result,
            }));
        }));

        info!(
            %range,
            from = %window.from,
            to = %window.to,
            generation,
            source = self.source.name(),
            "transaction load requested"
        );
        self.recompute_view();
        Ok(generation)
    }

    // ── Completions ─────────────────────────────────────────────────

    /// Apply a finished load or insight request.
    ///
    /// Returns `false` when the completion belongs to a superseded request
    /// and was ignored.
    pub fn apply_completion(&mut self, completion: Completion) -> bool {
        let applied = match completion {
            Completion::Load(load) => self.apply_load(load),
            Completion::Insights(insights) => self.apply_insights(insights),
        };
        if applied {
            self.recompute_view();
        }
        applied
    }

    /// Wait for the next completion and apply it.
    ///
    /// Returns `None` without waiting when no request is in flight, otherwise
    /// whether the received completion was applied.
    pub async fn next_completion(&mut self) -> Option<bool> {
        if !self.has_pending_work() {
            return None;
        }
        let completion = self.completion_rx.recv().await?;
        Some(self.apply_completion(completion))
    }

    /// Keep applying completions until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    /// Apply every completion that has already arrived, without waiting.
    /// Returns how many were applied (stale ones are not counted).
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            if self.apply_completion(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// `true` while a load or insight request has not been applied yet.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        self.state.load_task.is_some() || self.state.insight_task.is_some()
    }

    // ── Filters & Insights ──────────────────────────────────────────

    pub fn set_filter(&mut self, filter: TransactionFilter) {
        if self.state.filter != filter {
            debug!(%filter, "transaction filter changed");
            self.state.filter = filter;
            self.recompute_view();
        }
    }

    /// Ask the insight generator for fresh insights.
    ///
    /// Returns `None` if a generation is already pending; the request is not
    /// repeated until that one finishes.
    pub fn generate_insights(&mut self) -> Result<Option<u64>, CoreError> {
        self.ensure_authenticated()?;
        if self.state.insights.is_generating() {
            debug!("insight generation already pending");
            return Ok(None);
        }

        self.state.insight_generation += 1;
        let generation = self.state.insight_generation;
        self.state.insights.status = InsightsStatus::Generating;

        let snapshot = self.snapshot();
        let generator = Arc::clone(&self.insight_generator);
        let tx = self.completion_tx.clone();
        let runtime = self.runtime.clone();
        self.state.insight_task = Some(self.runtime.spawn(async move {
            let generate = runtime.spawn(async move { generator.generate(snapshot).await });
            let _guard = AbortOnDrop(generate.abort_handle());
            let result = generate.await.unwrap_or_else(|e| {
                Err(CoreError::InsightGenerationFailed(format!(
                    "insight generator task failed: {e}"
                )))
            });
            let _ = tx.send(Completion::Insights(InsightCompletion { generation, result }));
        }));

        info!(generation, generator = self.insight_generator.name(), "insight generation requested");
        self.recompute_view();
        Ok(Some(generation))
    }

    // ── Intents & Session ───────────────────────────────────────────

    /// Dispatch a user intent from the presentation layer.
    pub fn handle_intent(&mut self, intent: DashboardIntent) -> Result<IntentOutcome, CoreError> {
        match intent {
            DashboardIntent::RangeChanged(range) => {
                self.select_range(range)?;
                Ok(IntentOutcome::None)
            }
            DashboardIntent::FilterChanged(filter) => {
                self.set_filter(filter);
                Ok(IntentOutcome::None)
            }
            DashboardIntent::AddTransactionRequested => {
                self.ensure_authenticated()?;
                Ok(IntentOutcome::OpenAddTransactionForm)
            }
            DashboardIntent::GenerateInsightsRequested => {
                self.generate_insights()?;
                Ok(IntentOutcome::None)
            }
            DashboardIntent::LogoutRequested => {
                self.logout();
                Ok(IntentOutcome::NavigateToLogin)
            }
        }
    }

    /// End the session and drop everything loaded for it.
    /// Results of requests still in flight will be ignored.
    pub fn logout(&mut self) {
        info!(user = %self.session.user_id, "logging out");
        self.session.end();
        self.abort_tasks();
        self.state = DashboardState {
            load_generation: self.state.load_generation + 1,
            insight_generation: self.state.insight_generation + 1,
            ..DashboardState::default()
        };
        self.recompute_view();
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings and recompute the view. Invalid settings are rejected.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), CoreError> {
        settings.validate()?;
        self.budget_service = BudgetService::with_threshold(settings.near_limit_threshold);
        self.settings = settings;
        self.recompute_view();
        Ok(())
    }

    // ── View Model ──────────────────────────────────────────────────

    /// The current read-only view model.
    #[must_use]
    pub fn view_model(&self) -> &DashboardViewModel {
        &self.view
    }

    #[must_use]
    pub fn load_status(&self) -> LoadStatus {
        self.state.load_status
    }

    /// Owned copy of the derived figures, as handed to the insight generator.
    #[must_use]
    pub fn snapshot(&self) -> FinancialSnapshot {
        FinancialSnapshot {
            currency: self.settings.currency.clone(),
            summary: self.view.summary.clone(),
            spending: self.view.spending.clone(),
            budgets: self.view.budgets.clone(),
        }
    }

    // ── Internal ────────────────────────────────────────────────────

    fn apply_load(&mut self, load: LoadCompletion) -> bool {
        if load.generation != self.state.load_generation {
            debug!(
                generation = load.generation,
                latest = self.state.load_generation,
                range = %load.range,
                "ignoring superseded load"
            );
            return false;
        }
        self.state.load_task = None;

        match load.result {
            Ok(transactions) => {
                info!(
                    range = %load.range,
                    count = transactions.len(),
                    generation = load.generation,
                    "transactions loaded"
                );
                self.state.loaded = Some(LoadedData {
                    window: load.window,
                    transactions,
                });
                self.state.load_status = LoadStatus::Loaded;
                self.state.error = None;
            }
            Err(e) => {
                warn!(range = %load.range, error = %e, "transaction load failed; keeping previous data");
                self.state.load_status = LoadStatus::LoadFailed;
                self.state.error = Some(e);
            }
        }
        true
    }

    fn apply_insights(&mut self, completion: InsightCompletion) -> bool {
        if completion.generation != self.state.insight_generation
            || !self.state.insights.is_generating()
        {
            debug!(generation = completion.generation, "ignoring superseded insights");
            return false;
        }
        self.state.insight_task = None;

        match completion.result {
            Ok(insights) => {
                info!(count = insights.len(), "insights generated");
                self.state.insights.insights = insights;
                self.state.insights.status = InsightsStatus::Ready;
            }
            Err(e) => {
                warn!(error = %e, "insight generation failed; keeping previous insights");
                self.state.insights.status = InsightsStatus::Failed {
                    error: e.to_string(),
                    retry_available: true,
                };
            }
        }
        true
    }

    /// Rebuild the whole view model from the current state.
    ///
    /// The donut and budget lines are built from expense transactions only;
    /// income never counts as category spend. The summary and table use every
    /// loaded transaction.
    fn recompute_view(&mut self) {
        let transactions: &[Transaction] = self
            .state
            .loaded
            .as_ref()
            .map(|l| l.transactions.as_slice())
            .unwrap_or(&[]);

        // Budget colors first, explicit overrides win.
        let mut colors: HashMap<String, String> = self
            .settings
            .budgets
            .iter()
            .map(|b| (b.category.clone(), b.color.clone()))
            .collect();
        colors.extend(self.settings.category_colors.clone());

        let expenses = self
            .filter_service
            .apply_owned(transactions, TransactionFilter::Expense);
        let spending = self.category_service.aggregate(&expenses, &colors);
        let total_spent = self.category_service.total(&spending);
        let segments = self.category_service.segments(&spending);

        let budgets = self
            .budget_service
            .build_budgets(&spending, &self.settings.budgets);
        let budget_lines = self
            .budget_service
            .evaluate_all(&budgets, &self.settings.currency);

        let summary =
            self.summary_service
                .summarize(transactions, &budget_lines, &self.settings.savings_goal);
        let visible = self
            .filter_service
            .apply_owned(transactions, self.state.filter);

        let view = DashboardViewModel {
            greeting_name: self.session.greeting_name().to_string(),
            currency: self.settings.currency.clone(),
            selected_range: self.state.selected_range,
            loaded_window: self.state.loaded.as_ref().map(|l| l.window),
            filter: self.state.filter,
            load_status: self.state.load_status,
            is_loading: self.state.load_status == LoadStatus::Loading,
            error: self.state.error.as_ref().map(|e| e.to_string()),
            summary,
            spending: segments,
            total_spent,
            budgets: budget_lines,
            transaction_count: transactions.len(),
            transactions: visible,
            insights: self.state.insights.clone(),
        };
        debug!(
            status = ?view.load_status,
            visible = view.transactions.len(),
            total = view.transaction_count,
            "view model recomputed"
        );
        self.view = view;
    }

    fn ensure_authenticated(&self) -> Result<(), CoreError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(CoreError::NotAuthenticated)
        }
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn abort_tasks(&mut self) {
        if let Some(task) = self.state.load_task.take() {
            task.abort();
        }
        if let Some(task) = self.state.insight_task.take() {
            task.abort();
        }
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}
