//! Sequential batch runner
//!
//! Drives one asynchronous operation per item, strictly in order, with a
//! settling delay between items. Failures are recorded and the run moves on;
//! the completion sink is invoked exactly once after the last item settled.

use super::types::{
    BatchItemResult, BatchReport, BatchState, FailureKind, ItemOutcome, ProgressEvent, WorkItem,
};
use crate::config::BatchSettings;
use crate::utils::error::{Result, ValidatorError};
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

/// Configuration for batch runs
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Pause after each item before the next call (default: 100ms)
    pub settle_delay: Duration,
    /// Upper bound for a single call; a timeout counts as a failure (default: 120s)
    pub item_timeout: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(100),
            item_timeout: Duration::from_secs(120),
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn with_item_timeout(mut self, item_timeout: Duration) -> Self {
        self.item_timeout = item_timeout;
        self
    }
}

impl From<&BatchSettings> for BatchConfig {
    fn from(settings: &BatchSettings) -> Self {
        Self {
            settle_delay: settings.settle_delay(),
            item_timeout: settings.item_timeout(),
        }
    }
}

/// Receives progress and completion notifications of a run
pub trait BatchSink: Send + Sync {
    /// Called before the call for `event.item` is issued
    fn on_progress(&self, event: &ProgressEvent);

    /// Called once, after the last item's settling delay
    fn on_complete(&self, report: &BatchReport);
}

/// [`BatchSink`] built from two closures: `(index, total, item)` and `(total)`
pub struct FnSink<P, C> {
    on_progress: P,
    on_complete: C,
}

impl<P, C> FnSink<P, C>
where
    P: Fn(usize, usize, &WorkItem) + Send + Sync,
    C: Fn(usize) + Send + Sync,
{
    pub fn new(on_progress: P, on_complete: C) -> Self {
        Self {
            on_progress,
            on_complete,
        }
    }
}

impl<P, C> BatchSink for FnSink<P, C>
where
    P: Fn(usize, usize, &WorkItem) + Send + Sync,
    C: Fn(usize) + Send + Sync,
{
    fn on_progress(&self, event: &ProgressEvent) {
        (self.on_progress)(event.index, event.total, &event.item)
    }

    fn on_complete(&self, report: &BatchReport) {
        (self.on_complete)(report.total)
    }
}

/// State of one run, owned by the task driving it
struct BatchRun {
    id: Uuid,
    items: Vec<WorkItem>,
    cursor: usize,
    results: Vec<BatchItemResult>,
    started_at: chrono::DateTime<Utc>,
}

impl BatchRun {
    fn new(items: Vec<WorkItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            items,
            cursor: 0,
            results: Vec::new(),
            started_at: Utc::now(),
        }
    }

    fn total(&self) -> usize {
        self.items.len()
    }

    fn is_complete(&self) -> bool {
        self.cursor >= self.total()
    }

    fn progress(&self) -> ProgressEvent {
        ProgressEvent {
            index: self.cursor,
            total: self.total(),
            item: self.items[self.cursor].clone(),
        }
    }

    fn record(&mut self, outcome: ItemOutcome, duration: Duration) {
        self.results.push(BatchItemResult {
            index: self.cursor,
            item: self.items[self.cursor].clone(),
            outcome,
            duration,
        });
    }

    fn advance(&mut self) {
        if self.cursor < self.total() {
            self.cursor += 1;
        }
    }

    fn into_report(self, dismissed: bool) -> BatchReport {
        let succeeded = self
            .results
            .iter()
            .filter(|r| r.outcome.is_success())
            .count();
        let failed = self.results.len() - succeeded;

        BatchReport {
            run_id: self.id,
            total: self.items.len(),
            succeeded,
            failed,
            results: self.results,
            started_at: self.started_at,
            finished_at: Utc::now(),
            dismissed,
        }
    }
}

fn classify(error: &ValidatorError) -> FailureKind {
    match error {
        ValidatorError::Timeout(_) => FailureKind::Timeout,
        ValidatorError::Remote { .. } => FailureKind::Remote,
        _ => FailureKind::Transport,
    }
}

/// Handle to a run started with [`BatchRunner::start`]
pub struct BatchHandle {
    id: Uuid,
    join: JoinHandle<BatchReport>,
    token: CancellationToken,
    state: watch::Receiver<BatchState>,
}

impl BatchHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Latest published state
    pub fn state(&self) -> BatchState {
        *self.state.borrow()
    }

    /// A receiver for following state changes
    pub fn subscribe(&self) -> watch::Receiver<BatchState> {
        self.state.clone()
    }

    /// Detach the run from its UI. No further progress or completion
    /// notifications are delivered; the in-flight call is abandoned.
    pub fn dismiss(&self) {
        self.token.cancel();
    }

    pub fn is_dismissed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the run to finish and return its report
    pub async fn wait(self) -> Result<BatchReport> {
        self.join
            .await
            .map_err(|e| ValidatorError::internal(format!("Batch run task failed: {}", e)))
    }
}

/// Runs an operation over a sequence of items, one at a time
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Start a run in the background and return immediately.
    ///
    /// Fails with [`ValidatorError::EmptySelection`] when `items` is empty;
    /// callers are expected to reject empty selections before getting here.
    pub fn start<F, Fut, R, S>(
        &self,
        items: Vec<WorkItem>,
        operation: F,
        sink: Arc<S>,
    ) -> Result<BatchHandle>
    where
        F: Fn(WorkItem) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R>> + Send + 'static,
        R: Send + 'static,
        S: BatchSink + ?Sized + 'static,
    {
        if items.is_empty() {
            return Err(ValidatorError::EmptySelection);
        }

        let run = BatchRun::new(items);
        let id = run.id;
        let token = CancellationToken::new();
        let (state_tx, state_rx) = watch::channel(BatchState::Idle);

        let config = self.config.clone();
        let task_token = token.clone();
        let span = info_span!("batch_run", run_id = %id);

        let join = tokio::spawn(
            async move { drive(config, run, operation, sink.as_ref(), &task_token, &state_tx).await }
                .instrument(span),
        );

        Ok(BatchHandle {
            id,
            join,
            token,
            state: state_rx,
        })
    }

    /// Run to completion on the current task
    pub async fn run<F, Fut, R, S>(
        &self,
        items: Vec<WorkItem>,
        operation: F,
        sink: &S,
    ) -> Result<BatchReport>
    where
        F: Fn(WorkItem) -> Fut,
        Fut: Future<Output = Result<R>>,
        S: BatchSink + ?Sized,
    {
        self.run_until(items, operation, sink, &CancellationToken::new())
            .await
    }

    /// Like [`run`](Self::run), but stops notifying `sink` once `token` is
    /// cancelled. The returned report is then marked dismissed.
    pub async fn run_until<F, Fut, R, S>(
        &self,
        items: Vec<WorkItem>,
        operation: F,
        sink: &S,
        token: &CancellationToken,
    ) -> Result<BatchReport>
    where
        F: Fn(WorkItem) -> Fut,
        Fut: Future<Output = Result<R>>,
        S: BatchSink + ?Sized,
    {
        if items.is_empty() {
            return Err(ValidatorError::EmptySelection);
        }

        let run = BatchRun::new(items);
        let span = info_span!("batch_run", run_id = %run.id);
        let (state_tx, _state_rx) = watch::channel(BatchState::Idle);

        Ok(drive(self.config.clone(), run, operation, sink, token, &state_tx)
            .instrument(span)
            .await)
    }
}

async fn drive<F, Fut, R, S>(
    config: BatchConfig,
    mut run: BatchRun,
    operation: F,
    sink: &S,
    token: &CancellationToken,
    state: &watch::Sender<BatchState>,
) -> BatchReport
where
    F: Fn(WorkItem) -> Fut,
    Fut: Future<Output = Result<R>>,
    S: BatchSink + ?Sized,
{
    let total = run.total();
    info!(total, "Starting batch run");

    loop {
        if token.is_cancelled() {
            return dismissed(run, state);
        }

        if run.is_complete() {
            state.send_replace(BatchState::Complete { total });
            let report = run.into_report(false);
            info!(
                total,
                succeeded = report.succeeded,
                failed = report.failed,
                "Batch run completed"
            );
            sink.on_complete(&report);
            return report;
        }

        let event = run.progress();
        state.send_replace(BatchState::Running {
            index: event.index,
            total,
        });
        sink.on_progress(&event);
        debug!(index = event.index, name = %event.item.name, "Processing item");

        let started = Instant::now();
        let call = tokio::time::timeout(config.item_timeout, operation(event.item.clone()));
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => return dismissed(run, state),
            result = call => result,
        };
        let elapsed = started.elapsed();

        let outcome = match result {
            Ok(Ok(_)) => ItemOutcome::Succeeded,
            Ok(Err(e)) => {
                warn!(index = event.index, name = %event.item.name, "Item failed, continuing: {}", e);
                ItemOutcome::failed(classify(&e), e.user_message())
            }
            Err(_) => {
                warn!(
                    index = event.index,
                    name = %event.item.name,
                    "Item timed out after {:?}, continuing",
                    config.item_timeout
                );
                ItemOutcome::failed(
                    FailureKind::Timeout,
                    format!("Timed out after {:?}", config.item_timeout),
                )
            }
        };
        run.record(outcome, elapsed);

        tokio::select! {
            biased;
            _ = token.cancelled() => return dismissed(run, state),
            _ = tokio::time::sleep(config.settle_delay) => {}
        }

        run.advance();
    }
}

fn dismissed(run: BatchRun, state: &watch::Sender<BatchState>) -> BatchReport {
    let index = run.cursor;
    let total = run.total();
    state.send_replace(BatchState::Dismissed { index, total });
    info!(index, total, "Batch run dismissed before completion");
    run.into_report(true)
}
