//! Batch validation dialog of the invoice list views

use super::notice::Notice;
use crate::config::BatchSettings;
use crate::core::batch::progress::{self, COMPLETED_LABEL};
use crate::core::batch::{BatchConfig, BatchReport, BatchRunner, BatchSink, ProgressEvent, WorkItem};
use crate::core::validation::{InvoiceDoctype, RecheckRequest, ValidationClient};
use crate::utils::error::{Result, ValidatorError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// The list view the batch was triggered from
#[async_trait]
pub trait ListView: Send + Sync {
    fn doctype(&self) -> InvoiceDoctype;

    /// Names of the currently checked rows, in display order
    fn checked_items(&self) -> Vec<String>;

    async fn refresh(&self) -> Result<()>;
}

/// The dialog showing batch progress
pub trait BatchPresenter: Send + Sync {
    /// Disable (`true`) or re-enable the start button
    fn set_busy(&self, busy: bool);

    /// Replace the progress area content
    fn render(&self, text: &str);

    fn hide(&self);

    /// Show an alert or message dialog
    fn notify(&self, notice: Notice);
}

/// Turn the current selection into work items, or the warning to show
/// instead when nothing is selected.
pub fn selection_guard(names: Vec<String>) -> std::result::Result<Vec<WorkItem>, Notice> {
    let items: Vec<WorkItem> = names
        .into_iter()
        .filter(|name| !name.trim().is_empty())
        .map(WorkItem::new)
        .collect();

    if items.is_empty() {
        return Err(Notice::warning(
            "Warning",
            "Please select the invoices you want to validate.",
        ));
    }
    Ok(items)
}

struct PresenterSink<'a, P: ?Sized> {
    presenter: &'a P,
}

impl<P: BatchPresenter + ?Sized> BatchSink for PresenterSink<'_, P> {
    fn on_progress(&self, event: &ProgressEvent) {
        self.presenter
            .render(&format!("{}\n{}", progress::progress_label(event), event.item.label));
    }

    fn on_complete(&self, _report: &BatchReport) {
        self.presenter.render(COMPLETED_LABEL);
        self.presenter.set_busy(false);
    }
}

/// Batch AI validation over the checked rows of a list view
pub struct BatchValidation<C: ValidationClient + ?Sized> {
    client: Arc<C>,
    runner: BatchRunner,
    completion_delay: Duration,
    dismissal: CancellationToken,
}

impl<C: ValidationClient + ?Sized + 'static> BatchValidation<C> {
    pub fn new(client: Arc<C>, settings: &BatchSettings) -> Self {
        Self {
            client,
            runner: BatchRunner::new(BatchConfig::from(settings)),
            completion_delay: settings.completion_delay(),
            dismissal: CancellationToken::new(),
        }
    }

    pub fn with_runner(client: Arc<C>, runner: BatchRunner, completion_delay: Duration) -> Self {
        Self {
            client,
            runner,
            completion_delay,
            dismissal: CancellationToken::new(),
        }
    }

    /// Tear the dialog down. A running batch stops at its next step and the
    /// presenter receives no further calls.
    pub fn dismiss(&self) {
        self.dismissal.cancel();
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissal.is_cancelled()
    }

    /// Token for teardown code that does not hold the dialog itself
    pub fn dismissal_token(&self) -> CancellationToken {
        self.dismissal.clone()
    }

    /// Primary action of the dialog.
    ///
    /// Reads the selection at confirmation time. An empty selection shows a
    /// warning and returns `None` without starting a run. Otherwise every
    /// checked document is validated in order, the dialog is closed after the
    /// completion delay, the list is refreshed and a completion alert raised.
    /// After [`dismiss`](Self::dismiss) the run stops early and the returned
    /// report is marked dismissed.
    pub async fn confirm<L, P>(&self, list: &L, presenter: &P) -> Option<BatchReport>
    where
        L: ListView + ?Sized,
        P: BatchPresenter + ?Sized,
    {
        let items = match selection_guard(list.checked_items()) {
            Ok(items) => items,
            Err(notice) => {
                presenter.notify(notice);
                return None;
            }
        };

        let doctype = list.doctype();
        info!(%doctype, count = items.len(), "Starting batch AI validation");

        presenter.set_busy(true);
        presenter.render(&progress::started_label(items.len()));

        let client = self.client.clone();
        let operation = move |item: WorkItem| {
            let client = client.clone();
            async move {
                client
                    .recheck(&RecheckRequest::batch(doctype, item.name))
                    .await
            }
        };

        let sink = PresenterSink { presenter };
        let report = match self
            .runner
            .run_until(items, operation, &sink, &self.dismissal)
            .await
        {
            Ok(report) => report,
            Err(ValidatorError::EmptySelection) => {
                presenter.set_busy(false);
                return None;
            }
            Err(e) => {
                warn!("Batch validation could not run: {}", e);
                presenter.set_busy(false);
                presenter.notify(Notice::error(e.user_message()));
                return None;
            }
        };

        if report.dismissed {
            debug!(%doctype, attempted = report.attempted(), "Batch dialog dismissed during run");
            return Some(report);
        }

        tokio::select! {
            biased;
            _ = self.dismissal.cancelled() => {
                debug!(%doctype, "Batch dialog dismissed before closing");
                return Some(report);
            }
            _ = tokio::time::sleep(self.completion_delay) => {}
        }
        presenter.hide();

        if let Err(e) = list.refresh().await {
            warn!(%doctype, "Failed to refresh list view: {}", e);
        }

        presenter.notify(Notice::success(progress::completion_message(&report)));
        Some(report)
    }
}
