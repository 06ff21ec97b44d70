//! Progress display text for batch runs

use super::types::{BatchReport, ProgressEvent};

/// Label shown once the run has finished, before the dialog closes
pub const COMPLETED_LABEL: &str = "Completed! Refreshing list view...";

/// Label shown while the dialog waits for confirmation
pub const READY_LABEL: &str = "Ready...";

/// Share of items *started* when item `index` is about to be processed.
///
/// The last item reports `(total - 1) / total`, never 100%; completion is
/// signalled separately.
pub fn percent(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (index as f64 / total as f64) * 100.0
}

/// `Processing: 2/3 (33.3%)`
pub fn progress_label(event: &ProgressEvent) -> String {
    format!(
        "Processing: {}/{} ({:.1}%)",
        event.position(),
        event.total,
        event.percent()
    )
}

pub fn started_label(count: usize) -> String {
    format!("{} selected invoices will be validated...", count)
}

/// Alert raised after the list view has been refreshed
pub fn completion_message(report: &BatchReport) -> String {
    let mut message = format!(
        "{} invoice validations completed. Results are shown in the list view.",
        report.total
    );
    if report.failed > 0 {
        message.push_str(&format!(" {} of them failed.", report.failed));
    }
    message
}
