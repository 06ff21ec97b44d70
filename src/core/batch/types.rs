//! Batch run types and data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// One document queued for a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Document name
    pub name: String,
    /// Display label, defaults to the name
    pub label: String,
}

impl WorkItem {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
        }
    }

    pub fn with_label(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

impl From<&str> for WorkItem {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for WorkItem {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Why an item failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The endpoint answered with an error
    Remote,
    /// The call did not finish within the per-item timeout
    Timeout,
    /// The request never got a usable answer
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    pub kind: FailureKind,
    pub reason: String,
}

/// Outcome of one remote call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ItemOutcome {
    Succeeded,
    Failed(ItemFailure),
}

impl ItemOutcome {
    pub fn failed(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self::Failed(ItemFailure {
            kind,
            reason: reason.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Result of one item in a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemResult {
    /// Index of the item in the run
    pub index: usize,
    pub item: WorkItem,
    pub outcome: ItemOutcome,
    /// Time spent in the remote call, settling delay excluded
    pub duration: Duration,
}

/// Progress notification, emitted before the call for `item` is issued
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub index: usize,
    pub total: usize,
    pub item: WorkItem,
}

impl ProgressEvent {
    /// Percentage of items started, see [`super::progress::percent`]
    pub fn percent(&self) -> f64 {
        super::progress::percent(self.index, self.total)
    }

    /// One-based position for display
    pub fn position(&self) -> usize {
        self.index + 1
    }
}

/// Lifecycle of a run: `Idle -> Running(index) -> Complete`, or `Dismissed`
/// when the driving UI went away before completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BatchState {
    Idle,
    Running { index: usize, total: usize },
    Complete { total: usize },
    Dismissed { index: usize, total: usize },
}

impl BatchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Dismissed { .. })
    }
}

/// Final tally of a run, handed to the completion sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    /// Number of items in the run
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Per-item results in run order
    pub results: Vec<BatchItemResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// The run was abandoned before every item was attempted
    pub dismissed: bool,
}

impl BatchReport {
    /// Items whose call was issued and settled
    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    pub fn is_complete(&self) -> bool {
        !self.dismissed && self.attempted() == self.total
    }

    pub fn failures(&self) -> impl Iterator<Item = (&WorkItem, &ItemFailure)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            ItemOutcome::Failed(failure) => Some((&r.item, failure)),
            ItemOutcome::Succeeded => None,
        })
    }

    pub fn failure_count(&self, kind: FailureKind) -> usize {
        self.failures().filter(|(_, f)| f.kind == kind).count()
    }

    pub fn elapsed(&self) -> Duration {
        (self.finished_at - self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}
