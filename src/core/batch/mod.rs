//! Sequential batch runner
//!
//! Runs one remote call per document, in order, with progress reporting,
//! per-item error tolerance and a single completion notification.

pub mod progress;
mod runner;
mod types;


pub use runner::{BatchConfig, BatchHandle, BatchRunner, BatchSink, FnSink};
pub use types::{
    BatchItemResult, BatchReport, BatchState, FailureKind, ItemFailure, ItemOutcome,
    ProgressEvent, WorkItem,
};
