//! Trigger surfaces of AI validation
//!
//! The list view batch validation dialog and the per-document recheck action,
//! written against small traits standing in for the list view and dialog
//! widgets of the ERP.

mod batch_dialog;
mod notice;
mod recheck;

pub use batch_dialog::{BatchPresenter, BatchValidation, ListView, selection_guard};
pub use notice::{Indicator, Notice};
pub use recheck::{Recheck, UNKNOWN_ERROR, recheck_document};
