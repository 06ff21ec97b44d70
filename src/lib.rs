//! # invoice-validator
//!
//! Sequential AI validation of delivery platform invoices (Lieferando,
//! Uber Eats, Wolt) stored in an ERP.
//!
//! ## Features
//!
//! - **Batch runner**: One remote call at a time, in selection order, with
//!   progress callbacks and a settle delay between calls
//! - **Failure tolerant**: A failed or timed out item is tallied and the run
//!   moves on
//! - **Single recheck**: Per-document validation with a user-facing notice
//! - **Confidence badges**: Colored rendering of stored confidence values
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use invoice_validator::{BatchValidation, Config, HttpValidationClient};
//! use invoice_validator::cli::{ArgsListView, ConsolePresenter};
//! use invoice_validator::core::validation::InvoiceDoctype;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None).await?;
//!     let client = Arc::new(HttpValidationClient::new(&config.server)?);
//!     let validation = BatchValidation::new(client, &config.batch);
//!
//!     let list = ArgsListView::new(
//!         InvoiceDoctype::WoltInvoice,
//!         vec!["W-0001".to_string(), "W-0002".to_string()],
//!     );
//!     if let Some(report) = validation.confirm(&list, &ConsolePresenter).await {
//!         println!("{} of {} failed", report.failed, report.total);
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{Result, ValidatorError};

pub use core::batch::{
    BatchConfig, BatchHandle, BatchReport, BatchRunner, BatchSink, FnSink, ItemOutcome,
    ProgressEvent, WorkItem,
};
pub use core::trigger::{BatchPresenter, BatchValidation, ListView, Notice, recheck_document};
pub use core::validation::{
    ConfidenceBadge, HttpValidationClient, InvoiceDoctype, RecheckRequest, ValidationClient,
    ValidationResult, ValidationStatus,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Seconds since the epoch
    pub build_time: &'static str,
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
