//! Configuration data models
//!
//! This module defines all configuration structures used by the validator.

#![allow(missing_docs)]

pub mod batch;
pub mod form;
pub mod logging;
pub mod server;

// Re-export all configuration types
pub use batch::*;
pub use form::*;
pub use logging::*;
pub use server::*;

/// Default ERP base URL
pub fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

/// Default HTTP timeout in seconds
pub fn default_timeout() -> u64 {
    180
}

pub fn default_user_agent() -> String {
    format!("invoice-validator/{}", env!("CARGO_PKG_VERSION"))
}

/// Pause between two remote calls of a batch
pub fn default_settle_delay_ms() -> u64 {
    100
}

/// Pause between the "done" display and closing the dialog
pub fn default_completion_delay_ms() -> u64 {
    500
}

/// Upper bound for a single validation call
pub fn default_item_timeout_secs() -> u64 {
    120
}

pub fn default_save_debounce_ms() -> u64 {
    300
}
