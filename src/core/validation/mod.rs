//! AI validation of invoice documents
//!
//! The remote `recheck_invoice_with_ai` call, its request and result payloads,
//! and the list view formatting of the stored confidence score.

mod badge;
mod client;
mod types;


pub use badge::{BadgeColor, ConfidenceBadge};
pub use client::{HttpValidationClient, RECHECK_METHOD, ValidationClient, extract_server_message};
#[cfg(test)]
pub use client::MockValidationClient;
pub use types::{
    FieldComparison, InvoiceDoctype, RecheckRequest, ValidationDetails, ValidationResult,
    ValidationStatus,
};
