//! "Recheck with AI" action of a single invoice document

use super::notice::{Indicator, Notice};
use crate::core::validation::{InvoiceDoctype, RecheckRequest, ValidationClient, ValidationResult};
use tracing::{info, warn};

/// Shown when a failure carries no text
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Outcome of a single recheck: the result, if any, and what to tell the user
#[derive(Debug, Clone)]
pub struct Recheck {
    pub result: Option<ValidationResult>,
    pub notice: Notice,
}

impl Recheck {
    /// The form should reload the document to show the stored fields
    pub fn reload_required(&self) -> bool {
        self.result.is_some()
    }
}

/// Validate one document, outside of any batch, with server messages enabled
pub async fn recheck_document<C>(client: &C, doctype: InvoiceDoctype, name: &str) -> Recheck
where
    C: ValidationClient + ?Sized,
{
    let request = RecheckRequest::single(doctype, name);

    match client.recheck(&request).await {
        Ok(result) => {
            info!(%doctype, name, status = %result.status, "AI validation completed");
            let confidence = result.confidence.unwrap_or(0.0) * 100.0;
            let indicator = if result.is_valid() {
                Indicator::Green
            } else {
                Indicator::Orange
            };
            let notice = Notice::success(format!(
                "AI validation completed: {} (Confidence: {:.1}%)",
                result.status, confidence
            ))
            .with_indicator(indicator);

            Recheck {
                result: Some(result),
                notice,
            }
        }
        Err(e) => {
            warn!(%doctype, name, "AI validation failed: {}", e);
            let text = e.user_message();
            let text = if text.trim().is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                text
            };

            Recheck {
                result: None,
                notice: Notice::error(format!("Error: {}", text)),
            }
        }
    }
}
