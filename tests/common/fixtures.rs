//! Test fixtures and fakes
//!
//! Stand-ins for the ERP, the list view and the progress dialog. All of them
//! record what they were asked to do.

use async_trait::async_trait;
use invoice_validator::core::trigger::{BatchPresenter, ListView, Notice};
use invoice_validator::core::validation::{
    FieldComparison, InvoiceDoctype, RecheckRequest, ValidationClient, ValidationDetails,
    ValidationResult, ValidationStatus,
};
use invoice_validator::utils::error::{Result, ValidatorError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Factory for validation results
pub struct ResultFactory;

impl ResultFactory {
    pub fn valid(confidence: f64) -> ValidationResult {
        ValidationResult {
            status: ValidationStatus::Valid,
            confidence: Some(confidence),
            summary: "All fields match".to_string(),
            ..Default::default()
        }
    }

    pub fn issues_found() -> ValidationResult {
        ValidationResult {
            status: ValidationStatus::IssuesFound,
            confidence: Some(0.5),
            summary: "Totals differ".to_string(),
            details: ValidationDetails {
                incorrect_fields: vec!["total_amount".to_string()],
                field_comparisons: vec![FieldComparison {
                    field: "total_amount".to_string(),
                    pdf_value: serde_json::json!("1234.56"),
                    doctype_value: serde_json::json!(1200.0),
                    matches: false,
                }],
                ..Default::default()
            },
            recommendations: vec!["Check the invoice total".to_string()],
        }
    }
}

/// Validation client answering from a script keyed by document name.
/// Names without an entry validate successfully.
#[derive(Default)]
pub struct ScriptedClient {
    failures: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<RecheckRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the call for `name` with a server message
    pub fn fail(mut self, name: &str, message: &str) -> Self {
        self.failures.insert(name.to_string(), message.to_string());
        self
    }

    /// Delay the answer for `name`
    pub fn slow(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn requests(&self) -> Vec<RecheckRequest> {
        self.requests.lock().clone()
    }

    pub fn requested_names(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.name.clone()).collect()
    }
}

#[async_trait]
impl ValidationClient for ScriptedClient {
    async fn recheck(&self, request: &RecheckRequest) -> Result<ValidationResult> {
        self.requests.lock().push(request.clone());

        if let Some(delay) = self.delays.get(&request.name) {
            tokio::time::sleep(*delay).await;
        }

        match self.failures.get(&request.name) {
            Some(message) => Err(ValidatorError::remote(Some(417), message.clone())),
            None => Ok(ResultFactory::valid(0.95)),
        }
    }
}

/// List view with a fixed selection
pub struct StaticListView {
    doctype: InvoiceDoctype,
    checked: Vec<String>,
    refreshes: AtomicUsize,
}

impl StaticListView {
    pub fn new(doctype: InvoiceDoctype, checked: &[&str]) -> Self {
        Self {
            doctype,
            checked: checked.iter().map(|s| s.to_string()).collect(),
            refreshes: AtomicUsize::new(0),
        }
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListView for StaticListView {
    fn doctype(&self) -> InvoiceDoctype {
        self.doctype
    }

    fn checked_items(&self) -> Vec<String> {
        self.checked.clone()
    }

    async fn refresh(&self) -> Result<()> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Presenter recording everything shown to the user
#[derive(Default)]
pub struct RecordingPresenter {
    pub busy: Mutex<Vec<bool>>,
    pub rendered: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<Notice>>,
    pub hidden: AtomicUsize,
}

impl RecordingPresenter {
    pub fn rendered(&self) -> Vec<String> {
        self.rendered.lock().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn hidden(&self) -> usize {
        self.hidden.load(Ordering::SeqCst)
    }
}

impl BatchPresenter for RecordingPresenter {
    fn set_busy(&self, busy: bool) {
        self.busy.lock().push(busy);
    }

    fn render(&self, text: &str) {
        self.rendered.lock().push(text.to_string());
    }

    fn hide(&self) {
        self.hidden.fetch_add(1, Ordering::SeqCst);
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}
