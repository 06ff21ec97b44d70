//! Lieferando invoice analysis form customizations
//!
//! Editing one of the driving fields of a saved analysis document schedules a
//! debounced save, so a burst of edits results in a single save.

use super::debounce::Debouncer;
use crate::config::FormConfig;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

/// Fee that is sometimes entered as a percentage instead of a fraction
const MISENTERED_CULINARY_FEE: f64 = 35.0;
const CULINARY_FEE_DEFAULT: f64 = 0.35;

/// Fields of an analysis document the form reacts to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    pub name: Option<String>,
    /// Linked Lieferando invoice
    pub lieferando_invoice: Option<String>,
    pub service_fee_rate: Option<f64>,
    pub culinary_account_fee: Option<f64>,
    /// Not saved yet
    #[serde(default)]
    pub is_new: bool,
}

impl AnalysisDocument {
    /// Linked to a Lieferando invoice; a blank link counts as unlinked
    pub fn is_linked(&self) -> bool {
        self.lieferando_invoice
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}

/// A field edit on the form
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    LieferandoInvoice(Option<String>),
    ServiceFeeRate(Option<f64>),
    CulinaryAccountFee(Option<f64>),
}

/// Persists the document
#[async_trait]
pub trait FormSaver: Send + Sync {
    async fn save(&self, doc: &AnalysisDocument) -> Result<()>;
}

pub struct AnalysisForm<S: FormSaver + ?Sized> {
    doc: AnalysisDocument,
    saver: Arc<S>,
    debouncer: Debouncer,
}

impl<S: FormSaver + ?Sized + 'static> AnalysisForm<S> {
    pub fn new(doc: AnalysisDocument, saver: Arc<S>, config: &FormConfig) -> Self {
        Self {
            doc,
            saver,
            debouncer: Debouncer::new(config.save_debounce()),
        }
    }

    pub fn doc(&self) -> &AnalysisDocument {
        &self.doc
    }

    /// Load hook: a new document carrying `35` as culinary account fee is
    /// corrected to `0.35`. Returns whether the value was changed.
    pub fn on_load(&mut self) -> bool {
        if self.doc.is_new && self.doc.culinary_account_fee == Some(MISENTERED_CULINARY_FEE) {
            debug!("Correcting culinary_account_fee from 35 to 0.35");
            self.doc.culinary_account_fee = Some(CULINARY_FEE_DEFAULT);
            return true;
        }
        false
    }

    /// Apply an edit and schedule a save when the document qualifies.
    /// Returns whether a save was scheduled.
    pub fn apply(&mut self, change: FieldChange) -> bool {
        let linked = self.doc.is_linked();

        let should_save = match change {
            FieldChange::LieferandoInvoice(value) => {
                self.doc.lieferando_invoice = value;
                self.doc.is_linked()
            }
            FieldChange::ServiceFeeRate(value) => {
                self.doc.service_fee_rate = value;
                linked && value.is_some_and(|rate| rate != 0.0)
            }
            FieldChange::CulinaryAccountFee(value) => {
                self.doc.culinary_account_fee = value;
                linked && value.is_some()
            }
        };

        if !should_save || self.doc.is_new {
            return false;
        }

        let saver = self.saver.clone();
        let snapshot = self.doc.clone();
        self.debouncer.trigger(move || async move {
            if let Err(e) = saver.save(&snapshot).await {
                error!(name = ?snapshot.name, "Failed to save analysis document: {}", e);
            }
        });
        true
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending()
    }
}
