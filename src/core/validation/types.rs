//! Request and result payloads of the validation endpoint

use crate::utils::error::ValidatorError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Invoice document types that carry AI validation fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceDoctype {
    #[serde(rename = "Lieferando Invoice")]
    LieferandoInvoice,
    #[serde(rename = "Uber Eats Invoice")]
    UberEatsInvoice,
    #[serde(rename = "Wolt Invoice")]
    WoltInvoice,
}

impl InvoiceDoctype {
    pub const ALL: [InvoiceDoctype; 3] = [
        InvoiceDoctype::LieferandoInvoice,
        InvoiceDoctype::UberEatsInvoice,
        InvoiceDoctype::WoltInvoice,
    ];

    /// Doctype name as the ERP knows it
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceDoctype::LieferandoInvoice => "Lieferando Invoice",
            InvoiceDoctype::UberEatsInvoice => "Uber Eats Invoice",
            InvoiceDoctype::WoltInvoice => "Wolt Invoice",
        }
    }
}

impl fmt::Display for InvoiceDoctype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceDoctype {
    type Err = ValidatorError;

    /// Accepts the ERP name as well as snake/kebab-case and the bare platform name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "lieferandoinvoice" | "lieferando" => Ok(InvoiceDoctype::LieferandoInvoice),
            "ubereatsinvoice" | "ubereats" => Ok(InvoiceDoctype::UberEatsInvoice),
            "woltinvoice" | "wolt" => Ok(InvoiceDoctype::WoltInvoice),
            _ => {
                let known: Vec<&str> = Self::ALL.iter().map(|d| d.as_str()).collect();
                Err(ValidatorError::invalid_request(format!(
                    "Unknown invoice doctype: {} (expected one of: {})",
                    s,
                    known.join(", ")
                )))
            }
        }
    }
}

/// Arguments of the `recheck_invoice_with_ai` method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecheckRequest {
    pub doctype: InvoiceDoctype,
    /// Document name
    pub name: String,
    /// When false the server suppresses its own success / error message
    pub show_message: bool,
}

impl RecheckRequest {
    /// Request issued from a batch run, with server messages suppressed
    pub fn batch(doctype: InvoiceDoctype, name: impl Into<String>) -> Self {
        Self {
            doctype,
            name: name.into(),
            show_message: false,
        }
    }

    /// Request issued from the per-document recheck action
    pub fn single(doctype: InvoiceDoctype, name: impl Into<String>) -> Self {
        Self {
            doctype,
            name: name.into(),
            show_message: true,
        }
    }
}

/// Overall verdict of a validation. The payload is model generated, so any
/// casing is accepted and anything unrecognised becomes `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum ValidationStatus {
    Valid,
    #[serde(rename = "Issues Found")]
    IssuesFound,
    Error,
    #[default]
    Unknown,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "Valid",
            ValidationStatus::IssuesFound => "Issues Found",
            ValidationStatus::Error => "Error",
            ValidationStatus::Unknown => "Unknown",
        }
    }
}

impl From<&str> for ValidationStatus {
    fn from(value: &str) -> Self {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "valid" => ValidationStatus::Valid,
            "issuesfound" | "issues" => ValidationStatus::IssuesFound,
            "error" => ValidationStatus::Error,
            _ => ValidationStatus::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for ValidationStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(text) => ValidationStatus::from(text.as_str()),
            _ => ValidationStatus::Unknown,
        })
    }
}

/// Accepts a number, a numeric string (optionally with a trailing `%`) or
/// nothing. A percentage above 1 is scaled down to a fraction.
fn lenient_confidence<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(text) => {
            let trimmed = text.trim();
            let (number, percent) = match trimmed.strip_suffix('%') {
                Some(rest) => (rest.trim(), true),
                None => (trimmed, false),
            };
            number.parse::<f64>().ok().map(|v| if percent { v / 100.0 } else { v })
        }
        _ => None,
    };
    Ok(value
        .filter(|v| v.is_finite())
        .map(|v| if v > 1.0 { v / 100.0 } else { v }))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(text) => {
            matches!(text.trim().to_lowercase().as_str(), "true" | "yes")
        }
        _ => false,
    })
}

/// Keeps only the string entries of a list, tolerating a missing or
/// non-list value.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        serde_json::Value::String(text) if !text.trim().is_empty() => vec![text],
        _ => Vec::new(),
    })
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compared field. Values are kept as raw JSON since the model may
/// answer with strings or numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldComparison {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub pdf_value: serde_json::Value,
    #[serde(default)]
    pub doctype_value: serde_json::Value,
    #[serde(rename = "match", default, deserialize_with = "lenient_bool")]
    pub matches: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationDetails {
    /// In the PDF but not in the document
    #[serde(default, deserialize_with = "lenient_strings")]
    pub missing_fields: Vec<String>,
    /// Present in both but different
    #[serde(default, deserialize_with = "lenient_strings")]
    pub incorrect_fields: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub extras_in_pdf: Vec<String>,
    #[serde(default)]
    pub field_comparisons: Vec<FieldComparison>,
}

/// Result payload returned by the validation endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(default)]
    pub status: ValidationStatus,
    /// Confidence in `0.0..=1.0`
    #[serde(default, deserialize_with = "lenient_confidence")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub details: ValidationDetails,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub recommendations: Vec<String>,
}

impl ValidationResult {
    /// Confidence as the percentage stored on the document.
    /// A zero or missing confidence is stored as empty.
    pub fn confidence_percent(&self) -> Option<f64> {
        self.confidence
            .filter(|c| *c != 0.0)
            .map(|c| c * 100.0)
    }

    /// Result standing in for a payload that could not be read. The call
    /// itself succeeded.
    pub fn unreadable(summary: impl Into<String>) -> Self {
        Self {
            status: ValidationStatus::Unknown,
            summary: summary.into(),
            ..Default::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ValidationStatus::Valid
    }

    pub fn mismatched_fields(&self) -> impl Iterator<Item = &FieldComparison> {
        self.details.field_comparisons.iter().filter(|c| !c.matches)
    }
}
