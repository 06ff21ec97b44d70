//! Remote validation call over the ERP's RPC endpoint

use super::types::{RecheckRequest, ValidationResult};
use crate::config::ServerConfig;
use crate::utils::error::{Result, ValidatorError};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

/// Dotted path of the whitelisted server method
pub const RECHECK_METHOD: &str = "invoice.api.invoice_ai_validation.recheck_invoice_with_ai";

/// The remote AI validation call.
///
/// Implementations return the parsed result payload on success and a
/// [`ValidatorError`] carrying the server's error text on failure. The batch
/// runner never looks at the payload.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ValidationClient: Send + Sync {
    async fn recheck(&self, request: &RecheckRequest) -> Result<ValidationResult>;
}

/// Success envelope of a method call. The payload is kept raw; any
/// non-null `message` means the server ran and stored the validation.
#[derive(Debug, Deserialize)]
struct MethodResponse {
    #[serde(default)]
    message: serde_json::Value,
}

/// Error body of a failed method call
#[derive(Debug, Default, Deserialize)]
struct MethodErrorBody {
    #[serde(default)]
    exception: Option<String>,
    #[serde(default, rename = "_server_messages")]
    server_messages: Option<String>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ServerMessage {
    #[serde(default)]
    message: Option<String>,
}

/// Extract the most specific error text from a failed method call body.
///
/// `_server_messages` is a JSON-encoded list of JSON-encoded message objects;
/// the last one is the message raised by the method. `exception` is used
/// next, with its exception class prefix removed.
pub fn extract_server_message(body: &str) -> Option<String> {
    let parsed: MethodErrorBody = serde_json::from_str(body).ok()?;

    if let Some(raw) = parsed.server_messages.as_deref() {
        let from_messages = serde_json::from_str::<Vec<String>>(raw)
            .ok()
            .and_then(|messages| {
                messages.iter().rev().find_map(|encoded| {
                    serde_json::from_str::<ServerMessage>(encoded)
                        .ok()
                        .and_then(|m| m.message)
                        .filter(|m| !m.trim().is_empty())
                })
            });
        if from_messages.is_some() {
            return from_messages;
        }
    }

    if let Some(exception) = parsed.exception.as_deref() {
        let text = match exception.split_once(": ") {
            Some((class, rest)) if !class.contains(' ') => rest,
            _ => exception,
        };
        if !text.trim().is_empty() {
            return Some(text.trim().to_string());
        }
    }

    match parsed.message {
        Some(serde_json::Value::String(text)) if !text.trim().is_empty() => Some(text),
        _ => None,
    }
}

/// [`ValidationClient`] posting to `{base_url}/api/method/<RECHECK_METHOD>`
#[derive(Debug, Clone)]
pub struct HttpValidationClient {
    client: Client,
    endpoint: String,
}

impl HttpValidationClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = config.authorization() {
            let mut value = HeaderValue::from_str(&token).map_err(|e| {
                ValidatorError::config(format!("Invalid API credentials: {}", e))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = ClientBuilder::new()
            .timeout(config.timeout_duration())
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()?;

        let endpoint = format!(
            "{}/api/method/{}",
            config.base_url.trim_end_matches('/'),
            RECHECK_METHOD
        );

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ValidationClient for HttpValidationClient {
    async fn recheck(&self, request: &RecheckRequest) -> Result<ValidationResult> {
        debug!(
            doctype = %request.doctype,
            name = %request.name,
            show_message = request.show_message,
            "Requesting AI validation"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ValidatorError::timeout(format!("Validation of {} timed out", request.name))
                } else {
                    ValidatorError::HttpClient(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = extract_server_message(&body)
                .unwrap_or_else(|| format!("Validation request failed with HTTP {}", status));
            warn!(name = %request.name, status = status.as_u16(), "Validation call failed: {}", message);
            return Err(ValidatorError::remote(Some(status.as_u16()), message));
        }

        let envelope: MethodResponse = serde_json::from_str(&body).map_err(|e| {
            ValidatorError::remote(
                Some(status.as_u16()),
                format!("Validation of {} returned an unreadable response: {}", request.name, e),
            )
        })?;

        if envelope.message.is_null() {
            return Err(ValidatorError::remote(
                Some(status.as_u16()),
                format!("Validation of {} returned no result", request.name),
            ));
        }

        Ok(parse_result(envelope.message, &request.name))
    }
}

/// Read the result payload without ever failing the call
fn parse_result(message: serde_json::Value, name: &str) -> ValidationResult {
    match message {
        serde_json::Value::Object(_) => serde_json::from_value(message).unwrap_or_else(|e| {
            warn!(name, "Validation result does not match the expected shape: {}", e);
            ValidationResult::unreadable(format!("Unreadable validation result: {}", e))
        }),
        serde_json::Value::String(text) => ValidationResult::unreadable(text),
        other => ValidationResult::unreadable(other.to_string()),
    }
}
