//! Validators for the configuration sections

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::{debug, warn};
use url::Url;

/// Check that the ERP base URL is an absolute http(s) URL with a host
pub fn validate_base_url(url_str: &str) -> Result<(), String> {
    let url = Url::parse(url_str).map_err(|e| format!("base_url has invalid URL format: {}", e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "base_url must use http:// or https:// scheme, got: {}",
                scheme
            ));
        }
    }

    if url.host_str().is_none() {
        return Err("base_url must have a valid host".to_string());
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err("base_url must not carry a query or fragment".to_string());
    }

    Ok(())
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating server configuration");

        validate_base_url(&self.base_url)?;

        if self.timeout == 0 {
            return Err("Server timeout must be greater than 0".to_string());
        }

        match (&self.api_key, &self.api_secret) {
            (Some(_), None) => return Err("api_key is set but api_secret is missing".to_string()),
            (None, Some(_)) => return Err("api_secret is set but api_key is missing".to_string()),
            (None, None) => warn!("No API credentials configured, requests will be anonymous"),
            _ => {}
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for BatchSettings {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating batch configuration");

        if self.item_timeout_secs == 0 {
            return Err("item_timeout_secs must be greater than 0".to_string());
        }

        if self.item_timeout_secs > 3600 {
            return Err("item_timeout_secs should not exceed 1 hour".to_string());
        }

        if self.settle_delay_ms > 60_000 {
            return Err("settle_delay_ms should not exceed 60 seconds".to_string());
        }

        if self.completion_delay_ms > 60_000 {
            return Err("completion_delay_ms should not exceed 60 seconds".to_string());
        }

        Ok(())
    }
}

impl Validate for FormConfig {
    fn validate(&self) -> Result<(), String> {
        if self.save_debounce_ms == 0 {
            return Err("save_debounce_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}
