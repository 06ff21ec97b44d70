//! Configuration loading utilities
//!
//! Environment variable overrides applied on top of file or default configuration.

use super::Config;
use crate::utils::error::{Result, ValidatorError};
use std::env;
use std::str::FromStr;
use tracing::debug;

impl Config {
    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Applying configuration overrides from environment");

        if let Some(base_url) = lookup("INVOICE_BASE_URL") {
            self.server.base_url = base_url;
        }
        if let Some(api_key) = lookup("INVOICE_API_KEY") {
            self.server.api_key = Some(api_key);
        }
        if let Some(api_secret) = lookup("INVOICE_API_SECRET") {
            self.server.api_secret = Some(api_secret);
        }
        if let Some(timeout) = lookup("INVOICE_TIMEOUT") {
            self.server.timeout = parse_var("INVOICE_TIMEOUT", &timeout)?;
        }
        if let Some(delay) = lookup("INVOICE_SETTLE_DELAY_MS") {
            self.batch.settle_delay_ms = parse_var("INVOICE_SETTLE_DELAY_MS", &delay)?;
        }
        if let Some(delay) = lookup("INVOICE_COMPLETION_DELAY_MS") {
            self.batch.completion_delay_ms = parse_var("INVOICE_COMPLETION_DELAY_MS", &delay)?;
        }
        if let Some(timeout) = lookup("INVOICE_ITEM_TIMEOUT_SECS") {
            self.batch.item_timeout_secs = parse_var("INVOICE_ITEM_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(level) = lookup("INVOICE_LOG_LEVEL") {
            self.logging.level = level.parse()?;
        }

        Ok(())
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ValidatorError::config(format!("Invalid {}: {}", name, e)))
}
