//! Configuration management for the validator
//!
//! This module handles loading, validation, and management of all configuration.

pub mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, ValidatorError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// ERP connection
    #[serde(default)]
    pub server: ServerConfig,
    /// Batch runner pacing
    #[serde(default)]
    pub batch: BatchSettings,
    /// Form customizations
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_file(path.as_ref()).await?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Read and parse a file without validating it
    async fn read_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ValidatorError::config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| ValidatorError::config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, then apply environment overrides
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok()).await
    }

    /// Load from `path` when given, apply overrides from `lookup`, then
    /// validate the merged result once
    pub async fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::read_file(path).await?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| ValidatorError::config(format!("Server config error: {}", e)))?;

        self.batch
            .validate()
            .map_err(|e| ValidatorError::config(format!("Batch config error: {}", e)))?;

        self.form
            .validate()
            .map_err(|e| ValidatorError::config(format!("Form config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ValidatorError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
