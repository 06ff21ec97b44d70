//! ERP server connection configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the ERP hosting the validation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the ERP site, without the `/api` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key of the integration user
    #[serde(default)]
    pub api_key: Option<String>,
    /// API secret of the integration user
    #[serde(default)]
    pub api_secret: Option<String>,
    /// HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_secret: None,
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ServerConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// `Authorization` header value, when both halves of the token are set
    pub fn authorization(&self) -> Option<String> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some(format!("token {}:{}", key, secret)),
            _ => None,
        }
    }
}
