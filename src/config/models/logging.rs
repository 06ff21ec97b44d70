//! Logging configuration

use crate::utils::logging::{LogFormat, LogLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
    /// Include the event target (module path) in each line
    #[serde(default)]
    pub with_target: bool,
}
