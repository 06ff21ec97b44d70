//! Batch runner pacing configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Delay after each item before the next call is issued
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Delay between the completed display and closing the dialog
    #[serde(default = "default_completion_delay_ms")]
    pub completion_delay_ms: u64,
    /// Per-item call timeout; a timeout counts as a failed item
    #[serde(default = "default_item_timeout_secs")]
    pub item_timeout_secs: u64,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            completion_delay_ms: default_completion_delay_ms(),
            item_timeout_secs: default_item_timeout_secs(),
        }
    }
}

impl BatchSettings {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    pub fn item_timeout(&self) -> Duration {
        Duration::from_secs(self.item_timeout_secs)
    }
}
