//! User-facing messages

use serde::Serialize;
use std::fmt;

/// Color of an alert or message dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Green,
    Orange,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: Option<String>,
    pub message: String,
    pub indicator: Indicator,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            indicator: Indicator::Green,
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            message: message.into(),
            indicator: Indicator::Orange,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            indicator: Indicator::Red,
        }
    }

    pub fn with_indicator(mut self, indicator: Indicator) -> Self {
        self.indicator = indicator;
        self
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{}: {}", title, self.message),
            None => f.write_str(&self.message),
        }
    }
}
