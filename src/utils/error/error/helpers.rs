//! Helper functions for creating specific error types

use super::types::ValidatorError;

/// Helper functions for creating specific errors
impl ValidatorError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn remote<S: Into<String>>(status: Option<u16>, message: S) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Text suitable for showing to a user, without the variant prefix
    /// for errors that came back from the server.
    pub fn user_message(&self) -> String {
        match self {
            Self::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this error was produced by the per-item timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
