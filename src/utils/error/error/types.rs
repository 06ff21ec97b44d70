//! Error types for the validator

use thiserror::Error;

/// Result type alias for the validator
pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Main error type for the validator
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote validation endpoint reported a failure
    #[error("Remote error: {message}")]
    Remote {
        /// HTTP status, when the failure came back over HTTP
        status: Option<u16>,
        /// Server-provided error text
        message: String,
    },

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// A batch was requested without any selected documents
    #[error("No documents selected")]
    EmptySelection,

    /// Invalid request errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
