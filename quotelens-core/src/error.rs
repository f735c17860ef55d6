//! Error types for quotelens operations

use serde::Serialize;

/// Structured error payload shared between service and client.
///
/// Used as the HTTP error body in quotelens-service and parsed from
/// backend responses in quotelens-client.
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: String,
}

impl ErrorEnvelope {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self::new("internal_error", msg, "Check service logs for details")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuotelensError {
    #[error("unexpected document uri format: {0}")]
    UriFormat(String),

    #[error("invalid capture pattern {pattern:?} for entity {entity:?}: {source}")]
    InvalidPattern {
        entity: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend error [{code}]: {message} ({hint})")]
    BackendError {
        code: String,
        message: String,
        hint: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
