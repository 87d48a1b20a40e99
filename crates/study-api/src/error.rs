//! Error types for the study backend client

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("request to {path} failed with status {status}")]
    Status { status: u16, path: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// True when the caller should send the user to the login flow.
    pub fn is_authentication_required(&self) -> bool {
        matches!(self, ApiError::AuthenticationRequired(_))
    }
}

/// Failure below HTTP: connection refused, DNS, TLS, body read.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::new(error.to_string())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}
