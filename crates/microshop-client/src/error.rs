//! # HTTP Client Errors
//!
//! Typed failures of a single request. Callers never see these directly:
//! [`ApiClient`](crate::ApiClient) logs them and flattens each one into
//! `ApiResponse { success: false, error: <Display> }`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL or endpoint path does not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Connection refused, DNS failure, timeout, TLS failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-2xx status.
    ///
    /// `message` is the server's `error` field when the body was an
    /// `ApiResponse`, otherwise a generic status line.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body was not the expected JSON.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl ClientError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
