//! Remote dialog-service error types

use thiserror::Error;

/// Errors surfaced by the remote dialog service or the HTTP layer under it.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The service answered with a non-success status
    #[error("Dialog service error {status}: {body}")]
    Api { status: u16, body: String },

    /// The addressed resource does not exist
    #[error("{kind} '{identifier}' not found")]
    NotFound { kind: String, identifier: String },

    /// The request itself failed (connect, timeout, TLS, ...)
    #[error("Request to dialog service failed: {source}")]
    Request {
        #[from]
        source: reqwest::Error,
    },

    /// The response body could not be decoded into the expected shape
    #[error("Unexpected response from dialog service: {message}")]
    UnexpectedResponse { message: String },
}

impl ServiceError {
    /// Create an API error from a status code and raw body text
    pub fn api(status: u16, body: &str) -> Self {
        Self::Api {
            status,
            body: body.to_string(),
        }
    }

    /// Create a not-found error
    pub fn not_found(kind: &str, identifier: &str) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            identifier: identifier.to_string(),
        }
    }

    /// Wrap a transport-level request failure
    pub fn from_request(source: reqwest::Error) -> Self {
        Self::Request { source }
    }

    /// Create an unexpected-response error
    pub fn unexpected_response(message: &str) -> Self {
        Self::UnexpectedResponse {
            message: message.to_string(),
        }
    }

    /// True when the failure may succeed on a retry (5xx or transport).
    ///
    /// Only idempotent export reads are retried by the client; this never
    /// applies to the append upsert.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status >= 500,
            Self::Request { .. } => true,
            _ => false,
        }
    }
}
