//! Error types for the workspace deployment client
//!
//! Errors are organized into categories that follow the failure taxonomy of
//! the deployment operations: input validation, remote service failures, and
//! local file I/O (backups, CSV input).

use thiserror::Error;

pub mod io;
pub mod service;
pub mod validation;

pub use self::io::IoError;
pub use self::service::ServiceError;
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the workspace deployment client
///
/// - Validation errors: bad or missing input, raised before any remote call
/// - Service errors: the dialog service rejected or failed a request
/// - I/O errors: backup files and CSV input
#[derive(Error, Debug)]
pub enum Error {
    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Remote dialog-service errors
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Local file I/O errors
    #[error(transparent)]
    Io(#[from] IoError),
}

impl Error {
    /// True when the error is a best-effort-deletable service failure:
    /// either the resource was absent or the request itself failed.
    ///
    /// The conflict clearer uses this to decide which delete failures to
    /// absorb.
    pub fn is_ignorable_delete_failure(&self) -> bool {
        matches!(
            self,
            Error::Service(ServiceError::NotFound { .. })
                | Error::Service(ServiceError::Request { .. })
                | Error::Service(ServiceError::Api { .. })
        )
    }
}

// Conversions from external error types

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Service(ServiceError::from_request(source))
    }
}

impl From<csv::Error> for Error {
    fn from(source: csv::Error) -> Self {
        Self::Io(IoError::csv(source))
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Io(IoError::json(source))
    }
}
