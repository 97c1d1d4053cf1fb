//! Local file I/O error types

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors for backup files and CSV input.
#[derive(Error, Debug)]
pub enum IoError {
    /// Underlying filesystem failure
    #[error("File operation failed{}: {source}", path_suffix(.path))]
    File {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing failure
    #[error("Failed to parse CSV input: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON serialization failure while writing a backup
    #[error("Failed to serialize workspace export: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" for '{}'", p.display()),
        None => String::new(),
    }
}

impl IoError {
    /// Wrap a std I/O error without path context
    pub fn from_std(source: std::io::Error) -> Self {
        Self::File { path: None, source }
    }

    /// Wrap a std I/O error with the path it concerned
    pub fn file(path: &Path, source: std::io::Error) -> Self {
        Self::File {
            path: Some(path.to_path_buf()),
            source,
        }
    }

    /// Wrap a CSV error
    pub fn csv(source: csv::Error) -> Self {
        Self::Csv { source }
    }

    /// Wrap a JSON error
    pub fn json(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}
