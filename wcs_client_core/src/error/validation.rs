//! Validation related error types

use thiserror::Error;

/// Input validation errors, raised before any remote call is made.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required parameter was not supplied
    #[error("Argument '{parameter}' requires a value")]
    MissingParameter { parameter: String },

    /// A supplied parameter value is unusable
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// The requested source root node does not exist in the source export
    #[error("Specified root node '{identifier}' not found in source workspace")]
    RootNodeNotFound { identifier: String },

    /// Unrecognized branch insertion mode
    #[error("Invalid insertion mode '{mode}': expected 'sibling' or 'child'")]
    InvalidInsertMode { mode: String },

    /// Unrecognized CSV action token
    #[error("Invalid action '{action}' in row {row}: expected 'ADD' or 'REMOVE'")]
    InvalidAction { action: String, row: usize },

    /// A CSV row did not have the expected shape
    #[error("Malformed row {row}: expected columns action,entity,value,synonym")]
    MalformedRow { row: usize },
}

impl ValidationError {
    /// Create a missing parameter error
    pub fn missing_parameter(parameter: &str) -> Self {
        Self::MissingParameter {
            parameter: parameter.to_string(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a root-node-not-found error
    pub fn root_node_not_found(identifier: &str) -> Self {
        Self::RootNodeNotFound {
            identifier: identifier.to_string(),
        }
    }

    /// Create an invalid insertion mode error
    pub fn invalid_insert_mode(mode: &str) -> Self {
        Self::InvalidInsertMode {
            mode: mode.to_string(),
        }
    }

    /// Create an invalid action error for a CSV row
    pub fn invalid_action(action: &str, row: usize) -> Self {
        Self::InvalidAction {
            action: action.to_string(),
            row,
        }
    }

    /// Create a malformed row error
    pub fn malformed_row(row: usize) -> Self {
        Self::MalformedRow { row }
    }
}
