//! Watson Conversation Workspace Deployment Client Library
//!
//! Core library for the workspace deployment utilities: copying dialog
//! branches between workspaces and bulk-loading entity synonym data, both
//! over the dialog service's REST API.

pub mod backup;
pub mod client;
pub mod dialog;
pub mod entities;
pub mod error;
pub mod service;
pub mod workspace;

// Re-export main types
pub use backup::get_and_backup_workspace;
pub use client::ConversationClient;
pub use dialog::{copy_dialog_branch, CopyOptions, CopySummary, InsertAs};
pub use entities::{
    load_csv_as_entity_data, load_entity_data, read_synonym_csv, EntityLoadSummary, SynonymAction,
    SynonymRow,
};
pub use error::{Error, Result};
pub use service::WorkspaceService;
pub use workspace::{DialogNode, EntityValue, WorkspaceExport};

/// Default service endpoint for the dialog service's v1 API.
pub const DEFAULT_SERVICE_URL: &str = "https://gateway.watsonplatform.net/conversation/api/v1";

/// API version date the client pins its requests to.
pub const DEFAULT_API_VERSION: &str = "2017-05-26";

/// Connection settings for one dialog-service instance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ClientConfig {
    /// Base URL of the service's v1 API
    pub url: String,
    /// API version date sent as the `version` query parameter
    pub version: String,
    /// Basic-auth username
    pub username: Option<String>,
    /// Basic-auth password
    pub password: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Retry attempts for idempotent export reads
    pub retry_count: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            username: None,
            password: None,
            timeout_seconds: 30,
            retry_count: 3,
        }
    }
}

impl ClientConfig {
    /// Config with credentials filled in, other fields at their defaults.
    pub fn with_credentials(username: &str, password: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_pins_api_version() {
        let config = ClientConfig::default();
        assert_eq!(config.version, "2017-05-26");
        assert!(config.username.is_none());
    }

    #[test]
    fn test_with_credentials() {
        let config = ClientConfig::with_credentials("user", "secret");
        assert_eq!(config.username.as_deref(), Some("user"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.url, DEFAULT_SERVICE_URL);
    }
}
