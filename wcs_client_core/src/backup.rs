//! Workspace backup
//!
//! Fetches a full workspace export and writes it to a local JSON file
//! before a destructive operation runs. The destination path is always
//! supplied explicitly by the caller; defaulting (timestamped filenames)
//! is the caller's concern.

use crate::error::{IoError, Result};
use crate::service::WorkspaceService;
use crate::workspace::WorkspaceExport;
use log::info;
use std::fs;
use std::path::Path;

/// Fetch an export of `workspace_id` and write it to `export_path`.
///
/// The file holds the same JSON shape the service's export endpoint
/// returns, pretty-printed. Returns the export so callers can reuse it
/// without a second fetch.
pub async fn get_and_backup_workspace(
    service: &dyn WorkspaceService,
    workspace_id: &str,
    export_path: &Path,
) -> Result<WorkspaceExport> {
    let export = service.get_workspace(workspace_id).await?;

    let json = serde_json::to_string_pretty(&export).map_err(IoError::json)?;
    fs::write(export_path, json).map_err(|e| IoError::file(export_path, e))?;

    info!(
        "backed up workspace {workspace_id} to {}",
        export_path.display()
    );
    Ok(export)
}
