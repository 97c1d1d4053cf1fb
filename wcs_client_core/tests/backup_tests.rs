//! Workspace backup scenarios against the in-memory service mock

use std::fs;
use std::path::Path;
use wcs_client_core::workspace::{DialogNode, WorkspaceExport};
use wcs_client_core::get_and_backup_workspace;
use wcs_test_utils::MockWorkspaceService;

#[tokio::test]
async fn test_backup_writes_export_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.json");

    let mock = MockWorkspaceService::new();
    mock.add_workspace("ws-1", vec![DialogNode::new("greeting")]);

    let export = get_and_backup_workspace(&mock, "ws-1", &path).await.unwrap();
    assert_eq!(export.dialog_nodes.len(), 1);

    let written: WorkspaceExport =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.dialog_nodes[0].dialog_node, "greeting");
}

#[tokio::test]
async fn test_backup_fails_on_unwritable_path() {
    let mock = MockWorkspaceService::new();
    mock.add_workspace("ws-1", vec![]);

    let result = get_and_backup_workspace(
        &mock,
        "ws-1",
        Path::new("/nonexistent-dir/backup.json"),
    )
    .await;
    assert!(result.is_err());
}
