//! Entity synonym loading scenarios against the in-memory service mock

use std::io::Write;
use wcs_client_core::entities::{SynonymAction, SynonymRow};
use wcs_client_core::{load_csv_as_entity_data, load_entity_data};
use wcs_test_utils::{MockWorkspaceService, ServiceCall};

fn row(action: SynonymAction, entity: &str, value: &str, synonym: &str) -> SynonymRow {
    SynonymRow {
        action,
        entity: entity.to_string(),
        value: value.to_string(),
        synonym: synonym.to_string(),
    }
}

#[tokio::test]
async fn test_removes_run_before_grouped_adds() {
    let mock = MockWorkspaceService::new();
    mock.add_value("ws", "e1", "v1", &["s1"]);

    let rows = vec![
        row(SynonymAction::Add, "e1", "v1", "s2"),
        row(SynonymAction::Remove, "e1", "v1", "s1"),
    ];
    load_entity_data(&mock, "ws", &rows, false).await.unwrap();

    // The remove executed first even though the add row came first.
    let calls = mock.calls();
    let delete_pos = calls
        .iter()
        .position(|c| matches!(c, ServiceCall::DeleteSynonym { .. }))
        .unwrap();
    let update_pos = calls
        .iter()
        .position(|c| matches!(c, ServiceCall::UpdateValueSynonyms { .. }))
        .unwrap();
    assert!(delete_pos < update_pos);

    assert_eq!(mock.synonyms("ws", "e1", "v1"), vec!["s2"]);
}

#[tokio::test]
async fn test_merge_keeps_untouched_existing_synonyms() {
    let mock = MockWorkspaceService::new();
    mock.add_value("ws", "e1", "v1", &["existing_a", "existing_b"]);

    let rows = vec![row(SynonymAction::Add, "e1", "v1", "fresh")];
    load_entity_data(&mock, "ws", &rows, false).await.unwrap();

    assert_eq!(
        mock.synonyms("ws", "e1", "v1"),
        vec!["existing_a", "existing_b", "fresh"]
    );
}

#[tokio::test]
async fn test_clear_existing_replaces_synonym_list() {
    let mock = MockWorkspaceService::new();
    mock.add_value("ws", "e1", "v1", &["old_a", "old_b"]);

    let rows = vec![
        row(SynonymAction::Add, "e1", "v1", "new_a"),
        row(SynonymAction::Add, "e1", "v1", "new_b"),
    ];
    let summary = load_entity_data(&mock, "ws", &rows, true).await.unwrap();

    assert_eq!(summary.values_updated, 1);
    assert_eq!(mock.synonyms("ws", "e1", "v1"), vec!["new_a", "new_b"]);
    // Replace mode never fetches the current value.
    assert!(!mock
        .calls()
        .iter()
        .any(|c| matches!(c, ServiceCall::GetValue { .. })));
}

#[tokio::test]
async fn test_adds_grouped_into_one_update_per_value() {
    let mock = MockWorkspaceService::new();
    mock.add_value("ws", "e1", "v1", &[]);
    mock.add_value("ws", "e1", "v2", &[]);

    let rows = vec![
        row(SynonymAction::Add, "e1", "v1", "a"),
        row(SynonymAction::Add, "e1", "v2", "b"),
        row(SynonymAction::Add, "e1", "v1", "c"),
    ];
    load_entity_data(&mock, "ws", &rows, false).await.unwrap();

    let updates = mock
        .calls()
        .iter()
        .filter(|c| matches!(c, ServiceCall::UpdateValueSynonyms { .. }))
        .count();
    assert_eq!(updates, 2);
    assert_eq!(mock.synonyms("ws", "e1", "v1"), vec!["a", "c"]);
}

#[tokio::test]
async fn test_remove_failure_is_fatal() {
    let mock = MockWorkspaceService::new();
    mock.add_value("ws", "e1", "v1", &["s1"]);

    let rows = vec![row(SynonymAction::Remove, "e1", "v1", "not_there")];
    let result = load_entity_data(&mock, "ws", &rows, false).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_empty_workspace_id_fails_before_remote_calls() {
    let mock = MockWorkspaceService::new();
    let rows = vec![row(SynonymAction::Add, "e1", "v1", "s1")];

    assert!(load_entity_data(&mock, "", &rows, false).await.is_err());
    assert!(mock.calls().is_empty());
}

fn write_csv(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("synonyms.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{contents}").unwrap();
    path
}

#[tokio::test]
async fn test_backup_precedes_all_mutations() {
    let mock = MockWorkspaceService::new();
    mock.add_workspace("ws", vec![]);
    mock.add_value("ws", "e1", "v1", &["old"]);

    let dir = tempfile::tempdir().unwrap();
    let csv_file = write_csv(
        &dir,
        "Action,Entity,Value,Synonym\n\
         r,e1,v1,old\n\
         a,e1,v1,fresh\n",
    );
    let backup_path = dir.path().join("backup.json");

    load_csv_as_entity_data(&mock, "ws", &csv_file, false, &backup_path)
        .await
        .unwrap();

    assert!(backup_path.exists());
    let calls = mock.calls();
    let backup_at = calls
        .iter()
        .position(|c| matches!(c, ServiceCall::GetWorkspace { .. }))
        .unwrap();
    for (index, call) in calls.iter().enumerate() {
        if matches!(
            call,
            ServiceCall::DeleteSynonym { .. } | ServiceCall::UpdateValueSynonyms { .. }
        ) {
            assert!(backup_at < index, "mutation recorded before the backup");
        }
    }
}

#[tokio::test]
async fn test_failed_backup_aborts_before_any_mutation() {
    let mock = MockWorkspaceService::new();
    mock.add_workspace("ws", vec![]);
    mock.add_value("ws", "e1", "v1", &["old"]);

    let dir = tempfile::tempdir().unwrap();
    let csv_file = write_csv(&dir, "Action,Entity,Value,Synonym\nr,e1,v1,old\n");
    let backup_path = dir.path().join("missing-dir").join("backup.json");

    let result = load_csv_as_entity_data(&mock, "ws", &csv_file, false, &backup_path).await;

    assert!(result.is_err());
    assert_eq!(mock.calls(), vec![ServiceCall::GetWorkspace {
        workspace_id: "ws".to_string(),
    }]);
}
