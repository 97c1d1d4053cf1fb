//! Entity synonym loading
//!
//! Bulk-loads entity synonym data from a CSV table into a workspace. Rows
//! have the shape `action,entity,value,synonym` with actions `ADD` or
//! `REMOVE`. Removals run first in row order; adds are grouped per
//! entity/value and applied as one update each, merged with the existing
//! synonym list unless `clear_existing` is set.
//!
//! Only synonym values are supported. Pattern values are not, pending the
//! service exposing an API for managing them.

use crate::backup::get_and_backup_workspace;
use crate::error::{Result, ValidationError};
use crate::service::WorkspaceService;
use log::{debug, info};
use std::path::Path;

/// Action requested by one CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynonymAction {
    Add,
    Remove,
}

impl SynonymAction {
    /// Parse an action token, case-insensitively. `None` for anything
    /// other than ADD or REMOVE; the caller attaches the row number when
    /// reporting it.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ADD" => Some(Self::Add),
            "REMOVE" => Some(Self::Remove),
            _ => None,
        }
    }
}

/// One parsed row of the synonym table.
///
/// Fields are kept as raw strings with no type coercion; an empty CSV field
/// stays an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymRow {
    pub action: SynonymAction,
    pub entity: String,
    pub value: String,
    pub synonym: String,
}

/// Read all rows of a synonym CSV file.
///
/// The file must carry the header `action,entity,value,synonym`. Rows with
/// a different column count or an unknown action token fail validation;
/// row numbers in errors are 1-based data rows.
pub fn read_synonym_csv(path: &Path) -> Result<Vec<SynonymRow>> {
    // Flexible parsing so short rows surface as our malformed-row error
    // with a row number instead of a bare csv error.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(crate::error::IoError::csv)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row_number = index + 1;
        if record.len() != 4 {
            return Err(ValidationError::malformed_row(row_number).into());
        }

        let action = SynonymAction::parse(&record[0])
            .ok_or_else(|| ValidationError::invalid_action(&record[0], row_number))?;

        rows.push(SynonymRow {
            action,
            entity: record[1].to_string(),
            value: record[2].to_string(),
            synonym: record[3].to_string(),
        });
    }

    Ok(rows)
}

/// Outcome of a synonym load.
#[derive(Debug, Clone, Default)]
pub struct EntityLoadSummary {
    /// Synonyms removed, one service call each
    pub removed: usize,
    /// Entity/value pairs updated by the grouped adds
    pub values_updated: usize,
    /// Total synonyms carried by the grouped adds
    pub synonyms_added: usize,
}

/// Grouped ADD rows: per (entity, value), the synonyms to add in
/// first-seen order with duplicates dropped.
fn group_adds(rows: &[SynonymRow]) -> Vec<((String, String), Vec<String>)> {
    let mut groups: Vec<((String, String), Vec<String>)> = Vec::new();
    for row in rows {
        if row.action != SynonymAction::Add {
            continue;
        }
        let key = (row.entity.clone(), row.value.clone());
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, synonyms)) => {
                if !synonyms.contains(&row.synonym) {
                    synonyms.push(row.synonym.clone());
                }
            }
            None => groups.push((key, vec![row.synonym.clone()])),
        }
    }
    groups
}

/// Apply parsed synonym rows to a workspace.
///
/// All `REMOVE` rows are executed first, in table row order; a remove
/// failure is fatal (there is no best-effort contract here, unlike the
/// dialog conflict clearer). `ADD` rows are then grouped per entity/value
/// and each group applied as one update. With `clear_existing` false the
/// current synonym list is fetched and the new synonyms merged into it;
/// with `clear_existing` true the group replaces whatever is there.
pub async fn load_entity_data(
    service: &dyn WorkspaceService,
    workspace_id: &str,
    rows: &[SynonymRow],
    clear_existing: bool,
) -> Result<EntityLoadSummary> {
    if workspace_id.is_empty() {
        return Err(ValidationError::missing_parameter("workspace").into());
    }

    let mut summary = EntityLoadSummary::default();

    for row in rows.iter().filter(|r| r.action == SynonymAction::Remove) {
        debug!(
            "removing synonym '{}' from {}/{}",
            row.synonym, row.entity, row.value
        );
        service
            .delete_synonym(workspace_id, &row.entity, &row.value, &row.synonym)
            .await?;
        summary.removed += 1;
    }

    for ((entity, value), new_synonyms) in group_adds(rows) {
        let synonyms = if clear_existing {
            new_synonyms
        } else {
            let existing = service.get_value(workspace_id, &entity, &value).await?;
            let mut merged = existing.synonyms;
            for synonym in new_synonyms {
                if !merged.contains(&synonym) {
                    merged.push(synonym);
                }
            }
            merged
        };

        debug!(
            "updating {entity}/{value} with {} synonyms (clear_existing={clear_existing})",
            synonyms.len()
        );
        summary.synonyms_added += synonyms.len();
        service
            .update_value_synonyms(workspace_id, &entity, &value, &synonyms)
            .await?;
        summary.values_updated += 1;
    }

    info!(
        "entity load complete: {} removed, {} values updated",
        summary.removed, summary.values_updated
    );
    Ok(summary)
}

/// Load entity synonym data from a CSV file into a workspace, with a
/// safety backup beforehand.
///
/// The workspace export is written to `backup_path` before the CSV is even
/// parsed, so a failed backup aborts the load with the destination
/// untouched. On success the rows are applied exactly as
/// [`load_entity_data`] does: removals first, then grouped adds.
pub async fn load_csv_as_entity_data(
    service: &dyn WorkspaceService,
    workspace_id: &str,
    csv_file: &Path,
    clear_existing: bool,
    backup_path: &Path,
) -> Result<EntityLoadSummary> {
    if workspace_id.is_empty() {
        return Err(ValidationError::missing_parameter("workspace").into());
    }

    get_and_backup_workspace(service, workspace_id, backup_path).await?;

    let rows = read_synonym_csv(csv_file)?;
    load_entity_data(service, workspace_id, &rows, clear_existing).await
}
