//! Workspace service abstraction
//!
//! The deployment operations only ever touch the remote dialog service
//! through this trait, so tests can substitute an in-memory implementation
//! (see the `wcs-test-utils` crate). The production implementation is
//! [`crate::client::ConversationClient`].

use crate::error::Result;
use crate::workspace::{DialogNode, EntityValue, WorkspaceExport};
use async_trait::async_trait;

/// Operations the deployment utilities consume from the dialog service.
///
/// All calls are scoped by `workspace_id`. Implementations are expected to
/// be sequential request/response; nothing here is called concurrently.
#[async_trait]
pub trait WorkspaceService: Send + Sync {
    /// Fetch a full workspace export, including all dialog nodes.
    async fn get_workspace(&self, workspace_id: &str) -> Result<WorkspaceExport>;

    /// Delete one dialog node by id. Fails if the node is absent.
    async fn delete_dialog_node(&self, workspace_id: &str, dialog_node: &str) -> Result<()>;

    /// Merge the given nodes into the workspace (append-mode update).
    async fn append_dialog_nodes(&self, workspace_id: &str, nodes: &[DialogNode]) -> Result<()>;

    /// Fetch one entity value, including its current synonym list.
    async fn get_value(&self, workspace_id: &str, entity: &str, value: &str)
    -> Result<EntityValue>;

    /// Replace the synonym list of one entity value.
    async fn update_value_synonyms(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonyms: &[String],
    ) -> Result<()>;

    /// Delete one synonym from an entity value. Fails if absent.
    async fn delete_synonym(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonym: &str,
    ) -> Result<()>;
}
