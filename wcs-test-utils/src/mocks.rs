//! Mock implementation of the workspace service for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use wcs_client_core::error::{Error, Result, ServiceError};
use wcs_client_core::workspace::{DialogNode, EntityValue, WorkspaceExport};
use wcs_client_core::WorkspaceService;

/// One recorded call against the mock, in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    GetWorkspace {
        workspace_id: String,
    },
    DeleteDialogNode {
        workspace_id: String,
        dialog_node: String,
    },
    AppendDialogNodes {
        workspace_id: String,
        node_ids: Vec<String>,
    },
    GetValue {
        workspace_id: String,
        entity: String,
        value: String,
    },
    UpdateValueSynonyms {
        workspace_id: String,
        entity: String,
        value: String,
        synonyms: Vec<String>,
    },
    DeleteSynonym {
        workspace_id: String,
        entity: String,
        value: String,
        synonym: String,
    },
}

#[derive(Debug, Default)]
struct WorkspaceState {
    dialog_nodes: Vec<DialogNode>,
    // Keyed by (entity, value)
    values: HashMap<(String, String), EntityValue>,
}

#[derive(Default)]
struct MockState {
    workspaces: HashMap<String, WorkspaceState>,
    calls: Vec<ServiceCall>,
    fail_appends: Option<(u16, String)>,
    fail_deletes: Option<(u16, String)>,
}

/// In-memory [`WorkspaceService`] with call recording and failure
/// injection.
///
/// Workspaces are seeded with [`add_workspace`](Self::add_workspace) and
/// [`add_value`](Self::add_value); every trait call is recorded and can be
/// inspected afterwards through [`calls`](Self::calls).
pub struct MockWorkspaceService {
    state: Mutex<MockState>,
}

impl MockWorkspaceService {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState::default()),
        }
    }

    /// Seed a workspace with the given dialog nodes.
    pub fn add_workspace(&self, workspace_id: &str, dialog_nodes: Vec<DialogNode>) {
        let mut state = self.state.lock().unwrap();
        state.workspaces.insert(
            workspace_id.to_string(),
            WorkspaceState {
                dialog_nodes,
                values: HashMap::new(),
            },
        );
    }

    /// Seed an entity value with synonyms in an existing workspace.
    pub fn add_value(&self, workspace_id: &str, entity: &str, value: &str, synonyms: &[&str]) {
        let mut state = self.state.lock().unwrap();
        let workspace = state
            .workspaces
            .entry(workspace_id.to_string())
            .or_default();
        let mut entity_value = EntityValue::new(value);
        entity_value.synonyms = synonyms.iter().map(|s| s.to_string()).collect();
        workspace
            .values
            .insert((entity.to_string(), value.to_string()), entity_value);
    }

    /// Make every append call fail with the given service status and body.
    pub fn fail_appends_with(&self, status: u16, body: &str) {
        self.state.lock().unwrap().fail_appends = Some((status, body.to_string()));
    }

    /// Make every node delete call fail with the given status and body.
    pub fn fail_deletes_with(&self, status: u16, body: &str) {
        self.state.lock().unwrap().fail_deletes = Some((status, body.to_string()));
    }

    /// All recorded calls, in invocation order.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Dialog node ids currently present in a workspace.
    pub fn node_ids(&self, workspace_id: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .workspaces
            .get(workspace_id)
            .map(|ws| ws.dialog_nodes.iter().map(|n| n.dialog_node.clone()).collect())
            .unwrap_or_default()
    }

    /// A node currently present in a workspace, by id.
    pub fn node(&self, workspace_id: &str, dialog_node: &str) -> Option<DialogNode> {
        let state = self.state.lock().unwrap();
        state
            .workspaces
            .get(workspace_id)?
            .dialog_nodes
            .iter()
            .find(|n| n.dialog_node == dialog_node)
            .cloned()
    }

    /// Current synonym list of a seeded entity value.
    pub fn synonyms(&self, workspace_id: &str, entity: &str, value: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .workspaces
            .get(workspace_id)
            .and_then(|ws| ws.values.get(&(entity.to_string(), value.to_string())))
            .map(|v| v.synonyms.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: ServiceCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl Default for MockWorkspaceService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkspaceService for MockWorkspaceService {
    async fn get_workspace(&self, workspace_id: &str) -> Result<WorkspaceExport> {
        self.record(ServiceCall::GetWorkspace {
            workspace_id: workspace_id.to_string(),
        });

        let state = self.state.lock().unwrap();
        let workspace = state
            .workspaces
            .get(workspace_id)
            .ok_or_else(|| ServiceError::not_found("workspace", workspace_id))?;

        Ok(WorkspaceExport {
            name: Some(format!("mock workspace {workspace_id}")),
            workspace_id: Some(workspace_id.to_string()),
            dialog_nodes: workspace.dialog_nodes.clone(),
            extra: Default::default(),
        })
    }

    async fn delete_dialog_node(&self, workspace_id: &str, dialog_node: &str) -> Result<()> {
        self.record(ServiceCall::DeleteDialogNode {
            workspace_id: workspace_id.to_string(),
            dialog_node: dialog_node.to_string(),
        });

        let mut state = self.state.lock().unwrap();
        if let Some((status, body)) = state.fail_deletes.clone() {
            return Err(Error::Service(ServiceError::api(status, &body)));
        }

        let workspace = state
            .workspaces
            .get_mut(workspace_id)
            .ok_or_else(|| ServiceError::not_found("workspace", workspace_id))?;

        let before = workspace.dialog_nodes.len();
        workspace.dialog_nodes.retain(|n| n.dialog_node != dialog_node);
        if workspace.dialog_nodes.len() == before {
            return Err(ServiceError::not_found("dialog node", dialog_node).into());
        }
        Ok(())
    }

    async fn append_dialog_nodes(&self, workspace_id: &str, nodes: &[DialogNode]) -> Result<()> {
        self.record(ServiceCall::AppendDialogNodes {
            workspace_id: workspace_id.to_string(),
            node_ids: nodes.iter().map(|n| n.dialog_node.clone()).collect(),
        });

        let mut state = self.state.lock().unwrap();
        if let Some((status, body)) = state.fail_appends.clone() {
            return Err(Error::Service(ServiceError::api(status, &body)));
        }

        let workspace = state
            .workspaces
            .get_mut(workspace_id)
            .ok_or_else(|| ServiceError::not_found("workspace", workspace_id))?;

        for node in nodes {
            // Append semantics: a surviving same-id node is a conflict.
            if workspace
                .dialog_nodes
                .iter()
                .any(|n| n.dialog_node == node.dialog_node)
            {
                return Err(Error::Service(ServiceError::api(
                    409,
                    &format!("dialog node '{}' already exists", node.dialog_node),
                )));
            }
            workspace.dialog_nodes.push(node.clone());
        }
        Ok(())
    }

    async fn get_value(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
    ) -> Result<EntityValue> {
        self.record(ServiceCall::GetValue {
            workspace_id: workspace_id.to_string(),
            entity: entity.to_string(),
            value: value.to_string(),
        });

        let state = self.state.lock().unwrap();
        state
            .workspaces
            .get(workspace_id)
            .and_then(|ws| ws.values.get(&(entity.to_string(), value.to_string())))
            .cloned()
            .ok_or_else(|| ServiceError::not_found("value", value).into())
    }

    async fn update_value_synonyms(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonyms: &[String],
    ) -> Result<()> {
        self.record(ServiceCall::UpdateValueSynonyms {
            workspace_id: workspace_id.to_string(),
            entity: entity.to_string(),
            value: value.to_string(),
            synonyms: synonyms.to_vec(),
        });

        let mut state = self.state.lock().unwrap();
        let workspace = state
            .workspaces
            .get_mut(workspace_id)
            .ok_or_else(|| ServiceError::not_found("workspace", workspace_id))?;

        let entry = workspace
            .values
            .entry((entity.to_string(), value.to_string()))
            .or_insert_with(|| EntityValue::new(value));
        entry.synonyms = synonyms.to_vec();
        Ok(())
    }

    async fn delete_synonym(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonym: &str,
    ) -> Result<()> {
        self.record(ServiceCall::DeleteSynonym {
            workspace_id: workspace_id.to_string(),
            entity: entity.to_string(),
            value: value.to_string(),
            synonym: synonym.to_string(),
        });

        let mut state = self.state.lock().unwrap();
        let entity_value = state
            .workspaces
            .get_mut(workspace_id)
            .and_then(|ws| ws.values.get_mut(&(entity.to_string(), value.to_string())))
            .ok_or_else(|| ServiceError::not_found("value", value))?;

        let before = entity_value.synonyms.len();
        entity_value.synonyms.retain(|s| s != synonym);
        if entity_value.synonyms.len() == before {
            return Err(ServiceError::not_found("synonym", synonym).into());
        }
        Ok(())
    }
}
