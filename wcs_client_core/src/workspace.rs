//! Workspace data model
//!
//! Typed representations of the dialog-service payloads this crate consumes:
//! workspace exports, dialog nodes, and entity values. Fields the deployment
//! utilities do not interpret (conditions, output, context, ...) are carried
//! through untouched via a flattened map, so a node fetched from one
//! workspace can be written back to another without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One node in a workspace's dialog tree.
///
/// Only the structural fields are typed: identity, tree position, and the
/// digression routing metadata the subtree copier has to rewrite. Everything
/// else the service returns stays in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogNode {
    /// Node identifier, unique within one workspace.
    pub dialog_node: String,

    /// Optional human-readable alias; usable interchangeably with the id
    /// for lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Parent node id, or `None` for a top-level node.
    #[serde(default)]
    pub parent: Option<String>,

    /// Id of the sibling preceding this node, or `None` for a first child.
    #[serde(default)]
    pub previous_sibling: Option<String>,

    /// Digression routing metadata. Root-scoped in the service's model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digress_in: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digress_out: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digress_out_slots: Option<String>,

    /// Service fields this crate does not interpret, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DialogNode {
    /// Create a bare node with the given id and no tree position.
    pub fn new(id: &str) -> Self {
        Self {
            dialog_node: id.to_string(),
            title: None,
            parent: None,
            previous_sibling: None,
            digress_in: None,
            digress_out: None,
            digress_out_slots: None,
            extra: Map::new(),
        }
    }

    /// True when the node sits at the workspace top level.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Clear the three digression fields.
    pub fn clear_digressions(&mut self) {
        self.digress_in = None;
        self.digress_out = None;
        self.digress_out_slots = None;
    }
}

/// Full workspace export as returned by the service's export endpoint.
///
/// The backup writer round-trips this structure back to JSON, so anything
/// beyond the dialog nodes (intents, entities, metadata) is preserved in
/// `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceExport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,

    #[serde(default)]
    pub dialog_nodes: Vec<DialogNode>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One value of an entity, with its synonym list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityValue {
    pub value: String,

    #[serde(default)]
    pub synonyms: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntityValue {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            synonyms: Vec::new(),
            extra: Map::new(),
        }
    }
}
