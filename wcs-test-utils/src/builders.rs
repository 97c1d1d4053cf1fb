//! Builders for dialog node test fixtures

use wcs_client_core::DialogNode;

/// Builder for dialog nodes used in test scenarios.
pub struct NodeBuilder {
    node: DialogNode,
}

impl NodeBuilder {
    /// Start a node with the given id and no tree position.
    pub fn new(id: &str) -> Self {
        Self {
            node: DialogNode::new(id),
        }
    }

    /// Set the human-readable title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.node.title = Some(title.to_string());
        self
    }

    /// Set the parent node id.
    pub fn with_parent(mut self, parent: &str) -> Self {
        self.node.parent = Some(parent.to_string());
        self
    }

    /// Set the previous sibling id.
    pub fn with_previous_sibling(mut self, sibling: &str) -> Self {
        self.node.previous_sibling = Some(sibling.to_string());
        self
    }

    /// Populate all three digression fields with distinctive values.
    pub fn with_digressions(mut self) -> Self {
        self.node.digress_in = Some("returns".to_string());
        self.node.digress_out = Some("allow_all".to_string());
        self.node.digress_out_slots = Some("not_allowed".to_string());
        self
    }

    pub fn build(self) -> DialogNode {
        self.node
    }
}
