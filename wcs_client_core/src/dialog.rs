//! Dialog branch copying
//!
//! Copies a branch of dialog from a source workspace to a target workspace:
//! locate the source and target anchor nodes, rewrite the branch root's
//! tree position for its new home, collect every descendant breadth-first,
//! clear colliding node ids at the destination, and append the whole branch
//! in one batched update.

use crate::error::{Error, Result, ValidationError};
use crate::service::WorkspaceService;
use crate::workspace::DialogNode;
use log::{debug, info};
use std::collections::VecDeque;
use std::str::FromStr;

/// Where the copied branch lands relative to the target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAs {
    /// Immediate next sibling of the target node
    Sibling,
    /// First child of the target node
    Child,
}

impl FromStr for InsertAs {
    type Err = Error;

    /// Parse an insertion mode, case-insensitively.
    ///
    /// An unrecognized mode is a validation error. The original utility
    /// silently left the branch root's position untouched instead, which
    /// hid typos; failing fast here is deliberate.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sibling" => Ok(Self::Sibling),
            "child" => Ok(Self::Child),
            other => Err(ValidationError::invalid_insert_mode(other).into()),
        }
    }
}

/// What to copy and where to put it.
#[derive(Debug, Clone)]
pub struct CopyOptions {
    root_node: String,
    target_node: String,
    insert_as: InsertAs,
}

impl CopyOptions {
    /// Copy the branch rooted at `root_node` (id or title).
    ///
    /// Defaults: insert as a sibling at the target workspace's dialog root.
    pub fn new(root_node: &str) -> Self {
        Self {
            root_node: root_node.to_string(),
            target_node: "root".to_string(),
            insert_as: InsertAs::Sibling,
        }
    }

    /// Anchor the branch at this node (id or title) in the target
    /// workspace. The literal `"root"` means the workspace top level.
    pub fn with_target_node(mut self, target_node: &str) -> Self {
        self.target_node = target_node.to_string();
        self
    }

    /// Insert the branch as a sibling or first child of the target node.
    pub fn with_insert_as(mut self, insert_as: InsertAs) -> Self {
        self.insert_as = insert_as;
        self
    }

    pub fn root_node(&self) -> &str {
        &self.root_node
    }

    pub fn target_node(&self) -> &str {
        &self.target_node
    }

    pub fn insert_as(&self) -> InsertAs {
        self.insert_as
    }

    fn validate(&self) -> Result<()> {
        if self.root_node.is_empty() {
            return Err(ValidationError::missing_parameter("root_node").into());
        }
        if self.target_node.is_empty() {
            return Err(ValidationError::missing_parameter("target_node").into());
        }
        Ok(())
    }
}

/// Outcome of a successful branch copy.
#[derive(Debug, Clone)]
pub struct CopySummary {
    /// Id of the branch root as it now exists in the target workspace
    pub root_id: String,
    /// Number of nodes appended (root plus all descendants)
    pub nodes_copied: usize,
}

/// Find a node by id or title in an export's node list.
///
/// The literal token `"root"` is a sentinel for the workspace top level and
/// never matches a node. Comparison against both id and title is
/// case-insensitive; the first match in export order wins, and the export
/// order is whatever the service returned, so ties between a duplicate
/// title and an id are nondeterministic.
pub fn find_node<'a>(identifier: &str, nodes: &'a [DialogNode]) -> Option<&'a DialogNode> {
    if identifier == "root" {
        return None;
    }

    let wanted = identifier.to_lowercase();
    nodes.iter().find(|node| {
        node.dialog_node.to_lowercase() == wanted
            || node
                .title
                .as_ref()
                .is_some_and(|title| title.to_lowercase() == wanted)
    })
}

/// Rewrite the branch root's position for its new home and strip digression
/// metadata when the placement requires it.
///
/// Digressions are root-scoped in the service's model, so they survive only
/// a true root-to-root move: sibling insertion next to a target that is
/// itself top-level. Every other placement clears them.
pub fn place_branch_root(root: &mut DialogNode, target: Option<&DialogNode>, insert_as: InsertAs) {
    let keep_digressions = insert_as == InsertAs::Sibling
        && target.is_some_and(|target_node| target_node.is_top_level());
    if !keep_digressions {
        root.clear_digressions();
    }

    match target {
        None => {
            debug!("inserting as first child of dialog root");
            root.parent = None;
            root.previous_sibling = None;
        }
        Some(target_node) => match insert_as {
            InsertAs::Sibling => {
                debug!(
                    "inserting as first sibling of target root {}",
                    target_node.dialog_node
                );
                root.parent = target_node.parent.clone();
                root.previous_sibling = Some(target_node.dialog_node.clone());
            }
            InsertAs::Child => {
                debug!(
                    "inserting as first child of target root {}",
                    target_node.dialog_node
                );
                root.parent = Some(target_node.dialog_node.clone());
                root.previous_sibling = None;
            }
        },
    }
}

/// Collect the branch to relocate: the (already repositioned) root first,
/// then every descendant in breadth-first order.
///
/// Seeds a work queue with the root's id; each pass scans the full node
/// list for children of the id at the queue head. Quadratic in the worst
/// case, which is fine at workspace scale (hundreds of nodes). Cyclic
/// parent references in the export are not validated and will not
/// terminate.
pub fn collect_branch(root: DialogNode, nodes: &[DialogNode]) -> Vec<DialogNode> {
    let mut branch = Vec::new();
    let mut to_locate = VecDeque::new();

    to_locate.push_back(root.dialog_node.clone());
    branch.push(root);

    while let Some(id_to_locate) = to_locate.pop_front() {
        for node in nodes {
            if node.parent.as_deref() == Some(id_to_locate.as_str()) {
                to_locate.push_back(node.dialog_node.clone());
                branch.push(node.clone());
            }
        }
    }

    branch
}

/// Best-effort removal of same-id nodes at the destination.
///
/// Delete failures (node absent, transient service trouble) are absorbed:
/// if something genuinely failed to clear, the append upsert that follows
/// will surface it. Running this twice is harmless.
async fn clear_conflicts(
    target: &dyn WorkspaceService,
    target_workspace: &str,
    branch: &[DialogNode],
) -> Result<usize> {
    let mut cleared = 0usize;
    for node in branch {
        match target
            .delete_dialog_node(target_workspace, &node.dialog_node)
            .await
        {
            Ok(()) => cleared += 1,
            Err(error) if error.is_ignorable_delete_failure() => {
                debug!(
                    "ignoring delete failure for node {}: {error}",
                    node.dialog_node
                );
            }
            Err(error) => return Err(error),
        }
    }
    Ok(cleared)
}

/// Copy a branch of dialog from a source workspace to a target workspace.
///
/// The branch root is looked up by id or title in the source export; the
/// target anchor likewise in the target export, with `"root"` meaning the
/// workspace top level. The whole branch is appended in a single update, so
/// on success the target holds the root plus every descendant. Deletes
/// applied during conflict clearing are not rolled back if the final
/// append fails; the destination is then in an intermediate state.
pub async fn copy_dialog_branch(
    source: &dyn WorkspaceService,
    target: &dyn WorkspaceService,
    source_workspace: &str,
    target_workspace: &str,
    options: &CopyOptions,
) -> Result<CopySummary> {
    options.validate()?;
    if source_workspace.is_empty() {
        return Err(ValidationError::missing_parameter("source_workspace").into());
    }
    if target_workspace.is_empty() {
        return Err(ValidationError::missing_parameter("target_workspace").into());
    }

    let source_export = source.get_workspace(source_workspace).await?;
    let target_export = target.get_workspace(target_workspace).await?;

    let mut branch_root = find_node(options.root_node(), &source_export.dialog_nodes)
        .cloned()
        .ok_or_else(|| ValidationError::root_node_not_found(options.root_node()))?;
    let target_root = find_node(options.target_node(), &target_export.dialog_nodes);

    place_branch_root(&mut branch_root, target_root, options.insert_as());

    let root_id = branch_root.dialog_node.clone();
    let branch = collect_branch(branch_root, &source_export.dialog_nodes);
    info!(
        "copying branch of {} nodes rooted at {root_id}",
        branch.len()
    );

    let cleared = clear_conflicts(target, target_workspace, &branch).await?;
    debug!("cleared {cleared} colliding nodes at destination");

    target.append_dialog_nodes(target_workspace, &branch).await?;
    info!("dialog update success");

    Ok(CopySummary {
        root_id,
        nodes_copied: branch.len(),
    })
}
