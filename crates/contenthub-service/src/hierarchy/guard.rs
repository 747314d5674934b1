//! Mutation guards. Each check is side-effect free and runs before any write.

use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_core::result::AppResult;

use super::arena::NodeArena;

/// Which tree a guard is protecting; selects the wording of rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    /// The category tree.
    Category,
    /// The media folder tree.
    Folder,
}

impl TreeKind {
    fn self_parent(&self) -> &'static str {
        match self {
            Self::Category => "A category cannot be its own parent.",
            Self::Folder => "A folder cannot be moved into itself.",
        }
    }

    fn descendant_parent(&self) -> &'static str {
        match self {
            Self::Category => "Cannot set a child category as parent.",
            Self::Folder => "Cannot move a folder into one of its subfolders.",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Folder => "Folder",
        }
    }
}

/// How a tree handles deleting a node that still has children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Refuse while any child exists.
    Strict,
    /// Remove the whole subtree.
    Cascade,
}

/// Check that `node_id` may hang under `proposed_parent`.
///
/// `None` (make it a root) is always allowed. Rejects the node itself and
/// anything below it; a parent that does not exist is `NotFound`.
pub fn validate_reparent(
    arena: &NodeArena,
    kind: TreeKind,
    node_id: Uuid,
    proposed_parent: Option<Uuid>,
) -> AppResult<()> {
    let Some(parent_id) = proposed_parent else {
        return Ok(());
    };
    if parent_id == node_id {
        return Err(AppError::conflict(kind.self_parent()));
    }
    if !arena.contains(parent_id) {
        return Err(AppError::not_found(format!(
            "Parent {} not found",
            kind.label().to_lowercase()
        )));
    }
    if arena.is_descendant(parent_id, node_id) {
        return Err(AppError::conflict(kind.descendant_parent()));
    }
    Ok(())
}

/// Check that `node_id` may be deleted under `policy`.
pub fn validate_delete(arena: &NodeArena, kind: TreeKind, node_id: Uuid, policy: DeletePolicy) -> AppResult<()> {
    if !arena.contains(node_id) {
        return Err(AppError::not_found(format!("{} not found", kind.label())));
    }
    if policy == DeletePolicy::Strict && !arena.children_of(Some(node_id)).is_empty() {
        return Err(AppError::conflict(match kind {
            TreeKind::Category => {
                "Cannot delete category with subcategories. Delete or move subcategories first."
            }
            TreeKind::Folder => "Cannot delete folder with subfolders.",
        }));
    }
    Ok(())
}

/// Check that no sibling under `parent_id` already uses `name`.
pub fn validate_unique_name(
    arena: &NodeArena,
    parent_id: Option<Uuid>,
    name: &str,
    exclude_id: Option<Uuid>,
) -> AppResult<()> {
    let clash = arena
        .children_of(parent_id)
        .into_iter()
        .any(|sibling| sibling.name == name && Some(sibling.id) != exclude_id);
    if clash {
        return Err(AppError::conflict(
            "A folder with this name already exists in this location.",
        ));
    }
    Ok(())
}
