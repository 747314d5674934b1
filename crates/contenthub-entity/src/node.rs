//! Shared value objects for the two self-referencing trees.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry in a root-first breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Node ID.
    pub id: Uuid,
    /// Node display name.
    pub name: String,
}

/// The minimal shape of a tree node: identity, parent link, and name.
///
/// Both `Category` and `MediaFolder` project to this before any
/// traversal happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node ID.
    pub id: Uuid,
    /// Parent node ID (None for roots).
    pub parent_id: Option<Uuid>,
    /// Node name.
    pub name: String,
}

/// Anything that can be placed into a hierarchy arena.
pub trait TreeNode {
    /// Project to the minimal node shape.
    fn node_record(&self) -> NodeRecord;
}
