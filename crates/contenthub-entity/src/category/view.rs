//! Read-side category projections carrying derived tree data.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Category;
use crate::node::Breadcrumb;

/// A category as listed, with its virtual `" > "`-joined path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRow {
    /// The stored category.
    #[serde(flatten)]
    pub category: Category,
    /// Root-first names joined with `" > "`.
    pub path: String,
    /// Number of direct children.
    pub children_count: usize,
}

/// A single category with everything the edit screen needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDetail {
    /// The stored category.
    #[serde(flatten)]
    pub category: Category,
    /// Root-first names joined with `" > "`.
    pub path: String,
    /// Depth (0 for roots).
    pub level: usize,
    /// Root-first trail ending at this category.
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// An entry in the parent-selection dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    /// Category ID.
    pub id: Uuid,
    /// The category path, used as the option label.
    pub name: String,
    /// Depth (0 for roots).
    pub level: usize,
}
