//! Media folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::node::{NodeRecord, TreeNode};

/// A folder in the media library.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MediaFolder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<Uuid>,
    /// Folder name, unique among its siblings.
    pub name: String,
    /// Materialized path (e.g. `Images/2024`).
    pub path: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl MediaFolder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl TreeNode for MediaFolder {
    fn node_record(&self) -> NodeRecord {
        NodeRecord {
            id: self.id,
            parent_id: self.parent_id,
            name: self.name.clone(),
        }
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMediaFolder {
    /// Parent folder (None for root).
    pub parent_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
    /// Materialized path.
    pub path: String,
}
