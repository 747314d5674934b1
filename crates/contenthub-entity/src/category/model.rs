//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::node::{NodeRecord, TreeNode};

/// A category in the content hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: Uuid,
    /// Parent category ID (null for root categories).
    pub parent_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Globally unique URL token.
    pub slug: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Sibling ordering key.
    pub sort_order: i32,
    /// Whether the category is published.
    pub is_active: bool,
    /// SEO title.
    pub meta_title: Option<String>,
    /// SEO description.
    pub meta_description: Option<String>,
    /// SEO keywords.
    pub meta_keywords: Option<String>,
    /// Open Graph image URL.
    pub og_image: Option<String>,
    /// Hex color (e.g. `#ff8800`).
    pub color: Option<String>,
    /// Icon identifier.
    pub icon: Option<String>,
    /// Cover image (a media item).
    pub image_id: Option<Uuid>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Check if this is a root category (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl TreeNode for Category {
    fn node_record(&self) -> NodeRecord {
        NodeRecord {
            id: self.id,
            parent_id: self.parent_id,
            name: self.name.clone(),
        }
    }
}

/// Data required to insert a category. The slug is already resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    /// Parent category (None for root).
    pub parent_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Unique slug.
    pub slug: String,
    /// Description.
    pub description: Option<String>,
    /// Sibling ordering key.
    pub sort_order: i32,
    /// Published flag.
    pub is_active: bool,
    /// SEO title.
    pub meta_title: Option<String>,
    /// SEO description.
    pub meta_description: Option<String>,
    /// SEO keywords.
    pub meta_keywords: Option<String>,
    /// Open Graph image URL.
    pub og_image: Option<String>,
    /// Hex color.
    pub color: Option<String>,
    /// Icon identifier.
    pub icon: Option<String>,
    /// Cover image.
    pub image_id: Option<Uuid>,
}
