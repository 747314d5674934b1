//! Tag entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A flat content tag.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Unique tag identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Globally unique URL token.
    pub slug: String,
    /// Description.
    pub description: Option<String>,
    /// Hex color.
    pub color: Option<String>,
    /// Published flag.
    pub is_active: bool,
    /// Ordering key.
    pub sort_order: i32,
    /// SEO title.
    pub meta_title: Option<String>,
    /// SEO description.
    pub meta_description: Option<String>,
    /// SEO keywords.
    pub meta_keywords: Option<String>,
    /// Open Graph image URL.
    pub og_image: Option<String>,
    /// When the tag was created.
    pub created_at: DateTime<Utc>,
    /// When the tag was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a tag. The slug is already resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTag {
    /// Display name.
    pub name: String,
    /// Unique slug.
    pub slug: String,
    /// Description.
    pub description: Option<String>,
    /// Hex color.
    pub color: Option<String>,
    /// Published flag.
    pub is_active: bool,
    /// Ordering key.
    pub sort_order: i32,
    /// SEO title.
    pub meta_title: Option<String>,
    /// SEO description.
    pub meta_description: Option<String>,
    /// SEO keywords.
    pub meta_keywords: Option<String>,
    /// Open Graph image URL.
    pub og_image: Option<String>,
}
