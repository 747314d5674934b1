//! Media entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Name of the thumbnail rendition generated for images.
pub const THUMB_CONVERSION: &str = "thumb";

/// An uploaded file in the media library.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Media {
    /// Unique media identifier.
    pub id: Uuid,
    /// Containing folder (null for the library root).
    pub folder_id: Option<Uuid>,
    /// The actor who uploaded the item.
    pub owner_id: Uuid,
    /// Display name (the original file name without extension).
    pub name: String,
    /// Stored file name.
    pub file_name: String,
    /// MIME type.
    pub mime_type: String,
    /// Payload size in bytes.
    pub size_bytes: i64,
    /// Payload path relative to the media root.
    pub storage_path: String,
    /// Names of the generated renditions (e.g. `thumb`).
    pub conversions: Vec<String>,
    /// When the media was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the media was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Media {
    /// Whether the payload is an image.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// The stored file name without its extension.
    pub fn stem(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.file_name,
        }
    }

    /// Relative path of a named rendition.
    pub fn conversion_path(&self, conversion: &str) -> String {
        format!("{}/conversions/{}-{}.jpg", self.id, self.stem(), conversion)
    }

    /// Relative paths of every generated rendition.
    pub fn conversion_paths(&self) -> Vec<String> {
        self.conversions
            .iter()
            .map(|c| self.conversion_path(c))
            .collect()
    }

    /// Check whether a rendition has been generated.
    pub fn has_conversion(&self, conversion: &str) -> bool {
        self.conversions.iter().any(|c| c == conversion)
    }
}

/// Data required to insert a media record. The ID is chosen up front so
/// the payload can be written under it before the row exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMedia {
    /// Media ID.
    pub id: Uuid,
    /// Containing folder.
    pub folder_id: Option<Uuid>,
    /// Uploading actor.
    pub owner_id: Uuid,
    /// Display name.
    pub name: String,
    /// Stored file name.
    pub file_name: String,
    /// MIME type.
    pub mime_type: String,
    /// Payload size in bytes.
    pub size_bytes: i64,
    /// Payload path relative to the media root.
    pub storage_path: String,
    /// Generated renditions.
    pub conversions: Vec<String>,
}
