//! Media projections returned by the library browser.

use serde::{Deserialize, Serialize};

use super::model::{Media, THUMB_CONVERSION};
use crate::folder::MediaFolder;

/// A media item with its public URLs resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaView {
    /// The stored media item.
    #[serde(flatten)]
    pub media: Media,
    /// Public URL of the original payload.
    pub url: String,
    /// Preview URL, set for images only.
    pub preview_url: Option<String>,
    /// Thumbnail URL when the rendition exists.
    pub thumb_url: Option<String>,
}

impl MediaView {
    /// Resolve URLs under `url_prefix` (e.g. `/storage`).
    pub fn new(media: Media, url_prefix: &str) -> Self {
        let prefix = url_prefix.trim_end_matches('/');
        let url = format!("{prefix}/{}", media.storage_path);
        let preview_url = media.is_image().then(|| url.clone());
        let thumb_url = media
            .has_conversion(THUMB_CONVERSION)
            .then(|| format!("{prefix}/{}", media.conversion_path(THUMB_CONVERSION)));
        Self {
            media,
            url,
            preview_url,
            thumb_url,
        }
    }
}

/// One row of the combined folder/media listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BrowseEntry {
    /// A subfolder of the browsed folder.
    Folder(MediaFolder),
    /// A media item in the browsed folder.
    File(MediaView),
}

impl BrowseEntry {
    /// Display name used for sorting.
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(f) => &f.name,
            Self::File(m) => &m.media.name,
        }
    }

    /// Size in bytes; folders count as empty.
    pub fn size(&self) -> i64 {
        match self {
            Self::Folder(_) => 0,
            Self::File(m) => m.media.size_bytes,
        }
    }

    /// MIME type; folders have none and sort ahead of files.
    pub fn mime_type(&self) -> &str {
        match self {
            Self::Folder(_) => "",
            Self::File(m) => &m.media.mime_type,
        }
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        match self {
            Self::Folder(f) => f.created_at,
            Self::File(m) => m.media.created_at,
        }
    }
}
