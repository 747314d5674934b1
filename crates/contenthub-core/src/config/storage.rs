//! Media storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all runtime data.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Directory holding uploaded media payloads and their renditions.
    #[serde(default = "default_media_root")]
    pub media_root: String,
    /// URL prefix under which media payloads are publicly served.
    #[serde(default = "default_public_url_prefix")]
    pub public_url_prefix: String,
    /// Maximum upload size in bytes (default 10 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Rendition generated for image uploads.
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            media_root: default_media_root(),
            public_url_prefix: default_public_url_prefix(),
            max_upload_size_bytes: default_max_upload(),
            thumbnail: ThumbnailConfig::default(),
        }
    }
}

/// Image rendition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    /// Whether renditions are generated at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Bounding box width in pixels.
    #[serde(default = "default_thumb_width")]
    pub width: u32,
    /// Bounding box height in pixels.
    #[serde(default = "default_thumb_height")]
    pub height: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: default_thumb_width(),
            height: default_thumb_height(),
        }
    }
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_media_root() -> String {
    "./data/media".to_string()
}

fn default_public_url_prefix() -> String {
    "/storage".to_string()
}

fn default_max_upload() -> u64 {
    10 * 1024 * 1024
}

fn default_true() -> bool {
    true
}

fn default_thumb_width() -> u32 {
    368
}

fn default_thumb_height() -> u32 {
    232
}
