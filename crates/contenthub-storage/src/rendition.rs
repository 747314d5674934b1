//! Image rendition (thumbnail) generation.

use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};

use contenthub_core::config::ThumbnailConfig;
use contenthub_core::error::{AppError, ErrorKind};
use contenthub_core::result::AppResult;
use contenthub_core::traits::storage::MediaStorage;

/// Generates scaled-down JPEG renditions of uploaded images.
#[derive(Debug, Clone)]
pub struct RenditionGenerator {
    /// Storage for reading sources and writing renditions.
    storage: Arc<dyn MediaStorage>,
    /// Bounding box and on/off switch.
    config: ThumbnailConfig,
}

impl RenditionGenerator {
    /// Create a new rendition generator.
    pub fn new(storage: Arc<dyn MediaStorage>, config: ThumbnailConfig) -> Self {
        Self { storage, config }
    }

    /// Whether renditions are produced for this MIME type.
    pub fn is_supported(&self, mime_type: &str) -> bool {
        self.config.enabled
            && matches!(
                mime_type,
                "image/jpeg" | "image/png" | "image/gif" | "image/webp" | "image/bmp"
            )
    }

    /// Read `source_path`, fit it inside the configured box, and write the
    /// JPEG result to `target_path`.
    pub async fn generate(&self, source_path: &str, target_path: &str) -> AppResult<()> {
        let source = self.storage.read_bytes(source_path).await?;
        let (width, height) = (self.config.width, self.config.height);

        let encoded = tokio::task::spawn_blocking(move || fit_jpeg(&source, width, height))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Rendition task panicked", e)
            })??;

        self.storage.write(target_path, encoded).await?;

        tracing::debug!(
            source = source_path,
            target = target_path,
            width,
            height,
            "Generated rendition"
        );
        Ok(())
    }
}

/// Scale an encoded image to fit within `width`×`height` (aspect preserved,
/// never upscaled) and re-encode it as JPEG.
pub fn fit_jpeg(data: &[u8], width: u32, height: u32) -> AppResult<Bytes> {
    if data.is_empty() {
        return Err(AppError::validation("Empty image data"));
    }
    let img = image::load_from_memory(data).map_err(|e| {
        AppError::with_source(ErrorKind::Validation, "Unreadable image data", e)
    })?;

    let fitted = if img.width() > width || img.height() > height {
        img.thumbnail(width, height)
    } else {
        img
    };
    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(fitted.to_rgb8());

    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageFormat::Jpeg).map_err(|e| {
        AppError::with_source(ErrorKind::Internal, "Failed to encode rendition", e)
    })?;
    Ok(Bytes::from(out.into_inner()))
}
