//! Media upload, download, move, and delete.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use contenthub_core::config::StorageConfig;
use contenthub_core::error::AppError;
use contenthub_core::traits::storage::MediaStorage;
use contenthub_database::store::{FolderStore, MediaStore};
use contenthub_entity::media::{CreateMedia, Media, MediaView, THUMB_CONVERSION};
use contenthub_storage::RenditionGenerator;
use contenthub_storage::mime;

use crate::context::RequestContext;
use crate::media::cleanup::purge_files;

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Target folder (None for the library root).
    pub folder_id: Option<Uuid>,
    /// Client-side file name.
    pub file_name: String,
    /// Client-declared content type.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

/// A payload ready to be sent back to the client.
#[derive(Debug, Clone)]
pub struct MediaDownload {
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub mime_type: String,
    /// File contents.
    pub data: Bytes,
}

/// Manages media items and their payloads.
#[derive(Debug, Clone)]
pub struct MediaService {
    /// Media store.
    media: Arc<dyn MediaStore>,
    /// Folder store, for target validation.
    folders: Arc<dyn FolderStore>,
    /// Payload storage.
    storage: Arc<dyn MediaStorage>,
    /// Thumbnail generator.
    renditions: RenditionGenerator,
    /// Upload limit and URL prefix.
    config: StorageConfig,
}

/// Last path component of a client file name, without separators.
fn sanitize_file_name(raw: &str) -> String {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if last.is_empty() || last == "." || last == ".." {
        "file".to_string()
    } else {
        last.to_string()
    }
}

/// Display name: the file name without its extension.
fn display_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

impl MediaService {
    /// Creates a new media service.
    pub fn new(
        media: Arc<dyn MediaStore>,
        folders: Arc<dyn FolderStore>,
        storage: Arc<dyn MediaStorage>,
        config: StorageConfig,
    ) -> Self {
        let renditions = RenditionGenerator::new(storage.clone(), config.thumbnail.clone());
        Self {
            media,
            folders,
            storage,
            renditions,
            config,
        }
    }

    /// Gets a media item by ID.
    pub async fn get(&self, id: Uuid) -> Result<Media, AppError> {
        self.media
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Media not found"))
    }

    /// Resolve public URLs for a media item.
    pub fn view(&self, media: Media) -> MediaView {
        MediaView::new(media, &self.config.public_url_prefix)
    }

    async fn require_folder(&self, folder_id: Option<Uuid>) -> Result<(), AppError> {
        if let Some(folder_id) = folder_id {
            self.folders
                .find_by_id(folder_id)
                .await?
                .ok_or_else(|| AppError::not_found("Target folder not found"))?;
        }
        Ok(())
    }

    /// Stores an upload and records it, owned by the acting user.
    ///
    /// Image uploads also get a thumbnail; a failed thumbnail is logged and
    /// the upload still succeeds.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        req: UploadRequest,
    ) -> Result<Media, AppError> {
        if req.data.is_empty() {
            return Err(AppError::validation("The file is empty"));
        }
        let limit = self.config.max_upload_size_bytes;
        if req.data.len() as u64 > limit {
            return Err(AppError::validation(format!(
                "The file may not be greater than {} kilobytes.",
                limit / 1024
            )));
        }
        self.require_folder(req.folder_id).await?;

        let id = Uuid::new_v4();
        let file_name = sanitize_file_name(&req.file_name);
        let mime_type = mime::detect(&file_name, req.content_type.as_deref(), &req.data);
        let storage_path = format!("{id}/{file_name}");
        let size_bytes = req.data.len() as i64;

        self.storage.write(&storage_path, req.data).await?;

        let created = self
            .media
            .create(&CreateMedia {
                id,
                folder_id: req.folder_id,
                owner_id: ctx.actor_id,
                name: display_name(&file_name),
                file_name,
                mime_type,
                size_bytes,
                storage_path: storage_path.clone(),
                conversions: Vec::new(),
            })
            .await;

        let mut media = match created {
            Ok(media) => media,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&storage_path).await {
                    warn!(path = %storage_path, error = %cleanup, "Failed to remove orphaned upload");
                }
                return Err(e);
            }
        };

        if self.renditions.is_supported(&media.mime_type) {
            let target = media.conversion_path(THUMB_CONVERSION);
            match self.renditions.generate(&media.storage_path, &target).await {
                Ok(()) => {
                    media.conversions.push(THUMB_CONVERSION.to_string());
                    media = self.media.update(&media).await?;
                }
                Err(e) => {
                    warn!(media_id = %media.id, error = %e, "Thumbnail generation failed");
                }
            }
        }

        info!(
            actor_id = %ctx.actor_id,
            media_id = %media.id,
            folder_id = ?media.folder_id,
            mime_type = %media.mime_type,
            size = media.size_bytes,
            "Media uploaded"
        );

        Ok(media)
    }

    /// Reads the original payload.
    pub async fn download(&self, id: Uuid) -> Result<MediaDownload, AppError> {
        let media = self.get(id).await?;
        let data = self.storage.read_bytes(&media.storage_path).await?;
        Ok(MediaDownload {
            file_name: media.file_name,
            mime_type: media.mime_type,
            data,
        })
    }

    /// Moves a media item into `folder_id` (None for the library root).
    pub async fn move_media(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        folder_id: Option<Uuid>,
    ) -> Result<Media, AppError> {
        let mut media = self.get(id).await?;
        self.require_folder(folder_id).await?;

        let old_folder = media.folder_id;
        media.folder_id = folder_id;
        let moved = self.media.update(&media).await?;

        info!(
            actor_id = %ctx.actor_id,
            media_id = %id,
            old_folder = ?old_folder,
            new_folder = ?folder_id,
            "Media moved"
        );

        Ok(moved)
    }

    /// Deletes a media record, then its payload and renditions.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let media = self.get(id).await?;
        if !self.media.delete(id).await? {
            return Err(AppError::not_found("Media not found"));
        }

        let failures = purge_files(self.storage.as_ref(), &media).await;
        if failures > 0 {
            warn!(media_id = %id, failures, "Media deleted with leftover payload files");
        }

        info!(actor_id = %ctx.actor_id, media_id = %id, "Media deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use contenthub_database::memory::MemoryDatabase;
    use contenthub_entity::folder::CreateMediaFolder;
    use contenthub_storage::LocalMediaStorage;
    use image::{ImageFormat, RgbImage};

    struct Fixture {
        _dir: tempfile::TempDir,
        db: MemoryDatabase,
        storage: Arc<LocalMediaStorage>,
        service: MediaService,
    }

    async fn fixture(max_upload: u64) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalMediaStorage::new(dir.path()).await.unwrap());
        let db = MemoryDatabase::new();
        let config = StorageConfig {
            max_upload_size_bytes: max_upload,
            ..StorageConfig::default()
        };
        let service = MediaService::new(
            Arc::new(db.clone()),
            Arc::new(db.clone()),
            storage.clone(),
            config,
        );
        Fixture {
            _dir: dir,
            db,
            storage,
            service,
        }
    }

    fn png(width: u32, height: u32) -> Bytes {
        let img = RgbImage::from_pixel(width, height, image::Rgb([200, 10, 10]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        Bytes::from(out.into_inner())
    }

    fn upload(name: &str, data: Bytes, folder_id: Option<Uuid>) -> UploadRequest {
        UploadRequest {
            folder_id,
            file_name: name.into(),
            content_type: None,
            data,
        }
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\photo.png"), "photo.png");
        assert_eq!(sanitize_file_name(".."), "file");
        assert_eq!(display_name("photo.final.png"), "photo.final");
    }

    #[tokio::test]
    async fn test_image_upload_gets_thumbnail() {
        let fx = fixture(10 * 1024 * 1024).await;
        let actor = Uuid::new_v4();
        let ctx = RequestContext::system(actor);

        let media = fx
            .service
            .upload(&ctx, upload("banner.png", png(736, 232), None))
            .await
            .unwrap();

        assert_eq!(media.owner_id, actor);
        assert_eq!(media.mime_type, "image/png");
        assert_eq!(media.name, "banner");
        assert!(media.has_conversion(THUMB_CONVERSION));
        assert!(
            fx.storage
                .exists(&media.conversion_path(THUMB_CONVERSION))
                .await
                .unwrap()
        );

        let view = fx.service.view(media.clone());
        assert_eq!(view.url, format!("/storage/{}/banner.png", media.id));
        assert!(view.thumb_url.is_some());
    }

    #[tokio::test]
    async fn test_broken_image_still_uploads() {
        let fx = fixture(1024).await;
        let ctx = RequestContext::system(Uuid::new_v4());
        let mut req = upload("broken.png", Bytes::from_static(b"not an image"), None);
        req.content_type = Some("image/png".into());

        let media = fx.service.upload(&ctx, req).await.unwrap();
        assert!(media.conversions.is_empty());
        assert!(fx.storage.exists(&media.storage_path).await.unwrap());
    }

    #[tokio::test]
    async fn test_upload_limits_and_folder() {
        let fx = fixture(4).await;
        let ctx = RequestContext::system(Uuid::new_v4());

        let err = fx
            .service
            .upload(&ctx, upload("big.txt", Bytes::from_static(b"12345"), None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, contenthub_core::error::ErrorKind::Validation);

        let err = fx
            .service
            .upload(&ctx, upload("a.txt", Bytes::from_static(b"1"), Some(Uuid::new_v4())))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_move_download_delete() {
        let fx = fixture(1024).await;
        let ctx = RequestContext::system(Uuid::new_v4());
        let folder = FolderStore::create(
            &fx.db,
            &CreateMediaFolder {
                parent_id: None,
                name: "Docs".into(),
                path: "Docs".into(),
            },
        )
        .await
        .unwrap();

        let media = fx
            .service
            .upload(&ctx, upload("notes.txt", Bytes::from_static(b"hello"), None))
            .await
            .unwrap();
        assert_eq!(media.mime_type, "text/plain");

        let moved = fx
            .service
            .move_media(&ctx, media.id, Some(folder.id))
            .await
            .unwrap();
        assert_eq!(moved.folder_id, Some(folder.id));

        let err = fx
            .service
            .move_media(&ctx, media.id, Some(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let download = fx.service.download(media.id).await.unwrap();
        assert_eq!(download.file_name, "notes.txt");
        assert_eq!(&download.data[..], b"hello");

        fx.service.delete(&ctx, media.id).await.unwrap();
        assert!(fx.service.get(media.id).await.unwrap_err().is_not_found());
        assert!(!fx.storage.path_for(&media.id.to_string()).exists());
    }
}
