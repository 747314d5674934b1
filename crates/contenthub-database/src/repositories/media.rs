//! Media repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use contenthub_core::error::{AppError, ErrorKind};
use contenthub_core::result::AppResult;
use contenthub_entity::media::{CreateMedia, Media};

use crate::store::MediaStore;

/// Repository for media records.
#[derive(Debug, Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    /// Create a new media repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaStore for MediaRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Media>> {
        sqlx::query_as::<_, Media>("SELECT * FROM media WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find media", e))
    }

    async fn find_in_folder(&self, folder_id: Option<Uuid>) -> AppResult<Vec<Media>> {
        sqlx::query_as::<_, Media>(
            "SELECT * FROM media WHERE folder_id IS NOT DISTINCT FROM $1 ORDER BY created_at DESC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list media", e))
    }

    async fn find_in_folders(&self, folder_ids: &[Uuid]) -> AppResult<Vec<Media>> {
        sqlx::query_as::<_, Media>("SELECT * FROM media WHERE folder_id = ANY($1)")
            .bind(folder_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list subtree media", e)
            })
    }

    async fn count_by_folder(&self) -> AppResult<Vec<(Option<Uuid>, i64)>> {
        sqlx::query_as::<_, (Option<Uuid>, i64)>(
            "SELECT folder_id, COUNT(*) FROM media GROUP BY folder_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count media", e))
    }

    async fn create(&self, data: &CreateMedia) -> AppResult<Media> {
        sqlx::query_as::<_, Media>(
            "INSERT INTO media (id, folder_id, owner_id, name, file_name, mime_type, size_bytes, \
             storage_path, conversions) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(data.id)
        .bind(data.folder_id)
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(&data.file_name)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .bind(&data.storage_path)
        .bind(&data.conversions)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found("Target folder not found")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create media", e),
        })
    }

    async fn update(&self, media: &Media) -> AppResult<Media> {
        sqlx::query_as::<_, Media>(
            "UPDATE media SET folder_id = $2, name = $3, conversions = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(media.id)
        .bind(media.folder_id)
        .bind(&media.name)
        .bind(&media.conversions)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found("Target folder not found")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update media", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Media {} not found", media.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete media", e))?;
        Ok(result.rows_affected() > 0)
    }
}
