//! Media folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use contenthub_core::error::{AppError, ErrorKind};
use contenthub_core::result::AppResult;
use contenthub_entity::folder::{CreateMediaFolder, MediaFolder};

use super::map_write_error;
use crate::store::{FOLDER_NAME_CONSTRAINT, FolderStore};

const DUPLICATE_FOLDER: &str = "A folder with this name already exists in this location.";

/// Repository for media folder CRUD and subtree writes.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MediaFolder>> {
        sqlx::query_as::<_, MediaFolder>("SELECT * FROM media_folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_all(&self) -> AppResult<Vec<MediaFolder>> {
        sqlx::query_as::<_, MediaFolder>("SELECT * FROM media_folders ORDER BY path ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load folders", e))
    }

    async fn find_children(&self, parent_id: Option<Uuid>) -> AppResult<Vec<MediaFolder>> {
        sqlx::query_as::<_, MediaFolder>(
            "SELECT * FROM media_folders WHERE parent_id IS NOT DISTINCT FROM $1 ORDER BY name ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list child folders", e))
    }

    async fn find_by_parent_and_name(
        &self,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<MediaFolder>> {
        sqlx::query_as::<_, MediaFolder>(
            "SELECT * FROM media_folders WHERE parent_id IS NOT DISTINCT FROM $1 AND name = $2",
        )
        .bind(parent_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find sibling folder", e))
    }

    async fn create(&self, data: &CreateMediaFolder) -> AppResult<MediaFolder> {
        sqlx::query_as::<_, MediaFolder>(
            "INSERT INTO media_folders (parent_id, name, path) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.parent_id)
        .bind(&data.name)
        .bind(&data.path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, FOLDER_NAME_CONSTRAINT, DUPLICATE_FOLDER, "Failed to create folder")
        })
    }

    async fn update_subtree(&self, folders: &[MediaFolder]) -> AppResult<MediaFolder> {
        let Some(first) = folders.first() else {
            return Err(AppError::internal("update_subtree called with no folders"));
        };

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let mut updated_root = None;
        for folder in folders {
            let row = sqlx::query_as::<_, MediaFolder>(
                "UPDATE media_folders SET parent_id = $2, name = $3, path = $4, updated_at = NOW() \
                 WHERE id = $1 RETURNING *",
            )
            .bind(folder.id)
            .bind(folder.parent_id)
            .bind(&folder.name)
            .bind(&folder.path)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                map_write_error(e, FOLDER_NAME_CONSTRAINT, DUPLICATE_FOLDER, "Failed to update folder")
            })?
            .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))?;

            if row.id == first.id {
                updated_root = Some(row);
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder update", e)
        })?;

        updated_root.ok_or_else(|| AppError::not_found(format!("Folder {} not found", first.id)))
    }

    async fn delete_subtree(&self, media_ids: &[Uuid], folder_ids: &[Uuid]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM media WHERE id = ANY($1)")
            .bind(media_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete media", e))?;

        for folder_id in folder_ids {
            sqlx::query("DELETE FROM media_folders WHERE id = $1")
                .bind(folder_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
                })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder delete", e)
        })
    }
}
