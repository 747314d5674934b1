//! Folder CRUD with stored-path maintenance and cascade delete.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_core::traits::storage::MediaStorage;
use contenthub_database::store::{FolderStore, MediaStore};
use contenthub_entity::folder::{CreateMediaFolder, MediaFolder};

use crate::context::RequestContext;
use crate::hierarchy::path::normalize_folder_name;
use crate::hierarchy::{
    DeletePolicy, NodeArena, TreeKind, folder_path, plan_folder_delete, rematerialize_subtree,
    validate_delete, validate_reparent, validate_unique_name,
};
use crate::media::cleanup::purge_files;

/// Request to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
}

/// What a folder delete removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderDeleteSummary {
    /// Folders removed, including the target.
    pub folders_deleted: usize,
    /// Media rows removed.
    pub media_deleted: usize,
    /// Payload files or directories that could not be cleaned up.
    pub cleanup_failures: usize,
}

/// Manages media folders.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Media store.
    media: Arc<dyn MediaStore>,
    /// Payload storage.
    storage: Arc<dyn MediaStorage>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        media: Arc<dyn MediaStore>,
        storage: Arc<dyn MediaStorage>,
    ) -> Self {
        Self {
            folders,
            media,
            storage,
        }
    }

    /// Gets a folder by ID.
    pub async fn get(&self, id: Uuid) -> Result<MediaFolder, AppError> {
        self.folders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn arena(&self) -> Result<(Vec<MediaFolder>, NodeArena), AppError> {
        let all = self.folders.find_all().await?;
        let arena = NodeArena::from_nodes(&all);
        Ok((all, arena))
    }

    /// Creates a folder under `parent_id`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> Result<MediaFolder, AppError> {
        let name = normalize_folder_name(&req.name)?;

        let parent_path = match req.parent_id {
            Some(parent_id) => Some(
                self.folders
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Parent folder not found"))?
                    .path,
            ),
            None => None,
        };

        if self
            .folders
            .find_by_parent_and_name(req.parent_id, &name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "A folder with this name already exists in this location.",
            ));
        }

        let folder = self
            .folders
            .create(&CreateMediaFolder {
                parent_id: req.parent_id,
                path: folder_path(parent_path.as_deref(), &name),
                name,
            })
            .await?;

        info!(
            actor_id = %ctx.actor_id,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder; every descendant path is rewritten with it.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        new_name: &str,
    ) -> Result<MediaFolder, AppError> {
        let name = normalize_folder_name(new_name)?;
        let folder = self.get(id).await?;
        if folder.name == name {
            return Ok(folder);
        }

        let parent_id = folder.parent_id;
        let old_path = folder.path.clone();
        let updated = self.relocate(id, parent_id, &name).await?;

        info!(
            actor_id = %ctx.actor_id,
            folder_id = %id,
            old_path = %old_path,
            new_path = %updated.path,
            "Folder renamed"
        );

        Ok(updated)
    }

    /// Moves a folder under `new_parent_id` (None for root).
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> Result<MediaFolder, AppError> {
        let folder = self.get(id).await?;
        if folder.parent_id == new_parent_id {
            return Ok(folder);
        }

        let old_path = folder.path.clone();
        let updated = self.relocate(id, new_parent_id, &folder.name).await?;

        info!(
            actor_id = %ctx.actor_id,
            folder_id = %id,
            old_path = %old_path,
            new_path = %updated.path,
            "Folder moved"
        );

        Ok(updated)
    }

    /// Gives folder `id` the parent and name, then persists the whole
    /// subtree's re-derived paths in one store call.
    async fn relocate(
        &self,
        id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> Result<MediaFolder, AppError> {
        let (all, arena) = self.arena().await?;

        validate_reparent(&arena, TreeKind::Folder, id, parent_id)?;
        validate_unique_name(&arena, parent_id, name, Some(id))?;

        let parent_path = parent_id
            .and_then(|p| all.iter().find(|f| f.id == p))
            .map(|f| f.path.as_str());
        let paths = rematerialize_subtree(&arena, id, parent_path, name)?;

        let mut by_id: std::collections::HashMap<Uuid, MediaFolder> =
            all.into_iter().map(|f| (f.id, f)).collect();
        let mut batch = Vec::with_capacity(paths.len());
        for (folder_id, path) in paths {
            let Some(mut folder) = by_id.remove(&folder_id) else {
                continue;
            };
            if folder_id == id {
                folder.parent_id = parent_id;
                folder.name = name.to_string();
            }
            folder.path = path;
            batch.push(folder);
        }

        self.folders.update_subtree(&batch).await
    }

    /// Deletes a folder, its subfolders, and all media inside them.
    ///
    /// Rows go in one store call; payload files are removed afterwards on a
    /// best-effort basis.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<FolderDeleteSummary, AppError> {
        let (_, arena) = self.arena().await?;
        validate_delete(&arena, TreeKind::Folder, id, DeletePolicy::Cascade)?;

        let subtree = arena.post_order(id)?;
        let candidates = self.media.find_in_folders(&subtree).await?;
        let plan = plan_folder_delete(&arena, id, candidates)?;

        self.folders
            .delete_subtree(&plan.media_ids(), &plan.folder_ids)
            .await?;

        let mut cleanup_failures = 0;
        for media in &plan.media {
            cleanup_failures += purge_files(self.storage.as_ref(), media).await;
        }
        if cleanup_failures > 0 {
            warn!(
                folder_id = %id,
                failures = cleanup_failures,
                "Folder deleted with leftover payload files"
            );
        }

        let summary = FolderDeleteSummary {
            folders_deleted: plan.folder_ids.len(),
            media_deleted: plan.media.len(),
            cleanup_failures,
        };

        info!(
            actor_id = %ctx.actor_id,
            folder_id = %id,
            folders = summary.folders_deleted,
            media = summary.media_deleted,
            "Folder deleted"
        );

        Ok(summary)
    }
}
