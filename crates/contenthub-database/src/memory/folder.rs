use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_core::result::AppResult;
use contenthub_entity::folder::{CreateMediaFolder, MediaFolder};

use super::MemoryDatabase;
use crate::store::FolderStore;

const DUPLICATE_FOLDER: &str = "A folder with this name already exists in this location.";

fn sibling_taken(
    folders: &HashMap<Uuid, MediaFolder>,
    parent_id: Option<Uuid>,
    name: &str,
    exclude: Option<Uuid>,
) -> bool {
    folders
        .values()
        .any(|f| f.parent_id == parent_id && f.name == name && Some(f.id) != exclude)
}

#[async_trait]
impl FolderStore for MemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MediaFolder>> {
        Ok(self.state.read().await.folders.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<MediaFolder>> {
        let state = self.state.read().await;
        let mut all: Vec<MediaFolder> = state.folders.values().cloned().collect();
        all.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn find_children(&self, parent_id: Option<Uuid>) -> AppResult<Vec<MediaFolder>> {
        let state = self.state.read().await;
        let mut children: Vec<MediaFolder> = state
            .folders
            .values()
            .filter(|f| f.parent_id == parent_id)
            .cloned()
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    async fn find_by_parent_and_name(
        &self,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<MediaFolder>> {
        let state = self.state.read().await;
        Ok(state
            .folders
            .values()
            .find(|f| f.parent_id == parent_id && f.name == name)
            .cloned())
    }

    async fn create(&self, data: &CreateMediaFolder) -> AppResult<MediaFolder> {
        let mut state = self.state.write().await;
        if let Some(parent_id) = data.parent_id {
            if !state.folders.contains_key(&parent_id) {
                return Err(AppError::not_found(format!("Folder {parent_id} not found")));
            }
        }
        if sibling_taken(&state.folders, data.parent_id, &data.name, None) {
            return Err(AppError::conflict(DUPLICATE_FOLDER));
        }

        let now = Utc::now();
        let folder = MediaFolder {
            id: Uuid::new_v4(),
            parent_id: data.parent_id,
            name: data.name.clone(),
            path: data.path.clone(),
            created_at: now,
            updated_at: now,
        };
        state.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn update_subtree(&self, folders: &[MediaFolder]) -> AppResult<MediaFolder> {
        let Some(first) = folders.first() else {
            return Err(AppError::internal("update_subtree called with no folders"));
        };

        let mut state = self.state.write().await;
        let mut staged = state.folders.clone();
        let now = Utc::now();

        for folder in folders {
            let Some(existing) = staged.get_mut(&folder.id) else {
                return Err(AppError::not_found(format!("Folder {} not found", folder.id)));
            };
            existing.parent_id = folder.parent_id;
            existing.name = folder.name.clone();
            existing.path = folder.path.clone();
            existing.updated_at = now;
        }

        for folder in folders {
            if sibling_taken(&staged, folder.parent_id, &folder.name, Some(folder.id)) {
                return Err(AppError::conflict(DUPLICATE_FOLDER));
            }
        }

        let updated = staged
            .get(&first.id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Folder {} not found", first.id)))?;
        state.folders = staged;
        Ok(updated)
    }

    async fn delete_subtree(&self, media_ids: &[Uuid], folder_ids: &[Uuid]) -> AppResult<()> {
        let mut state = self.state.write().await;

        for media_id in media_ids {
            state.media.remove(media_id);
        }
        for category in state.categories.values_mut() {
            if category.image_id.is_some_and(|id| media_ids.contains(&id)) {
                category.image_id = None;
            }
        }

        for folder_id in folder_ids {
            state.folders.remove(folder_id);
        }
        // Media the caller did not list falls back to the library root.
        for media in state.media.values_mut() {
            if media.folder_id.is_some_and(|id| folder_ids.contains(&id)) {
                media.folder_id = None;
            }
        }
        Ok(())
    }
}
