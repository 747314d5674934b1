use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_core::result::AppResult;
use contenthub_entity::media::{CreateMedia, Media};

use super::{MemoryDatabase, MemoryState};
use crate::store::MediaStore;

fn ensure_folder(state: &MemoryState, folder_id: Option<Uuid>) -> AppResult<()> {
    match folder_id {
        Some(id) if !state.folders.contains_key(&id) => {
            Err(AppError::not_found("Target folder not found"))
        }
        _ => Ok(()),
    }
}

fn newest_first(mut items: Vec<Media>) -> Vec<Media> {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    items
}

#[async_trait]
impl MediaStore for MemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Media>> {
        Ok(self.state.read().await.media.get(&id).cloned())
    }

    async fn find_in_folder(&self, folder_id: Option<Uuid>) -> AppResult<Vec<Media>> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .media
                .values()
                .filter(|m| m.folder_id == folder_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_in_folders(&self, folder_ids: &[Uuid]) -> AppResult<Vec<Media>> {
        let state = self.state.read().await;
        Ok(state
            .media
            .values()
            .filter(|m| m.folder_id.is_some_and(|id| folder_ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn count_by_folder(&self) -> AppResult<Vec<(Option<Uuid>, i64)>> {
        let state = self.state.read().await;
        let mut counts: HashMap<Option<Uuid>, i64> = HashMap::new();
        for media in state.media.values() {
            *counts.entry(media.folder_id).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn create(&self, data: &CreateMedia) -> AppResult<Media> {
        let mut state = self.state.write().await;
        ensure_folder(&state, data.folder_id)?;
        if state.media.contains_key(&data.id) {
            return Err(AppError::conflict(format!("Media {} already exists", data.id)));
        }

        let now = Utc::now();
        let media = Media {
            id: data.id,
            folder_id: data.folder_id,
            owner_id: data.owner_id,
            name: data.name.clone(),
            file_name: data.file_name.clone(),
            mime_type: data.mime_type.clone(),
            size_bytes: data.size_bytes,
            storage_path: data.storage_path.clone(),
            conversions: data.conversions.clone(),
            created_at: now,
            updated_at: now,
        };
        state.media.insert(media.id, media.clone());
        Ok(media)
    }

    async fn update(&self, media: &Media) -> AppResult<Media> {
        let mut state = self.state.write().await;
        ensure_folder(&state, media.folder_id)?;
        let Some(stored) = state.media.get_mut(&media.id) else {
            return Err(AppError::not_found(format!("Media {} not found", media.id)));
        };
        stored.folder_id = media.folder_id;
        stored.name = media.name.clone();
        stored.conversions = media.conversions.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let removed = state.media.remove(&id).is_some();
        if removed {
            for category in state.categories.values_mut() {
                if category.image_id == Some(id) {
                    category.image_id = None;
                }
            }
        }
        Ok(removed)
    }
}
