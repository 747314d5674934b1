use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_core::result::AppResult;
use contenthub_core::types::{PageRequest, PageResponse};
use contenthub_entity::tag::{CreateTag, Tag};

use super::{MemoryDatabase, MemoryState, slugs_like};
use crate::filter::{TagFilter, TaxonomyOrder, contains_ci, search_term};
use crate::store::TagStore;

fn ensure_slug_free(state: &MemoryState, slug: &str, exclude: Option<Uuid>) -> AppResult<()> {
    if state
        .tags
        .values()
        .any(|t| t.slug == slug && Some(t.id) != exclude)
    {
        return Err(AppError::conflict(format!(
            "The slug '{slug}' has already been taken."
        )));
    }
    Ok(())
}

fn compare(a: &Tag, b: &Tag, order: TaxonomyOrder) -> Ordering {
    match order {
        TaxonomyOrder::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        TaxonomyOrder::CreatedAt => a.created_at.cmp(&b.created_at),
        TaxonomyOrder::SortOrder => a.sort_order.cmp(&b.sort_order),
    }
}

#[async_trait]
impl TagStore for MemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tag>> {
        Ok(self.state.read().await.tags.get(&id).cloned())
    }

    async fn list(&self, filter: &TagFilter, page: &PageRequest) -> AppResult<PageResponse<Tag>> {
        let state = self.state.read().await;
        let search = search_term(&filter.search);
        let mut rows: Vec<Tag> = state
            .tags
            .values()
            .filter(|t| {
                search.is_none_or(|term| {
                    contains_ci(Some(&t.name), term)
                        || contains_ci(t.description.as_deref(), term)
                        || contains_ci(Some(&t.slug), term)
                })
            })
            .filter(|t| filter.is_active.is_none_or(|active| t.is_active == active))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            filter
                .direction
                .apply(compare(a, b, filter.order_by))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(page.slice(rows))
    }

    async fn find_slugs_like(&self, base: &str) -> AppResult<Vec<(Uuid, String)>> {
        let state = self.state.read().await;
        Ok(slugs_like(
            state.tags.values().map(|t| (t.id, t.slug.as_str())),
            base,
        ))
    }

    async fn create(&self, data: &CreateTag) -> AppResult<Tag> {
        let mut state = self.state.write().await;
        ensure_slug_free(&state, &data.slug, None)?;

        let now = Utc::now();
        let tag = Tag {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            slug: data.slug.clone(),
            description: data.description.clone(),
            color: data.color.clone(),
            is_active: data.is_active,
            sort_order: data.sort_order,
            meta_title: data.meta_title.clone(),
            meta_description: data.meta_description.clone(),
            meta_keywords: data.meta_keywords.clone(),
            og_image: data.og_image.clone(),
            created_at: now,
            updated_at: now,
        };
        state.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn update(&self, tag: &Tag) -> AppResult<Tag> {
        let mut state = self.state.write().await;
        let Some(created_at) = state.tags.get(&tag.id).map(|t| t.created_at) else {
            return Err(AppError::not_found(format!("Tag {} not found", tag.id)));
        };
        ensure_slug_free(&state, &tag.slug, Some(tag.id))?;

        let mut stored = tag.clone();
        stored.created_at = created_at;
        stored.updated_at = Utc::now();
        state.tags.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let removed = ids
            .iter()
            .filter(|id| state.tags.remove(*id).is_some())
            .count();
        Ok(removed as u64)
    }

    async fn update_order(&self, orders: &[(Uuid, i32)]) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let mut updated = 0;
        for (id, order) in orders {
            if let Some(tag) = state.tags.get_mut(id) {
                tag.sort_order = *order;
                tag.updated_at = now;
                updated += 1;
            }
        }
        Ok(updated)
    }
}
