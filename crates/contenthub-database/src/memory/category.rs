use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_core::result::AppResult;
use contenthub_core::types::{PageRequest, PageResponse};
use contenthub_entity::category::{Category, CreateCategory};

use super::{MemoryDatabase, MemoryState, slugs_like};
use crate::filter::{CategoryFilter, TaxonomyOrder, contains_ci, search_term};
use crate::store::CategoryStore;

fn ensure_slug_free(state: &MemoryState, slug: &str, exclude: Option<Uuid>) -> AppResult<()> {
    let taken = state
        .categories
        .values()
        .any(|c| c.slug == slug && Some(c.id) != exclude);
    if taken {
        return Err(AppError::conflict(format!(
            "The slug '{slug}' has already been taken."
        )));
    }
    Ok(())
}

fn ensure_references(
    state: &MemoryState,
    parent_id: Option<Uuid>,
    image_id: Option<Uuid>,
) -> AppResult<()> {
    if let Some(parent_id) = parent_id {
        if !state.categories.contains_key(&parent_id) {
            return Err(AppError::not_found(format!(
                "Parent category {parent_id} not found"
            )));
        }
    }
    if let Some(image_id) = image_id {
        if !state.media.contains_key(&image_id) {
            return Err(AppError::not_found(format!("Media {image_id} not found")));
        }
    }
    Ok(())
}

fn compare(a: &Category, b: &Category, order: TaxonomyOrder) -> Ordering {
    match order {
        TaxonomyOrder::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        TaxonomyOrder::CreatedAt => a.created_at.cmp(&b.created_at),
        TaxonomyOrder::SortOrder => a.sort_order.cmp(&b.sort_order),
    }
}

#[async_trait]
impl CategoryStore for MemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        Ok(self.state.read().await.categories.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let state = self.state.read().await;
        let mut all: Vec<Category> = state.categories.values().cloned().collect();
        all.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(all)
    }

    async fn list(
        &self,
        filter: &CategoryFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Category>> {
        let state = self.state.read().await;
        let search = search_term(&filter.search);
        let mut rows: Vec<Category> = state
            .categories
            .values()
            .filter(|c| {
                search.is_none_or(|term| {
                    contains_ci(Some(&c.name), term)
                        || contains_ci(c.description.as_deref(), term)
                        || contains_ci(Some(&c.slug), term)
                })
            })
            .filter(|c| filter.is_active.is_none_or(|active| c.is_active == active))
            .filter(|c| filter.parent.matches(c.parent_id))
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
            state.categories.values().map(|c| (c.id, c.slug.as_str())),
            base,
        ))
    }

    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let mut state = self.state.write().await;
        ensure_slug_free(&state, &data.slug, None)?;
        ensure_references(&state, data.parent_id, data.image_id)?;

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            parent_id: data.parent_id,
            name: data.name.clone(),
            slug: data.slug.clone(),
            description: data.description.clone(),
            sort_order: data.sort_order,
            is_active: data.is_active,
            meta_title: data.meta_title.clone(),
            meta_description: data.meta_description.clone(),
            meta_keywords: data.meta_keywords.clone(),
            og_image: data.og_image.clone(),
            color: data.color.clone(),
            icon: data.icon.clone(),
            image_id: data.image_id,
            created_at: now,
            updated_at: now,
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: &Category) -> AppResult<Category> {
        let mut state = self.state.write().await;
        let Some(created_at) = state.categories.get(&category.id).map(|c| c.created_at) else {
            return Err(AppError::not_found(format!(
                "Category {} not found",
                category.id
            )));
        };
        ensure_slug_free(&state, &category.slug, Some(category.id))?;
        ensure_references(&state, category.parent_id, category.image_id)?;

        let mut stored = category.clone();
        stored.created_at = created_at;
        stored.updated_at = Utc::now();
        state.categories.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let orphaned = state
            .categories
            .values()
            .any(|c| !ids.contains(&c.id) && c.parent_id.is_some_and(|p| ids.contains(&p)));
        if orphaned {
            return Err(AppError::conflict(
                "Cannot delete category with subcategories. Delete or move subcategories first.",
            ));
        }

        let removed = ids
            .iter()
            .filter(|id| state.categories.remove(*id).is_some())
            .count();
        Ok(removed as u64)
    }

    async fn update_order(&self, orders: &[(Uuid, i32)]) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let mut updated = 0;
        for (id, order) in orders {
            if let Some(category) = state.categories.get_mut(id) {
                category.sort_order = *order;
                category.updated_at = now;
                updated += 1;
            }
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_category(name: &str, slug: &str, parent_id: Option<Uuid>) -> CreateCategory {
        CreateCategory {
            parent_id,
            name: name.into(),
            slug: slug.into(),
            description: None,
            sort_order: 0,
            is_active: true,
            meta_title: None,
            meta_description: None,
            meta_keywords: None,
            og_image: None,
            color: None,
            icon: None,
            image_id: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_conflict() {
        let db = MemoryDatabase::new();
        db.create(&new_category("News", "news", None)).await.unwrap();
        let err = db
            .create(&new_category("News", "news", None))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_delete_parent_with_child_is_restricted() {
        let db = MemoryDatabase::new();
        let parent = db.create(&new_category("A", "a", None)).await.unwrap();
        db.create(&new_category("B", "b", Some(parent.id)))
            .await
            .unwrap();

        let err = db.delete_many(&[parent.id]).await.unwrap_err();
        assert!(err.is_conflict());
        assert!(CategoryStore::find_by_id(&db, parent.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_slugs_like() {
        let db = MemoryDatabase::new();
        db.create(&new_category("Tech", "tech", None)).await.unwrap();
        db.create(&new_category("Tech", "tech-1", None)).await.unwrap();
        db.create(&new_category("Technology", "technology", None))
            .await
            .unwrap();

        let mut slugs: Vec<String> = CategoryStore::find_slugs_like(&db, "tech")
            .await
            .unwrap()
            .into_iter()
            .map(|(_, s)| s)
            .collect();
        slugs.sort();
        assert_eq!(slugs, vec!["tech".to_string(), "tech-1".to_string()]);
    }
}
