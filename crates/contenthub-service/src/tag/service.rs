//! Tag CRUD with slug uniqueness.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_core::types::{PageRequest, PageResponse};
use contenthub_database::filter::TagFilter;
use contenthub_database::store::TagStore;
use contenthub_entity::tag::{CreateTag, Tag};

use crate::context::RequestContext;
use crate::hierarchy::{derive_slug, slugify};

/// Writable tag fields, shared by create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagInput {
    /// Display name.
    pub name: String,
    /// Explicit slug; derived from the name when absent.
    pub slug: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Hex color.
    pub color: Option<String>,
    /// Published flag.
    pub is_active: Option<bool>,
    /// Ordering key.
    pub sort_order: Option<i32>,
    /// SEO title.
    pub meta_title: Option<String>,
    /// SEO description.
    pub meta_description: Option<String>,
    /// SEO keywords.
    pub meta_keywords: Option<String>,
    /// Open Graph image URL.
    pub og_image: Option<String>,
}

/// Manages tags.
#[derive(Debug, Clone)]
pub struct TagService {
    tags: Arc<dyn TagStore>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(tags: Arc<dyn TagStore>) -> Self {
        Self { tags }
    }

    /// Gets a tag by ID.
    pub async fn get(&self, id: Uuid) -> Result<Tag, AppError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found"))
    }

    /// Lists tags with filters.
    pub async fn list(
        &self,
        filter: &TagFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Tag>, AppError> {
        self.tags.list(filter, &page).await
    }

    async fn resolve_slug(
        &self,
        name: &str,
        explicit: Option<&str>,
        exclude: Option<Uuid>,
    ) -> Result<String, AppError> {
        match explicit.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                let slug = slugify(raw);
                let taken = self
                    .tags
                    .find_slugs_like(&slug)
                    .await?
                    .into_iter()
                    .any(|(id, s)| s == slug && Some(id) != exclude);
                if taken {
                    return Err(AppError::conflict(format!(
                        "The slug '{slug}' has already been taken."
                    )));
                }
                Ok(slug)
            }
            None => {
                let existing = self.tags.find_slugs_like(&slugify(name)).await?;
                Ok(derive_slug(name, &existing, exclude))
            }
        }
    }

    /// Creates a tag.
    pub async fn create(&self, ctx: &RequestContext, input: TagInput) -> Result<Tag, AppError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Tag name cannot be empty"));
        }
        let sort_order = input.sort_order.unwrap_or(0);
        if sort_order < 0 {
            return Err(AppError::validation("Order must be at least 0"));
        }

        let slug = self.resolve_slug(&name, input.slug.as_deref(), None).await?;
        let tag = self
            .tags
            .create(&CreateTag {
                name,
                slug,
                description: input.description,
                color: input.color,
                is_active: input.is_active.unwrap_or(true),
                sort_order,
                meta_title: input.meta_title,
                meta_description: input.meta_description,
                meta_keywords: input.meta_keywords,
                og_image: input.og_image,
            })
            .await?;

        info!(actor_id = %ctx.actor_id, tag_id = %tag.id, slug = %tag.slug, "Tag created");
        Ok(tag)
    }

    /// Updates a tag. Same slug rules as categories: a changed explicit
    /// slug wins, otherwise a rename re-derives it.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: TagInput,
    ) -> Result<Tag, AppError> {
        let mut tag = self.get(id).await?;

        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Tag name cannot be empty"));
        }

        let explicit = input
            .slug
            .as_deref()
            .filter(|s| !s.trim().is_empty() && slugify(s) != tag.slug);
        if explicit.is_some() || name != tag.name {
            tag.slug = self.resolve_slug(&name, explicit, Some(id)).await?;
        }

        if let Some(order) = input.sort_order {
            if order < 0 {
                return Err(AppError::validation("Order must be at least 0"));
            }
            tag.sort_order = order;
        }
        if let Some(active) = input.is_active {
            tag.is_active = active;
        }
        tag.name = name;
        tag.description = input.description;
        tag.color = input.color;
        tag.meta_title = input.meta_title;
        tag.meta_description = input.meta_description;
        tag.meta_keywords = input.meta_keywords;
        tag.og_image = input.og_image;

        let updated = self.tags.update(&tag).await?;
        info!(actor_id = %ctx.actor_id, tag_id = %id, slug = %updated.slug, "Tag updated");
        Ok(updated)
    }

    /// Deletes a tag.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.get(id).await?;
        self.tags.delete_many(&[id]).await?;
        info!(actor_id = %ctx.actor_id, tag_id = %id, "Tag deleted");
        Ok(())
    }

    /// Deletes several tags; unknown IDs fail the whole request.
    pub async fn bulk_delete(&self, ctx: &RequestContext, ids: &[Uuid]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Err(AppError::validation("No tags selected"));
        }
        for &id in ids {
            self.get(id).await?;
        }
        let deleted = self.tags.delete_many(ids).await?;
        info!(actor_id = %ctx.actor_id, count = deleted, "Tags bulk deleted");
        Ok(deleted)
    }

    /// Sets `sort_order` for each `(id, order)` pair.
    pub async fn update_order(
        &self,
        ctx: &RequestContext,
        orders: &[(Uuid, i32)],
    ) -> Result<u64, AppError> {
        if orders.is_empty() {
            return Err(AppError::validation("No tags selected"));
        }
        if orders.iter().any(|(_, order)| *order < 0) {
            return Err(AppError::validation("Order must be at least 0"));
        }
        for &(id, _) in orders {
            self.get(id).await?;
        }
        let updated = self.tags.update_order(orders).await?;
        info!(actor_id = %ctx.actor_id, count = updated, "Tag order updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contenthub_core::error::ErrorKind;
    use contenthub_database::memory::MemoryDatabase;

    fn service() -> TagService {
        TagService::new(Arc::new(MemoryDatabase::new()))
    }

    fn ctx() -> RequestContext {
        RequestContext::system(Uuid::new_v4())
    }

    fn named(name: &str) -> TagInput {
        TagInput {
            name: name.into(),
            ..TagInput::default()
        }
    }

    #[tokio::test]
    async fn test_create_derives_unique_slugs() {
        let svc = service();
        let first = svc.create(&ctx(), named("Rust Lang")).await.unwrap();
        let second = svc.create(&ctx(), named("Rust Lang")).await.unwrap();
        assert_eq!(first.slug, "rust-lang");
        assert_eq!(second.slug, "rust-lang-1");
        assert!(first.is_active);
    }

    #[tokio::test]
    async fn test_explicit_slug_taken() {
        let svc = service();
        svc.create(&ctx(), named("Async")).await.unwrap();
        let other = svc.create(&ctx(), named("Tokio")).await.unwrap();

        let err = svc
            .update(
                &ctx(),
                other.id,
                TagInput {
                    slug: Some("async".into()),
                    ..named("Tokio")
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_rename_rederives_slug() {
        let svc = service();
        let tag = svc.create(&ctx(), named("Old")).await.unwrap();
        let renamed = svc.update(&ctx(), tag.id, named("New Name")).await.unwrap();
        assert_eq!(renamed.slug, "new-name");
    }

    #[tokio::test]
    async fn test_bulk_delete_unknown_id_deletes_nothing() {
        let svc = service();
        let tag = svc.create(&ctx(), named("Keep")).await.unwrap();
        let err = svc
            .bulk_delete(&ctx(), &[tag.id, Uuid::new_v4()])
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(svc.get(tag.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_order_rejects_negative() {
        let svc = service();
        let tag = svc.create(&ctx(), named("Ordered")).await.unwrap();
        assert!(svc.update_order(&ctx(), &[(tag.id, -1)]).await.is_err());
        assert_eq!(svc.update_order(&ctx(), &[(tag.id, 5)]).await.unwrap(), 1);
        assert_eq!(svc.get(tag.id).await.unwrap().sort_order, 5);
    }

    #[tokio::test]
    async fn test_update_order_rejects_empty_and_unknown() {
        let svc = service();
        let tag = svc.create(&ctx(), named("Known")).await.unwrap();

        let err = svc.update_order(&ctx(), &[]).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = svc
            .update_order(&ctx(), &[(tag.id, 3), (Uuid::new_v4(), 1)])
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(svc.get(tag.id).await.unwrap().sort_order, 0);
    }
}
