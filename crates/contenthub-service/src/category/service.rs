//! Category CRUD, reparenting, and tree queries.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_core::types::{PageRequest, PageResponse};
use contenthub_database::filter::CategoryFilter;
use contenthub_database::store::{CategoryStore, MediaStore};
use contenthub_entity::category::{
    Category, CategoryDetail, CategoryOption, CategoryRow, CreateCategory,
};
use contenthub_entity::node::Breadcrumb;

use crate::context::RequestContext;
use crate::hierarchy::{
    CATEGORY_PATH_SEPARATOR, DeletePolicy, NodeArena, TreeKind, derive_slug, slugify,
    validate_delete, validate_reparent,
};

/// Default page size of the category listing.
pub const CATEGORY_PAGE_SIZE: u64 = 20;

/// Writable category fields, shared by create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryInput {
    /// Display name.
    pub name: String,
    /// Explicit slug; derived from the name when absent.
    pub slug: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Parent category (None for root).
    pub parent_id: Option<Uuid>,
    /// Sibling ordering key; keeps the current value (or 0) when absent.
    pub sort_order: Option<i32>,
    /// Published flag; keeps the current value (or true) when absent.
    pub is_active: Option<bool>,
    /// SEO title.
    pub meta_title: Option<String>,
    /// SEO description.
    pub meta_description: Option<String>,
    /// SEO keywords.
    pub meta_keywords: Option<String>,
    /// Open Graph image URL.
    pub og_image: Option<String>,
    /// Hex color.
    pub color: Option<String>,
    /// Icon identifier.
    pub icon: Option<String>,
    /// Cover image.
    pub image_id: Option<Uuid>,
}

/// Manages the category tree.
#[derive(Debug, Clone)]
pub struct CategoryService {
    /// Category store.
    categories: Arc<dyn CategoryStore>,
    /// Media store, for cover image references.
    media: Arc<dyn MediaStore>,
}

fn explicit_slug(slug: &Option<String>) -> Option<String> {
    slug.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(slugify)
}

fn required_name(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Category name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn check_order(order: i32) -> Result<(), AppError> {
    if order < 0 {
        return Err(AppError::validation("Order must be at least 0"));
    }
    Ok(())
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(categories: Arc<dyn CategoryStore>, media: Arc<dyn MediaStore>) -> Self {
        Self { categories, media }
    }

    async fn arena(&self) -> Result<(Vec<Category>, NodeArena), AppError> {
        let all = self.categories.find_all().await?;
        let arena = NodeArena::from_nodes(&all);
        Ok((all, arena))
    }

    /// Gets a category by ID.
    pub async fn get(&self, id: Uuid) -> Result<Category, AppError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    /// Gets a category with its path, depth, and breadcrumbs.
    pub async fn get_detail(&self, id: Uuid) -> Result<CategoryDetail, AppError> {
        let (all, arena) = self.arena().await?;
        let category = all
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("Category not found"))?;
        let breadcrumbs = arena.breadcrumbs(id)?;
        Ok(CategoryDetail {
            path: join_names(&breadcrumbs),
            level: breadcrumbs.len().saturating_sub(1),
            breadcrumbs,
            category,
        })
    }

    /// Lists categories with filters, each row carrying its virtual path.
    pub async fn list(
        &self,
        filter: &CategoryFilter,
        page: PageRequest,
    ) -> Result<PageResponse<CategoryRow>, AppError> {
        let rows = self.categories.list(filter, &page).await?;
        let (_, arena) = self.arena().await?;

        Ok(rows.map(|category| {
            let path = arena
                .display_path(category.id, CATEGORY_PATH_SEPARATOR)
                .unwrap_or_else(|_| category.name.clone());
            let children_count = arena.children_of(Some(category.id)).len();
            CategoryRow {
                category,
                path,
                children_count,
            }
        }))
    }

    /// Parent-selection options: every category labelled by its path.
    ///
    /// With `exclude`, that category and all of its descendants are left
    /// out, since none of them is a valid new parent for it.
    pub async fn parent_options(
        &self,
        exclude: Option<Uuid>,
    ) -> Result<Vec<CategoryOption>, AppError> {
        let (all, arena) = self.arena().await?;

        let mut excluded: HashSet<Uuid> = HashSet::new();
        if let Some(id) = exclude {
            if arena.contains(id) {
                excluded.insert(id);
                excluded.extend(arena.descendants(id)?);
            }
        }

        all.iter()
            .filter(|c| !excluded.contains(&c.id))
            .map(|c| {
                let breadcrumbs = arena.breadcrumbs(c.id)?;
                Ok(CategoryOption {
                    id: c.id,
                    name: join_names(&breadcrumbs),
                    level: breadcrumbs.len() - 1,
                })
            })
            .collect()
    }

    /// Root-first trail ending at the category.
    pub async fn breadcrumbs(&self, id: Uuid) -> Result<Vec<Breadcrumb>, AppError> {
        let (_, arena) = self.arena().await?;
        if !arena.contains(id) {
            return Err(AppError::not_found("Category not found"));
        }
        arena.breadcrumbs(id)
    }

    /// Every category below `id`, depth-first.
    pub async fn descendants(&self, id: Uuid) -> Result<Vec<Category>, AppError> {
        let (all, arena) = self.arena().await?;
        if !arena.contains(id) {
            return Err(AppError::not_found("Category not found"));
        }
        let order = arena.descendants(id)?;
        let mut by_id: std::collections::HashMap<Uuid, Category> =
            all.into_iter().map(|c| (c.id, c)).collect();
        Ok(order.into_iter().filter_map(|d| by_id.remove(&d)).collect())
    }

    /// Every category with its depth, roots first.
    pub async fn tree(&self) -> Result<Vec<(Category, usize)>, AppError> {
        let (all, arena) = self.arena().await?;
        let mut by_id: std::collections::HashMap<Uuid, Category> =
            all.into_iter().map(|c| (c.id, c)).collect();
        Ok(arena
            .walk()
            .into_iter()
            .filter_map(|(node, depth)| by_id.remove(&node.id).map(|c| (c, depth)))
            .collect())
    }

    async fn check_image(&self, image_id: Option<Uuid>) -> Result<(), AppError> {
        if let Some(image_id) = image_id {
            self.media
                .find_by_id(image_id)
                .await?
                .ok_or_else(|| AppError::not_found("Selected image not found"))?;
        }
        Ok(())
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        Ok(self
            .categories
            .find_slugs_like(slug)
            .await?
            .into_iter()
            .any(|(id, s)| s == slug && Some(id) != exclude))
    }

    async fn fresh_slug(&self, name: &str, exclude: Option<Uuid>) -> Result<String, AppError> {
        let base = slugify(name);
        let existing = self.categories.find_slugs_like(&base).await?;
        Ok(derive_slug(name, &existing, exclude))
    }

    /// Creates a category, deriving a unique slug when none is given.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        let name = required_name(&input.name)?;
        let sort_order = input.sort_order.unwrap_or(0);
        check_order(sort_order)?;

        if let Some(parent_id) = input.parent_id {
            self.categories
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::not_found("Parent category not found"))?;
        }
        self.check_image(input.image_id).await?;

        let slug = match explicit_slug(&input.slug) {
            Some(slug) => {
                if self.slug_taken(&slug, None).await? {
                    return Err(AppError::conflict(format!(
                        "The slug '{slug}' has already been taken."
                    )));
                }
                slug
            }
            None => self.fresh_slug(&name, None).await?,
        };

        let category = self
            .categories
            .create(&CreateCategory {
                parent_id: input.parent_id,
                name,
                slug,
                description: input.description,
                sort_order,
                is_active: input.is_active.unwrap_or(true),
                meta_title: input.meta_title,
                meta_description: input.meta_description,
                meta_keywords: input.meta_keywords,
                og_image: input.og_image,
                color: input.color,
                icon: input.icon,
                image_id: input.image_id,
            })
            .await?;

        info!(
            actor_id = %ctx.actor_id,
            category_id = %category.id,
            slug = %category.slug,
            parent_id = ?category.parent_id,
            "Category created"
        );

        Ok(category)
    }

    /// Updates a category.
    ///
    /// A name change re-derives the slug unless the same update supplies a
    /// different slug explicitly. A parent change is guarded against cycles.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        let (all, arena) = self.arena().await?;
        let mut category = all
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("Category not found"))?;

        let name = required_name(&input.name)?;
        validate_reparent(&arena, TreeKind::Category, id, input.parent_id)?;
        self.check_image(input.image_id).await?;
        if let Some(order) = input.sort_order {
            check_order(order)?;
            category.sort_order = order;
        }

        let requested = explicit_slug(&input.slug).filter(|s| *s != category.slug);
        if let Some(slug) = requested {
            if self.slug_taken(&slug, Some(id)).await? {
                return Err(AppError::conflict(format!(
                    "The slug '{slug}' has already been taken."
                )));
            }
            category.slug = slug;
        } else if name != category.name {
            category.slug = self.fresh_slug(&name, Some(id)).await?;
        }

        let old_parent = category.parent_id;
        category.name = name;
        category.parent_id = input.parent_id;
        category.description = input.description;
        if let Some(active) = input.is_active {
            category.is_active = active;
        }
        category.meta_title = input.meta_title;
        category.meta_description = input.meta_description;
        category.meta_keywords = input.meta_keywords;
        category.og_image = input.og_image;
        category.color = input.color;
        category.icon = input.icon;
        category.image_id = input.image_id;

        let updated = self.categories.update(&category).await?;

        info!(
            actor_id = %ctx.actor_id,
            category_id = %id,
            slug = %updated.slug,
            old_parent = ?old_parent,
            new_parent = ?updated.parent_id,
            "Category updated"
        );

        Ok(updated)
    }

    /// Moves a category under a new parent (None for root).
    pub async fn move_category(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> Result<Category, AppError> {
        let (all, arena) = self.arena().await?;
        let mut category = all
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("Category not found"))?;

        validate_reparent(&arena, TreeKind::Category, id, new_parent_id)?;

        let old_parent = category.parent_id;
        category.parent_id = new_parent_id;
        let moved = self.categories.update(&category).await?;

        info!(
            actor_id = %ctx.actor_id,
            category_id = %id,
            old_parent = ?old_parent,
            new_parent = ?new_parent_id,
            "Category moved"
        );

        Ok(moved)
    }

    /// Deletes a childless category.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let (_, arena) = self.arena().await?;
        validate_delete(&arena, TreeKind::Category, id, DeletePolicy::Strict)?;

        self.categories.delete_many(&[id]).await?;

        info!(actor_id = %ctx.actor_id, category_id = %id, "Category deleted");
        Ok(())
    }

    /// Deletes several categories; nothing is deleted if any of them
    /// still has subcategories or does not exist.
    pub async fn bulk_delete(&self, ctx: &RequestContext, ids: &[Uuid]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Err(AppError::validation("No categories selected"));
        }

        let (_, arena) = self.arena().await?;
        for &id in ids {
            validate_delete(&arena, TreeKind::Category, id, DeletePolicy::Strict)?;
        }

        let deleted = self.categories.delete_many(ids).await?;

        info!(actor_id = %ctx.actor_id, count = deleted, "Categories bulk deleted");
        Ok(deleted)
    }

    /// Sets `sort_order` for each `(id, order)` pair.
    pub async fn update_order(
        &self,
        ctx: &RequestContext,
        orders: &[(Uuid, i32)],
    ) -> Result<u64, AppError> {
        if orders.is_empty() {
            return Err(AppError::validation("No categories selected"));
        }
        for (_, order) in orders {
            check_order(*order)?;
        }
        let (_, arena) = self.arena().await?;
        if let Some((missing, _)) = orders.iter().find(|(id, _)| !arena.contains(*id)) {
            return Err(AppError::not_found(format!("Category {missing} not found")));
        }
        let updated = self.categories.update_order(orders).await?;

        info!(actor_id = %ctx.actor_id, count = updated, "Category order updated");
        Ok(updated)
    }
}

fn join_names(trail: &[Breadcrumb]) -> String {
    trail
        .iter()
        .map(|b| b.name.as_str())
        .collect::<Vec<_>>()
        .join(CATEGORY_PATH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contenthub_core::error::ErrorKind;
    use contenthub_database::memory::MemoryDatabase;
    use contenthub_database::filter::ParentFilter;

    fn service() -> CategoryService {
        let db = MemoryDatabase::new();
        CategoryService::new(Arc::new(db.clone()), Arc::new(db))
    }

    fn ctx() -> RequestContext {
        RequestContext::system(Uuid::new_v4())
    }

    fn named(name: &str, parent_id: Option<Uuid>) -> CategoryInput {
        CategoryInput {
            name: name.into(),
            parent_id,
            ..CategoryInput::default()
        }
    }

    #[tokio::test]
    async fn test_slug_suffixes_on_collision() {
        let svc = service();
        let a = svc.create(&ctx(), named("Technology", None)).await.unwrap();
        let b = svc.create(&ctx(), named("Technology", None)).await.unwrap();
        let c = svc.create(&ctx(), named("Technology", None)).await.unwrap();
        assert_eq!(a.slug, "technology");
        assert_eq!(b.slug, "technology-1");
        assert_eq!(c.slug, "technology-2");
    }

    #[tokio::test]
    async fn test_explicit_slug_conflict() {
        let svc = service();
        svc.create(&ctx(), named("News", None)).await.unwrap();
        let input = CategoryInput {
            slug: Some("News".into()),
            ..named("Other", None)
        };
        let err = svc.create(&ctx(), input).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_rename_rederives_slug_unless_explicit() {
        let svc = service();
        let cat = svc.create(&ctx(), named("Sports", None)).await.unwrap();

        let renamed = svc
            .update(
                &ctx(),
                cat.id,
                CategoryInput {
                    slug: Some(cat.slug.clone()),
                    ..named("Athletics", None)
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.slug, "athletics");

        let explicit = svc
            .update(
                &ctx(),
                cat.id,
                CategoryInput {
                    slug: Some("custom-slug".into()),
                    ..named("Track", None)
                },
            )
            .await
            .unwrap();
        assert_eq!(explicit.slug, "custom-slug");
        assert_eq!(explicit.name, "Track");
    }

    #[tokio::test]
    async fn test_update_keeping_name_keeps_slug() {
        let svc = service();
        svc.create(&ctx(), named("Music", None)).await.unwrap();
        let second = svc.create(&ctx(), named("Music", None)).await.unwrap();
        assert_eq!(second.slug, "music-1");

        let same = svc.update(&ctx(), second.id, named("Music", None)).await.unwrap();
        assert_eq!(same.slug, "music-1");
    }

    #[tokio::test]
    async fn test_reparent_cycle_rejected() {
        let svc = service();
        let a = svc.create(&ctx(), named("A", None)).await.unwrap();
        let b = svc.create(&ctx(), named("B", Some(a.id))).await.unwrap();
        let c = svc.create(&ctx(), named("C", Some(b.id))).await.unwrap();

        let err = svc.move_category(&ctx(), a.id, Some(c.id)).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(err.message, "Cannot set a child category as parent.");

        let err = svc.update(&ctx(), a.id, named("A", Some(a.id))).await.unwrap_err();
        assert_eq!(err.message, "A category cannot be its own parent.");

        let moved = svc.move_category(&ctx(), c.id, None).await.unwrap();
        assert!(moved.is_root());
    }

    #[tokio::test]
    async fn test_strict_delete() {
        let svc = service();
        let parent = svc.create(&ctx(), named("Parent", None)).await.unwrap();
        let child = svc.create(&ctx(), named("Child", Some(parent.id))).await.unwrap();

        let err = svc.delete(&ctx(), parent.id).await.unwrap_err();
        assert!(err.is_conflict());

        svc.delete(&ctx(), child.id).await.unwrap();
        svc.delete(&ctx(), parent.id).await.unwrap();
        assert!(svc.get(parent.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_bulk_delete_is_all_or_nothing() {
        let svc = service();
        let parent = svc.create(&ctx(), named("Parent", None)).await.unwrap();
        svc.create(&ctx(), named("Child", Some(parent.id))).await.unwrap();
        let lone = svc.create(&ctx(), named("Lone", None)).await.unwrap();

        let err = svc.bulk_delete(&ctx(), &[lone.id, parent.id]).await.unwrap_err();
        assert!(err.is_conflict());
        assert!(svc.get(lone.id).await.is_ok());

        assert_eq!(svc.bulk_delete(&ctx(), &[lone.id]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_order_requires_known_ids() {
        let svc = service();
        let first = svc.create(&ctx(), named("First", None)).await.unwrap();

        let err = svc.update_order(&ctx(), &[]).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = svc
            .update_order(&ctx(), &[(first.id, 4), (Uuid::new_v4(), 1)])
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(svc.get(first.id).await.unwrap().sort_order, 0);

        assert_eq!(svc.update_order(&ctx(), &[(first.id, 4)]).await.unwrap(), 1);
        assert_eq!(svc.get(first.id).await.unwrap().sort_order, 4);
    }

    #[tokio::test]
    async fn test_detail_and_options() {
        let svc = service();
        let news = svc.create(&ctx(), named("News", None)).await.unwrap();
        let world = svc.create(&ctx(), named("World", Some(news.id))).await.unwrap();
        let europe = svc.create(&ctx(), named("Europe", Some(world.id))).await.unwrap();
        let sport = svc.create(&ctx(), named("Sport", None)).await.unwrap();

        let detail = svc.get_detail(europe.id).await.unwrap();
        assert_eq!(detail.path, "News > World > Europe");
        assert_eq!(detail.level, 2);
        assert_eq!(detail.breadcrumbs.len(), 3);

        let options = svc.parent_options(Some(world.id)).await.unwrap();
        let ids: Vec<Uuid> = options.iter().map(|o| o.id).collect();
        assert!(ids.contains(&news.id));
        assert!(ids.contains(&sport.id));
        assert!(!ids.contains(&world.id));
        assert!(!ids.contains(&europe.id));

        let descendants = svc.descendants(news.id).await.unwrap();
        assert_eq!(
            descendants.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![world.id, europe.id]
        );
    }

    #[tokio::test]
    async fn test_list_filters_and_paths() {
        let svc = service();
        let news = svc.create(&ctx(), named("News", None)).await.unwrap();
        svc.create(&ctx(), named("World", Some(news.id))).await.unwrap();
        svc.create(&ctx(), named("Weather", None)).await.unwrap();

        let filter = CategoryFilter {
            parent: ParentFilter::Children(news.id),
            ..CategoryFilter::default()
        };
        let page = svc.list(&filter, PageRequest::new(1, CATEGORY_PAGE_SIZE)).await.unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].path, "News > World");

        let filter = CategoryFilter {
            search: Some("wea".into()),
            ..CategoryFilter::default()
        };
        let page = svc.list(&filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].category.name, "Weather");
    }

    #[tokio::test]
    async fn test_missing_parent_is_not_found() {
        let svc = service();
        let err = svc
            .create(&ctx(), named("Orphan", Some(Uuid::new_v4())))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
