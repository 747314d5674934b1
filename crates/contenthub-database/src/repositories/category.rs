//! Category repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use contenthub_core::error::{AppError, ErrorKind};
use contenthub_core::result::AppResult;
use contenthub_core::types::{PageRequest, PageResponse};
use contenthub_entity::category::{Category, CreateCategory};

use super::{escape_like, map_write_error};
use crate::filter::{CategoryFilter, ParentFilter, search_term};
use crate::store::{CATEGORY_SLUG_CONSTRAINT, CategoryStore};

/// Repository for category CRUD and listing.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &CategoryFilter) {
    if let Some(term) = search_term(&filter.search) {
        let pattern = format!("%{}%", escape_like(term));
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR slug ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(active) = filter.is_active {
        qb.push(" AND is_active = ").push_bind(active);
    }
    match filter.parent {
        ParentFilter::Any => {}
        ParentFilter::Root => {
            qb.push(" AND parent_id IS NULL");
        }
        ParentFilter::Children(parent_id) => {
            qb.push(" AND parent_id = ").push_bind(parent_id);
        }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY sort_order ASC, name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load categories", e)
            })
    }

    async fn list(
        &self,
        filter: &CategoryFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Category>> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM categories WHERE TRUE");
        push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count categories", e)
            })?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM categories WHERE TRUE");
        push_filter(&mut qb, filter);
        qb.push(format!(
            " ORDER BY {} {}, id ASC LIMIT ",
            filter.order_by.column(),
            filter.direction.as_sql()
        ))
        .push_bind(page.limit() as i64)
        .push(" OFFSET ")
        .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let categories = qb
            .build_query_as::<Category>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list categories", e)
            })?;

        Ok(PageResponse::new(
            categories,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_slugs_like(&self, base: &str) -> AppResult<Vec<(Uuid, String)>> {
        sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, slug FROM categories WHERE slug = $1 OR slug LIKE $2",
        )
        .bind(base)
        .bind(format!("{}-%", escape_like(base)))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up slugs", e))
    }

    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (parent_id, name, slug, description, sort_order, is_active, \
             meta_title, meta_description, meta_keywords, og_image, color, icon, image_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(data.parent_id)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(data.sort_order)
        .bind(data.is_active)
        .bind(&data.meta_title)
        .bind(&data.meta_description)
        .bind(&data.meta_keywords)
        .bind(&data.og_image)
        .bind(&data.color)
        .bind(&data.icon)
        .bind(data.image_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                CATEGORY_SLUG_CONSTRAINT,
                format!("The slug '{}' has already been taken.", data.slug),
                "Failed to create category",
            )
        })
    }

    async fn update(&self, category: &Category) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET parent_id = $2, name = $3, slug = $4, description = $5, \
             sort_order = $6, is_active = $7, meta_title = $8, meta_description = $9, \
             meta_keywords = $10, og_image = $11, color = $12, icon = $13, image_id = $14, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(category.id)
        .bind(category.parent_id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(category.sort_order)
        .bind(category.is_active)
        .bind(&category.meta_title)
        .bind(&category.meta_description)
        .bind(&category.meta_keywords)
        .bind(&category.og_image)
        .bind(&category.color)
        .bind(&category.icon)
        .bind(category.image_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                CATEGORY_SLUG_CONSTRAINT,
                format!("The slug '{}' has already been taken.", category.slug),
                "Failed to update category",
            )
        })?
        .ok_or_else(|| AppError::not_found(format!("Category {} not found", category.id)))
    }

    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::conflict(
                        "Cannot delete category with subcategories. Delete or move subcategories first.",
                    )
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to delete categories", e),
            })?;
        Ok(result.rows_affected())
    }

    async fn update_order(&self, orders: &[(Uuid, i32)]) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let mut updated = 0;
        for (id, order) in orders {
            let result = sqlx::query(
                "UPDATE categories SET sort_order = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(id)
            .bind(order)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update category order", e)
            })?;
            updated += result.rows_affected();
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit category order", e)
        })?;
        Ok(updated)
    }
}
