//! Tag repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use contenthub_core::error::{AppError, ErrorKind};
use contenthub_core::result::AppResult;
use contenthub_core::types::{PageRequest, PageResponse};
use contenthub_entity::tag::{CreateTag, Tag};

use super::{escape_like, map_write_error};
use crate::filter::{TagFilter, search_term};
use crate::store::{TAG_SLUG_CONSTRAINT, TagStore};

/// Repository for tag CRUD and listing.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &TagFilter) {
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
}

#[async_trait]
impl TagStore for TagRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag", e))
    }

    async fn list(&self, filter: &TagFilter, page: &PageRequest) -> AppResult<PageResponse<Tag>> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tags WHERE TRUE");
        push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tags", e))?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM tags WHERE TRUE");
        push_filter(&mut qb, filter);
        qb.push(format!(
            " ORDER BY {} {}, id ASC LIMIT ",
            filter.order_by.column(),
            filter.direction.as_sql()
        ))
        .push_bind(page.limit() as i64)
        .push(" OFFSET ")
        .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let tags = qb
            .build_query_as::<Tag>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tags", e))?;

        Ok(PageResponse::new(tags, page.page, page.page_size, total as u64))
    }

    async fn find_slugs_like(&self, base: &str) -> AppResult<Vec<(Uuid, String)>> {
        sqlx::query_as::<_, (Uuid, String)>("SELECT id, slug FROM tags WHERE slug = $1 OR slug LIKE $2")
            .bind(base)
            .bind(format!("{}-%", escape_like(base)))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up slugs", e))
    }

    async fn create(&self, data: &CreateTag) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name, slug, description, color, is_active, sort_order, \
             meta_title, meta_description, meta_keywords, og_image) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(&data.color)
        .bind(data.is_active)
        .bind(data.sort_order)
        .bind(&data.meta_title)
        .bind(&data.meta_description)
        .bind(&data.meta_keywords)
        .bind(&data.og_image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                TAG_SLUG_CONSTRAINT,
                format!("The slug '{}' has already been taken.", data.slug),
                "Failed to create tag",
            )
        })
    }

    async fn update(&self, tag: &Tag) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = $2, slug = $3, description = $4, color = $5, is_active = $6, \
             sort_order = $7, meta_title = $8, meta_description = $9, meta_keywords = $10, \
             og_image = $11, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(tag.id)
        .bind(&tag.name)
        .bind(&tag.slug)
        .bind(&tag.description)
        .bind(&tag.color)
        .bind(tag.is_active)
        .bind(tag.sort_order)
        .bind(&tag.meta_title)
        .bind(&tag.meta_description)
        .bind(&tag.meta_keywords)
        .bind(&tag.og_image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                TAG_SLUG_CONSTRAINT,
                format!("The slug '{}' has already been taken.", tag.slug),
                "Failed to update tag",
            )
        })?
        .ok_or_else(|| AppError::not_found(format!("Tag {} not found", tag.id)))
    }

    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tags", e))?;
        Ok(result.rows_affected())
    }

    async fn update_order(&self, orders: &[(Uuid, i32)]) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let mut updated = 0;
        for (id, order) in orders {
            let result =
                sqlx::query("UPDATE tags SET sort_order = $2, updated_at = NOW() WHERE id = $1")
                    .bind(id)
                    .bind(order)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to update tag order", e)
                    })?;
            updated += result.rows_affected();
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit tag order", e)
        })?;
        Ok(updated)
    }
}
