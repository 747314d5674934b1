//! Store traits the services depend on.
//!
//! Every mutation that must be atomic is a single trait method, so each
//! backend can wrap it in one transaction (or one write lock).

use async_trait::async_trait;
use uuid::Uuid;

use contenthub_core::result::AppResult;
use contenthub_core::types::{PageRequest, PageResponse};
use contenthub_entity::category::{Category, CreateCategory};
use contenthub_entity::folder::{CreateMediaFolder, MediaFolder};
use contenthub_entity::media::{CreateMedia, Media};
use contenthub_entity::tag::{CreateTag, Tag};

use crate::filter::{CategoryFilter, TagFilter};

/// Unique constraint backing `categories.slug`.
pub const CATEGORY_SLUG_CONSTRAINT: &str = "categories_slug_key";
/// Unique constraint backing `tags.slug`.
pub const TAG_SLUG_CONSTRAINT: &str = "tags_slug_key";
/// Unique index backing `(parent_id, name)` on media folders.
pub const FOLDER_NAME_CONSTRAINT: &str = "media_folders_parent_name_key";

/// Persistence for the category tree.
#[async_trait]
pub trait CategoryStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a category by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>>;

    /// Load every category ordered by `sort_order`, then name.
    async fn find_all(&self) -> AppResult<Vec<Category>>;

    /// Filtered, sorted page of categories.
    async fn list(
        &self,
        filter: &CategoryFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Category>>;

    /// Slugs equal to `base` or of the form `base-*`, with their owners.
    async fn find_slugs_like(&self, base: &str) -> AppResult<Vec<(Uuid, String)>>;

    /// Insert a category.
    async fn create(&self, data: &CreateCategory) -> AppResult<Category>;

    /// Persist every mutable column of `category`; bumps `updated_at`.
    async fn update(&self, category: &Category) -> AppResult<Category>;

    /// Delete categories in one transaction. Returns rows removed.
    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64>;

    /// Set `sort_order` for each `(id, order)` pair in one transaction.
    async fn update_order(&self, orders: &[(Uuid, i32)]) -> AppResult<u64>;
}

/// Persistence for flat tags.
#[async_trait]
pub trait TagStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a tag by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tag>>;

    /// Filtered, sorted page of tags.
    async fn list(&self, filter: &TagFilter, page: &PageRequest) -> AppResult<PageResponse<Tag>>;

    /// Slugs equal to `base` or of the form `base-*`, with their owners.
    async fn find_slugs_like(&self, base: &str) -> AppResult<Vec<(Uuid, String)>>;

    /// Insert a tag.
    async fn create(&self, data: &CreateTag) -> AppResult<Tag>;

    /// Persist every mutable column of `tag`; bumps `updated_at`.
    async fn update(&self, tag: &Tag) -> AppResult<Tag>;

    /// Delete tags in one transaction. Returns rows removed.
    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64>;

    /// Set `sort_order` for each `(id, order)` pair in one transaction.
    async fn update_order(&self, orders: &[(Uuid, i32)]) -> AppResult<u64>;
}

/// Persistence for the media folder tree.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MediaFolder>>;

    /// Load every folder ordered by path.
    async fn find_all(&self) -> AppResult<Vec<MediaFolder>>;

    /// Direct children of `parent_id` (None for roots), ordered by name.
    async fn find_children(&self, parent_id: Option<Uuid>) -> AppResult<Vec<MediaFolder>>;

    /// Find the sibling with the given name under `parent_id`.
    async fn find_by_parent_and_name(
        &self,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<MediaFolder>>;

    /// Insert a folder.
    async fn create(&self, data: &CreateMediaFolder) -> AppResult<MediaFolder>;

    /// Persist `parent_id`, `name`, and `path` of every given folder in one
    /// transaction. The first entry is the folder being renamed or moved;
    /// the rest are its descendants with re-derived paths.
    async fn update_subtree(&self, folders: &[MediaFolder]) -> AppResult<MediaFolder>;

    /// Delete the given media rows, then the given folders in order, in
    /// one transaction. `folder_ids` must be children-before-parents.
    async fn delete_subtree(&self, media_ids: &[Uuid], folder_ids: &[Uuid]) -> AppResult<()>;
}

/// Persistence for media items.
#[async_trait]
pub trait MediaStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a media item by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Media>>;

    /// Media directly inside `folder_id` (None for the library root).
    async fn find_in_folder(&self, folder_id: Option<Uuid>) -> AppResult<Vec<Media>>;

    /// Media inside any of the given folders.
    async fn find_in_folders(&self, folder_ids: &[Uuid]) -> AppResult<Vec<Media>>;

    /// Number of media items per folder (None key for the root).
    async fn count_by_folder(&self) -> AppResult<Vec<(Option<Uuid>, i64)>>;

    /// Insert a media record.
    async fn create(&self, data: &CreateMedia) -> AppResult<Media>;

    /// Persist `folder_id`, `name`, and `conversions`; bumps `updated_at`.
    async fn update(&self, media: &Media) -> AppResult<Media>;

    /// Delete a media record. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
