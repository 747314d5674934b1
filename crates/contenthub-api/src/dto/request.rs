//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use contenthub_core::types::SortDirection;
use contenthub_database::filter::{
    CategoryFilter, ParentFilter, TagFilter, TaxonomyOrder, parse_status,
};
use contenthub_service::media::{BrowseOrder, BrowseQuery};
use contenthub_service::{CategoryInput, TagInput};

/// Create or update a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "The name must be between 1 and 255 characters."))]
    pub name: String,
    /// Explicit slug.
    #[validate(length(max = 255))]
    pub slug: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Parent category.
    pub parent_id: Option<Uuid>,
    /// Sibling ordering key.
    #[validate(range(min = 0, message = "The order must be at least 0."))]
    pub sort_order: Option<i32>,
    /// Published flag.
    pub is_active: Option<bool>,
    /// SEO title.
    #[validate(length(max = 255))]
    pub meta_title: Option<String>,
    /// SEO description.
    #[validate(length(max = 500))]
    pub meta_description: Option<String>,
    /// SEO keywords.
    #[validate(length(max = 255))]
    pub meta_keywords: Option<String>,
    /// Open Graph image URL.
    #[validate(length(max = 255))]
    pub og_image: Option<String>,
    /// Hex color, e.g. `#ff0000`.
    #[validate(length(max = 7))]
    pub color: Option<String>,
    /// Icon identifier.
    #[validate(length(max = 50))]
    pub icon: Option<String>,
    /// Cover image media ID.
    pub image_id: Option<Uuid>,
}

impl From<CategoryRequest> for CategoryInput {
    fn from(req: CategoryRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
            description: req.description,
            parent_id: req.parent_id,
            sort_order: req.sort_order,
            is_active: req.is_active,
            meta_title: req.meta_title,
            meta_description: req.meta_description,
            meta_keywords: req.meta_keywords,
            og_image: req.og_image,
            color: req.color,
            icon: req.icon,
            image_id: req.image_id,
        }
    }
}

/// Create or update a tag.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TagRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "The name must be between 1 and 255 characters."))]
    pub name: String,
    /// Explicit slug.
    #[validate(length(max = 255))]
    pub slug: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Hex color.
    #[validate(length(max = 7))]
    pub color: Option<String>,
    /// Published flag.
    pub is_active: Option<bool>,
    /// Ordering key.
    #[validate(range(min = 0, message = "The order must be at least 0."))]
    pub sort_order: Option<i32>,
    /// SEO title.
    #[validate(length(max = 255))]
    pub meta_title: Option<String>,
    /// SEO description.
    #[validate(length(max = 500))]
    pub meta_description: Option<String>,
    /// SEO keywords.
    #[validate(length(max = 255))]
    pub meta_keywords: Option<String>,
    /// Open Graph image URL.
    #[validate(length(max = 255))]
    pub og_image: Option<String>,
}

impl From<TagRequest> for TagInput {
    fn from(req: TagRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
            description: req.description,
            color: req.color,
            is_active: req.is_active,
            sort_order: req.sort_order,
            meta_title: req.meta_title,
            meta_description: req.meta_description,
            meta_keywords: req.meta_keywords,
            og_image: req.og_image,
        }
    }
}

/// Move a category under a new parent (null for root).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCategoryRequest {
    /// New parent.
    pub parent_id: Option<Uuid>,
}

/// IDs selected for a bulk delete.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    /// Selected IDs.
    #[validate(length(min = 1, message = "Select at least one item."))]
    pub ids: Vec<Uuid>,
}

/// One entry of a reorder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItem {
    /// Item ID.
    pub id: Uuid,
    /// New ordering key.
    #[validate(range(min = 0, message = "The order must be at least 0."))]
    pub order: i32,
}

/// Batch `sort_order` update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    /// New positions.
    #[validate(nested)]
    pub items: Vec<OrderItem>,
}

impl UpdateOrderRequest {
    /// `(id, order)` pairs for the services.
    pub fn pairs(&self) -> Vec<(Uuid, i32)> {
        self.items.iter().map(|i| (i.id, i.order)).collect()
    }
}

/// Category listing query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryListQuery {
    /// Substring search.
    pub search: Option<String>,
    /// `active` or `inactive`.
    pub status: Option<String>,
    /// `root` or a parent ID.
    pub parent: Option<String>,
    /// `name`, `created_at`, or `order`.
    pub order_by: Option<String>,
    /// `asc` or `desc`.
    pub order_dir: Option<String>,
    /// 1-based page.
    pub page: Option<u64>,
}

impl CategoryListQuery {
    /// Convert into a store filter.
    pub fn filter(&self) -> CategoryFilter {
        let (order_by, direction) = TaxonomyOrder::parse(
            self.order_by.as_deref(),
            SortDirection::from_param(self.order_dir.as_deref()),
        );
        CategoryFilter {
            search: self.search.clone(),
            is_active: parse_status(self.status.as_deref()),
            parent: ParentFilter::parse(self.parent.as_deref()).unwrap_or_default(),
            order_by,
            direction,
        }
    }
}

/// Tag listing query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagListQuery {
    /// Substring search.
    pub search: Option<String>,
    /// `active` or `inactive`.
    pub status: Option<String>,
    /// `name`, `created_at`, or `order`.
    pub order_by: Option<String>,
    /// `asc` or `desc`.
    pub order_dir: Option<String>,
    /// 1-based page.
    pub page: Option<u64>,
}

impl TagListQuery {
    /// Convert into a store filter.
    pub fn filter(&self) -> TagFilter {
        let (order_by, direction) = TaxonomyOrder::parse(
            self.order_by.as_deref(),
            SortDirection::from_param(self.order_dir.as_deref()),
        );
        TagFilter {
            search: self.search.clone(),
            is_active: parse_status(self.status.as_deref()),
            order_by,
            direction,
        }
    }
}

/// Parent-options query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsQuery {
    /// Category being edited; it and its subtree are left out.
    pub exclude: Option<Uuid>,
}

/// Media browser query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseParams {
    /// Folder to list; absent for the root.
    pub folder: Option<Uuid>,
    /// Media name substring.
    pub search: Option<String>,
    /// MIME major type, e.g. `image`.
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    /// `name`, `date`, `size`, or `type`.
    pub order_by: Option<String>,
    /// `asc` or `desc`.
    pub order_dir: Option<String>,
    /// 1-based page.
    pub page: Option<u64>,
}

impl From<BrowseParams> for BrowseQuery {
    fn from(params: BrowseParams) -> Self {
        Self {
            folder: params.folder,
            search: params.search,
            media_type: params.media_type,
            order_by: BrowseOrder::parse(params.order_by.as_deref()),
            direction: SortDirection::from_param(params.order_dir.as_deref()),
            page: params.page.unwrap_or(1),
        }
    }
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Parent folder ID.
    pub parent_id: Option<Uuid>,
    /// Folder name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Rename folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderRequest {
    /// New folder name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Move folder request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFolderRequest {
    /// New parent folder ID (null for root).
    pub parent_id: Option<Uuid>,
}

/// Move media request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveMediaRequest {
    /// Target folder ID (null for root).
    pub folder_id: Option<Uuid>,
}
