//! Combined folder/media listing for the library browser and picker.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_core::types::{PageRequest, PageResponse, SortDirection};
use contenthub_database::store::{FolderStore, MediaStore};
use contenthub_entity::folder::MediaFolder;
use contenthub_entity::media::{BrowseEntry, MediaView};
use contenthub_entity::node::Breadcrumb;

use crate::hierarchy::NodeArena;

/// Entries per browser page.
pub const MEDIA_PAGE_SIZE: u64 = 24;

/// Sort key of the library browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowseOrder {
    /// Case-insensitive name.
    #[default]
    Name,
    /// Creation time.
    Date,
    /// Payload size; folders count as zero.
    Size,
    /// MIME type with folders first.
    Type,
}

impl BrowseOrder {
    /// Parse the `order_by` query value, falling back to name.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("date") => Self::Date,
            Some("size") => Self::Size,
            Some("type") => Self::Type,
            _ => Self::Name,
        }
    }

    fn compare(&self, a: &BrowseEntry, b: &BrowseEntry) -> Ordering {
        match self {
            Self::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
            Self::Date => a.created_at().cmp(&b.created_at()),
            Self::Size => a.size().cmp(&b.size()),
            Self::Type => a.mime_type().cmp(b.mime_type()),
        }
    }
}

/// Browser query.
#[derive(Debug, Clone, Default)]
pub struct BrowseQuery {
    /// Folder to list (None for the library root).
    pub folder: Option<Uuid>,
    /// Case-insensitive substring over media names.
    pub search: Option<String>,
    /// MIME major type, e.g. `image`.
    pub media_type: Option<String>,
    /// Sort key.
    pub order_by: BrowseOrder,
    /// Sort direction.
    pub direction: SortDirection,
    /// 1-based page number.
    pub page: u64,
}

/// One browser screen.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseResult<E: Serialize> {
    /// Entries of the current folder.
    pub items: E,
    /// The folder being browsed, if not the root.
    pub current_folder: Option<MediaFolder>,
    /// Root-first trail to the current folder.
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Lists folders and media side by side.
#[derive(Debug, Clone)]
pub struct BrowseService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Media store.
    media: Arc<dyn MediaStore>,
    /// Prefix for public payload URLs.
    url_prefix: String,
}

impl BrowseService {
    /// Creates a new browse service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        media: Arc<dyn MediaStore>,
        url_prefix: impl Into<String>,
    ) -> Self {
        Self {
            folders,
            media,
            url_prefix: url_prefix.into(),
        }
    }

    /// Paged listing of a folder: subfolders plus matching media.
    pub async fn browse(
        &self,
        query: &BrowseQuery,
    ) -> Result<BrowseResult<PageResponse<BrowseEntry>>, AppError> {
        let type_prefix = query
            .media_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| format!("{t}/"));

        let (entries, current_folder, breadcrumbs) = self
            .collect(query, |media| {
                type_prefix
                    .as_deref()
                    .is_none_or(|prefix| media.mime_type.starts_with(prefix))
            })
            .await?;

        let page = PageRequest::new(query.page, MEDIA_PAGE_SIZE);
        Ok(BrowseResult {
            items: page.slice(entries),
            current_folder,
            breadcrumbs,
        })
    }

    /// Unpaged listing for the image picker: subfolders plus images only.
    pub async fn picker(
        &self,
        query: &BrowseQuery,
    ) -> Result<BrowseResult<Vec<BrowseEntry>>, AppError> {
        let (entries, current_folder, breadcrumbs) = self
            .collect(query, |media| media.mime_type.starts_with("image/"))
            .await?;
        Ok(BrowseResult {
            items: entries,
            current_folder,
            breadcrumbs,
        })
    }

    async fn collect(
        &self,
        query: &BrowseQuery,
        keep: impl Fn(&contenthub_entity::media::Media) -> bool,
    ) -> Result<(Vec<BrowseEntry>, Option<MediaFolder>, Vec<Breadcrumb>), AppError> {
        let (current_folder, breadcrumbs) = match query.folder {
            Some(id) => {
                let all = self.folders.find_all().await?;
                let arena = NodeArena::from_nodes(&all);
                if !arena.contains(id) {
                    return Err(AppError::not_found("Folder not found"));
                }
                let crumbs = arena.breadcrumbs(id)?;
                (all.into_iter().find(|f| f.id == id), crumbs)
            }
            None => (None, Vec::new()),
        };

        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut entries: Vec<BrowseEntry> = self
            .folders
            .find_children(query.folder)
            .await?
            .into_iter()
            .map(BrowseEntry::Folder)
            .collect();

        entries.extend(
            self.media
                .find_in_folder(query.folder)
                .await?
                .into_iter()
                .filter(|m| keep(m))
                .filter(|m| {
                    needle
                        .as_deref()
                        .is_none_or(|n| m.name.to_lowercase().contains(n))
                })
                .map(|m| BrowseEntry::File(MediaView::new(m, &self.url_prefix))),
        );

        entries.sort_by(|a, b| query.direction.apply(query.order_by.compare(a, b)));
        Ok((entries, current_folder, breadcrumbs))
    }
}
