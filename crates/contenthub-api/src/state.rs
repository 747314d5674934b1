//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use contenthub_core::config::AppConfig;
use contenthub_core::traits::storage::MediaStorage;
use contenthub_database::Stores;
use contenthub_service::{
    BrowseService, CategoryService, FolderService, FolderTreeService, MediaService, TagService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Store backend (PostgreSQL or in-memory)
    pub stores: Stores,
    /// Media payload storage
    pub storage: Arc<dyn MediaStorage>,

    // ── Services ─────────────────────────────────────────────
    /// Category tree service
    pub category_service: Arc<CategoryService>,
    /// Tag service
    pub tag_service: Arc<TagService>,
    /// Media folder service
    pub folder_service: Arc<FolderService>,
    /// Folder tree and ancestry service
    pub folder_tree_service: Arc<FolderTreeService>,
    /// Media item service
    pub media_service: Arc<MediaService>,
    /// Library browser
    pub browse_service: Arc<BrowseService>,
}

impl AppState {
    /// Wire every service from the store backend and payload storage.
    pub fn new(config: AppConfig, stores: Stores, storage: Arc<dyn MediaStorage>) -> Self {
        let category_service = Arc::new(CategoryService::new(
            Arc::clone(&stores.categories),
            Arc::clone(&stores.media),
        ));
        let tag_service = Arc::new(TagService::new(Arc::clone(&stores.tags)));
        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.media),
            Arc::clone(&storage),
        ));
        let folder_tree_service = Arc::new(FolderTreeService::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.media),
        ));
        let media_service = Arc::new(MediaService::new(
            Arc::clone(&stores.media),
            Arc::clone(&stores.folders),
            Arc::clone(&storage),
            config.storage.clone(),
        ));
        let browse_service = Arc::new(BrowseService::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.media),
            config.storage.public_url_prefix.clone(),
        ));

        Self {
            config: Arc::new(config),
            stores,
            storage,
            category_service,
            tag_service,
            folder_service,
            folder_tree_service,
            media_service,
            browse_service,
        }
    }
}
