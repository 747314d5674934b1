//! Route definitions for the ContentHub HTTP API.
//!
//! Admin routes are mounted under `/api/admin` and require an
//! `X-Actor-Id` header; `/api/health` is open. The router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart boundaries and form fields on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let admin_routes = Router::new()
        .merge(category_routes())
        .merge(tag_routes())
        .merge(folder_routes())
        .merge(media_routes());

    let api_routes = Router::new()
        .nest("/admin", admin_routes)
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::compression::build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Category CRUD, tree navigation, bulk operations
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route("/categories/options", get(handlers::category::parent_options))
        .route(
            "/categories/bulk-delete",
            post(handlers::category::bulk_delete_categories),
        )
        .route(
            "/categories/update-order",
            post(handlers::category::update_category_order),
        )
        .route(
            "/categories/{id}",
            get(handlers::category::get_category)
                .put(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        )
        .route("/categories/{id}/move", put(handlers::category::move_category))
        .route(
            "/categories/{id}/breadcrumbs",
            get(handlers::category::category_breadcrumbs),
        )
        .route(
            "/categories/{id}/descendants",
            get(handlers::category::category_descendants),
        )
}

/// Tag CRUD and bulk operations
fn tag_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tags",
            get(handlers::tag::list_tags).post(handlers::tag::create_tag),
        )
        .route("/tags/bulk-delete", post(handlers::tag::bulk_delete_tags))
        .route("/tags/update-order", post(handlers::tag::update_tag_order))
        .route(
            "/tags/{id}",
            get(handlers::tag::get_tag)
                .put(handlers::tag::update_tag)
                .delete(handlers::tag::delete_tag),
        )
}

/// Media folder tree
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/media/folders",
            get(handlers::folder::folder_tree).post(handlers::folder::create_folder),
        )
        .route(
            "/media/folders/{id}",
            put(handlers::folder::rename_folder).delete(handlers::folder::delete_folder),
        )
        .route("/media/folders/{id}/move", put(handlers::folder::move_folder))
        .route(
            "/media/folders/{id}/breadcrumbs",
            get(handlers::folder::folder_breadcrumbs),
        )
        .route(
            "/media/folders/{id}/descendants",
            get(handlers::folder::folder_descendants),
        )
}

/// Media browse, upload, download, move, delete
fn media_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/media",
            get(handlers::media::browse_media).post(handlers::media::upload_media),
        )
        .route("/media/picker", get(handlers::media::media_picker))
        .route(
            "/media/{id}",
            axum::routing::delete(handlers::media::delete_media),
        )
        .route("/media/{id}/download", get(handlers::media::download_media))
        .route("/media/{id}/move", post(handlers::media::move_media))
}
