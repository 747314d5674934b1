//! Media folder handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use contenthub_entity::folder::{FolderTree, MediaFolder};
use contenthub_entity::node::Breadcrumb;
use contenthub_service::folder::FolderDeleteSummary;
use contenthub_service::folder::service::CreateFolderRequest as SvcCreateFolder;

use crate::dto::request::{CreateFolderRequest, MoveFolderRequest, RenameFolderRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/media/folders
pub async fn folder_tree(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<ApiResponse<FolderTree>>> {
    let tree = state.folder_tree_service.get_tree().await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// POST /api/admin/media/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<MediaFolder>>)> {
    req.validate()?;
    let folder = state
        .folder_service
        .create(
            &auth,
            SvcCreateFolder {
                parent_id: req.parent_id,
                name: req.name,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// PUT /api/admin/media/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameFolderRequest>,
) -> ApiResult<Json<ApiResponse<MediaFolder>>> {
    req.validate()?;
    let folder = state.folder_service.rename(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/admin/media/folders/{id}/move
pub async fn move_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveFolderRequest>,
) -> ApiResult<Json<ApiResponse<MediaFolder>>> {
    let folder = state
        .folder_service
        .move_folder(&auth, id, req.parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/admin/media/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<FolderDeleteSummary>>> {
    let summary = state.folder_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/admin/media/folders/{id}/breadcrumbs
pub async fn folder_breadcrumbs(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Breadcrumb>>>> {
    let trail = state.folder_tree_service.get_breadcrumbs(id).await?;
    Ok(Json(ApiResponse::ok(trail)))
}

/// GET /api/admin/media/folders/{id}/descendants
pub async fn folder_descendants(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<MediaFolder>>>> {
    let below = state.folder_tree_service.get_descendants(id).await?;
    Ok(Json(ApiResponse::ok(below)))
}
