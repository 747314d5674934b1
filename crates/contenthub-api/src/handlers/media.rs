//! Media library handlers: browse, upload, download, move, delete.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_core::types::PageResponse;
use contenthub_entity::media::{BrowseEntry, MediaView};
use contenthub_service::media::{BrowseQuery, BrowseResult, UploadRequest};

use crate::dto::request::{BrowseParams, MoveMediaRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/media
pub async fn browse_media(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<BrowseParams>,
) -> ApiResult<Json<ApiResponse<BrowseResult<PageResponse<BrowseEntry>>>>> {
    let result = state.browse_service.browse(&params.into()).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/admin/media/picker
pub async fn media_picker(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<BrowseParams>,
) -> ApiResult<Json<ApiResponse<BrowseResult<Vec<BrowseEntry>>>>> {
    let query: BrowseQuery = params.into();
    let result = state.browse_service.picker(&query).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/admin/media (multipart: `file`, optional `folder_id`)
pub async fn upload_media(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ApiResponse<MediaView>>)> {
    let mut folder_id: Option<Uuid> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "folder_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                let text = text.trim();
                if !text.is_empty() {
                    folder_id = Some(
                        Uuid::parse_str(text)
                            .map_err(|_| AppError::validation("Invalid folder_id"))?,
                    );
                }
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                content_type = field.content_type().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::validation("The file field is required."))?;
    let media = state
        .media_service
        .upload(
            &auth,
            UploadRequest {
                folder_id,
                file_name: file_name.unwrap_or_else(|| "file".to_string()),
                content_type,
                data,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(state.media_service.view(media))),
    ))
}

/// GET /api/admin/media/{id}/download
pub async fn download_media(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let download = state.media_service.download(id).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        download.file_name.replace('"', "")
    );

    let response = (
        [
            (header::CONTENT_TYPE, download.mime_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(download.data),
    )
        .into_response();
    Ok(response)
}

/// POST /api/admin/media/{id}/move
pub async fn move_media(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveMediaRequest>,
) -> ApiResult<Json<ApiResponse<MediaView>>> {
    let media = state
        .media_service
        .move_media(&auth, id, req.folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(state.media_service.view(media))))
}

/// DELETE /api/admin/media/{id}
pub async fn delete_media(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.media_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Media deleted successfully.",
    ))))
}
