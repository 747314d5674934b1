//! Tag handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use contenthub_core::types::{PageRequest, PageResponse};
use contenthub_entity::tag::Tag;

use crate::dto::request::{BulkDeleteRequest, TagListQuery, TagRequest, UpdateOrderRequest};
use crate::dto::response::{ApiResponse, CountResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Tags per listing page.
const TAG_PAGE_SIZE: u64 = 20;

/// GET /api/admin/tags
pub async fn list_tags(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<TagListQuery>,
) -> ApiResult<Json<ApiResponse<PageResponse<Tag>>>> {
    let page = PageRequest::new(query.page.unwrap_or(1), TAG_PAGE_SIZE);
    let result = state.tag_service.list(&query.filter(), page).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/admin/tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Tag>>> {
    let tag = state.tag_service.get(id).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// POST /api/admin/tags
pub async fn create_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<TagRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Tag>>)> {
    req.validate()?;
    let tag = state.tag_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tag))))
}

/// PUT /api/admin/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<TagRequest>,
) -> ApiResult<Json<ApiResponse<Tag>>> {
    req.validate()?;
    let tag = state.tag_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// DELETE /api/admin/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.tag_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Tag deleted successfully.",
    ))))
}

/// POST /api/admin/tags/bulk-delete
pub async fn bulk_delete_tags(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BulkDeleteRequest>,
) -> ApiResult<Json<ApiResponse<CountResponse>>> {
    req.validate()?;
    let count = state.tag_service.bulk_delete(&auth, &req.ids).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// POST /api/admin/tags/update-order
pub async fn update_tag_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateOrderRequest>,
) -> ApiResult<Json<ApiResponse<CountResponse>>> {
    req.validate()?;
    let count = state.tag_service.update_order(&auth, &req.pairs()).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}
