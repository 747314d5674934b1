//! Category tree handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use contenthub_core::types::{PageRequest, PageResponse};
use contenthub_entity::category::{Category, CategoryDetail, CategoryOption, CategoryRow};
use contenthub_entity::node::Breadcrumb;
use contenthub_service::category::service::CATEGORY_PAGE_SIZE;

use crate::dto::request::{
    BulkDeleteRequest, CategoryListQuery, CategoryRequest, MoveCategoryRequest, OptionsQuery,
    UpdateOrderRequest,
};
use crate::dto::response::{ApiResponse, CountResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/categories
pub async fn list_categories(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<CategoryListQuery>,
) -> ApiResult<Json<ApiResponse<PageResponse<CategoryRow>>>> {
    let page = PageRequest::new(query.page.unwrap_or(1), CATEGORY_PAGE_SIZE);
    let result = state
        .category_service
        .list(&query.filter(), page)
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/admin/categories/options?exclude=...
pub async fn parent_options(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<OptionsQuery>,
) -> ApiResult<Json<ApiResponse<Vec<CategoryOption>>>> {
    let options = state.category_service.parent_options(query.exclude).await?;
    Ok(Json(ApiResponse::ok(options)))
}

/// GET /api/admin/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<CategoryDetail>>> {
    let detail = state.category_service.get_detail(id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// POST /api/admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Category>>)> {
    req.validate()?;
    let category = state.category_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CategoryRequest>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    req.validate()?;
    let category = state.category_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// PUT /api/admin/categories/{id}/move
pub async fn move_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveCategoryRequest>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let category = state
        .category_service
        .move_category(&auth, id, req.parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// DELETE /api/admin/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.category_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Category deleted successfully.",
    ))))
}

/// GET /api/admin/categories/{id}/breadcrumbs
pub async fn category_breadcrumbs(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Breadcrumb>>>> {
    let trail = state.category_service.breadcrumbs(id).await?;
    Ok(Json(ApiResponse::ok(trail)))
}

/// GET /api/admin/categories/{id}/descendants
pub async fn category_descendants(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Category>>>> {
    let below = state.category_service.descendants(id).await?;
    Ok(Json(ApiResponse::ok(below)))
}

/// POST /api/admin/categories/bulk-delete
pub async fn bulk_delete_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BulkDeleteRequest>,
) -> ApiResult<Json<ApiResponse<CountResponse>>> {
    req.validate()?;
    let count = state.category_service.bulk_delete(&auth, &req.ids).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// POST /api/admin/categories/update-order
pub async fn update_category_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateOrderRequest>,
) -> ApiResult<Json<ApiResponse<CountResponse>>> {
    req.validate()?;
    let count = state
        .category_service
        .update_order(&auth, &req.pairs())
        .await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}
