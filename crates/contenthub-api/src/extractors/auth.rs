//! `AuthUser` extractor: turns the gateway's `X-Actor-Id` header into a
//! request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_service::context::RequestContext;

use crate::error::ApiError;

/// Header carrying the authenticated admin's ID, set by the upstream gateway.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Extracted actor context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing X-Actor-Id header"))?;

        let actor_id = Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::authentication("Invalid X-Actor-Id header"))?;

        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .unwrap_or("unknown")
            .to_string();

        Ok(AuthUser(RequestContext::new(actor_id, ip_address)))
    }
}
