//! # contenthub-api
//!
//! HTTP API layer for ContentHub built on Axum.
//!
//! Provides the admin REST endpoints for categories, tags, and the media
//! library, plus middleware (CORS, compression, timeouts, request
//! logging), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
