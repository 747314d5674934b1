//! # contenthub-core
//!
//! Core crate for ContentHub. Contains the payload-storage trait,
//! configuration schemas, pagination/sorting types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other ContentHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
