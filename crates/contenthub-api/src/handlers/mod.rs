//! Route handlers organized by domain.

pub mod category;
pub mod folder;
pub mod health;
pub mod media;
pub mod tag;
