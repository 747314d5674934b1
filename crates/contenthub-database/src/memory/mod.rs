//! In-memory store backend.
//!
//! All four tables live behind one `tokio::sync::RwLock`, so a method that
//! touches several of them (subtree delete, media delete nulling category
//! images) is atomic the same way a PostgreSQL transaction is. Unique
//! constraints and foreign-key actions from `migrations/` are enforced by
//! hand and surface as the same `AppError` kinds the repositories produce.

mod category;
mod folder;
mod media;
mod tag;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use contenthub_entity::category::Category;
use contenthub_entity::folder::MediaFolder;
use contenthub_entity::media::Media;
use contenthub_entity::tag::Tag;

/// Table contents of the in-memory backend.
#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    pub(crate) categories: HashMap<Uuid, Category>,
    pub(crate) tags: HashMap<Uuid, Tag>,
    pub(crate) folders: HashMap<Uuid, MediaFolder>,
    pub(crate) media: HashMap<Uuid, Media>,
}

/// Process-local database implementing every store trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Slugs in `slugs` equal to `base` or shaped `base-*`.
pub(crate) fn slugs_like<'a>(
    slugs: impl Iterator<Item = (Uuid, &'a str)>,
    base: &str,
) -> Vec<(Uuid, String)> {
    let prefix = format!("{base}-");
    slugs
        .filter(|(_, slug)| *slug == base || slug.starts_with(&prefix))
        .map(|(id, slug)| (id, slug.to_string()))
        .collect()
}
