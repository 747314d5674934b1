//! Store bundle that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use contenthub_core::config::{DatabaseConfig, DatabaseProvider};
use contenthub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryDatabase;
use crate::repositories::{CategoryRepository, FolderRepository, MediaRepository, TagRepository};
use crate::store::{CategoryStore, FolderStore, MediaStore, TagStore};

/// The backend behind a [`Stores`] bundle.
#[derive(Debug, Clone)]
enum Backend {
    Postgres(DatabasePool),
    Memory(MemoryDatabase),
}

/// Every store the services need, backed by one provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Category tree store.
    pub categories: Arc<dyn CategoryStore>,
    /// Tag store.
    pub tags: Arc<dyn TagStore>,
    /// Media folder tree store.
    pub folders: Arc<dyn FolderStore>,
    /// Media item store.
    pub media: Arc<dyn MediaStore>,
    backend: Backend,
}

impl Stores {
    /// Build the stores for the configured provider.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                info!("Initializing PostgreSQL stores");
                let pool = DatabasePool::connect(config).await?;
                Ok(Self::postgres(pool))
            }
            DatabaseProvider::Memory => {
                info!("Initializing in-memory stores");
                Ok(Self::memory(MemoryDatabase::new()))
            }
        }
    }

    /// Stores over an open PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            categories: Arc::new(CategoryRepository::new(pg.clone())),
            tags: Arc::new(TagRepository::new(pg.clone())),
            folders: Arc::new(FolderRepository::new(pg.clone())),
            media: Arc::new(MediaRepository::new(pg)),
            backend: Backend::Postgres(pool),
        }
    }

    /// Stores sharing one in-memory database.
    pub fn memory(db: MemoryDatabase) -> Self {
        Self {
            categories: Arc::new(db.clone()),
            tags: Arc::new(db.clone()),
            folders: Arc::new(db.clone()),
            media: Arc::new(db.clone()),
            backend: Backend::Memory(db),
        }
    }

    /// Provider name for health reporting.
    pub fn provider_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory(_) => "memory",
        }
    }

    /// Check backend connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.backend {
            Backend::Postgres(pool) => pool.health_check().await,
            Backend::Memory(_) => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
        }
    }
}
