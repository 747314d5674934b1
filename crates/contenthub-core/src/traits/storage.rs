//! Payload storage trait for media binaries and their renditions.

use std::path::PathBuf;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading payload contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for media payload backends.
///
/// Paths are relative to the backend root (e.g. `{media_id}/photo.jpg`).
/// The trait lives in `contenthub-core` so services can depend on it
/// without pulling in a concrete backend; `contenthub-storage` implements it.
#[async_trait]
pub trait MediaStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is reachable and writable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read a payload as a byte stream.
    async fn read(&self, path: &str) -> AppResult<ByteStream>;

    /// Read a payload into memory.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Write bytes to the given path, creating parent directories.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete a payload. Returns `false` when nothing was there.
    async fn delete(&self, path: &str) -> AppResult<bool>;

    /// Check whether a payload exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Resolve a relative path to its location on the backend.
    fn path_for(&self, path: &str) -> PathBuf;

    /// Remove the directory containing `path` if empty, then walk up at
    /// most `levels` directories doing the same. Never removes the root.
    ///
    /// Returns how many directories were removed.
    async fn prune_empty_dirs(&self, path: &str, levels: usize) -> AppResult<usize>;
}
