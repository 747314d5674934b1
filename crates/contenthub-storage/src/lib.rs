//! # contenthub-storage
//!
//! Payload storage for the ContentHub media library: the local
//! filesystem backend, MIME detection, and image rendition generation.

#[cfg(feature = "local")]
pub mod local;
pub mod mime;
pub mod rendition;

#[cfg(feature = "local")]
pub use local::LocalMediaStorage;
pub use rendition::RenditionGenerator;
