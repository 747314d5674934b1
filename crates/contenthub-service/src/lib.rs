//! # contenthub-service
//!
//! Business logic service layer for ContentHub. Services validate against
//! the pure [`hierarchy`] engine before anything is written, then hand
//! each atomic change to a single store call.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod category;
pub mod context;
pub mod folder;
pub mod hierarchy;
pub mod media;
pub mod tag;

pub use category::{CategoryInput, CategoryService};
pub use context::RequestContext;
pub use folder::{FolderDeleteSummary, FolderService, FolderTreeService};
pub use media::{BrowseService, MediaService};
pub use tag::{TagInput, TagService};
