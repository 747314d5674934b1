//! Media folder management and tree services.

pub mod service;
pub mod tree;

pub use service::{FolderDeleteSummary, FolderService};
pub use tree::FolderTreeService;
