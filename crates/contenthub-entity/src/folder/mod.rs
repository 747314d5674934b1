//! Media folder domain entities.

pub mod model;
pub mod tree;

pub use model::{CreateMediaFolder, MediaFolder};
pub use tree::{FolderNode, FolderTree};
