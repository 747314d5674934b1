//! Media item domain entities.

pub mod model;
pub mod view;

pub use model::{CreateMedia, Media, THUMB_CONVERSION};
pub use view::{BrowseEntry, MediaView};
