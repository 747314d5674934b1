//! Hierarchy engine shared by the category tree and the media folder tree.
//!
//! Everything here is pure: services load the rows, build a [`NodeArena`],
//! ask it questions, and only then write. Traversals are iterative and
//! bounded by the arena size, so a corrupt parent chain cannot hang a
//! request.

pub mod arena;
pub mod cascade;
pub mod guard;
pub mod path;
pub mod slug;

pub use arena::NodeArena;
pub use cascade::{CascadePlan, plan_folder_delete};
pub use guard::{DeletePolicy, TreeKind, validate_delete, validate_reparent, validate_unique_name};
pub use path::{CATEGORY_PATH_SEPARATOR, folder_path, rematerialize_subtree};
pub use slug::{derive_slug, slugify};
