//! Category domain entities.

pub mod model;
pub mod view;

pub use model::{Category, CreateCategory};
pub use view::{CategoryDetail, CategoryOption, CategoryRow};
