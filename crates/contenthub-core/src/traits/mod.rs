//! Core traits defined in `contenthub-core` and implemented by other crates.

pub mod storage;

pub use storage::{ByteStream, MediaStorage};
