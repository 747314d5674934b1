//! # contenthub-database
//!
//! Persistence for ContentHub. The services talk to the store traits in
//! [`store`]; two backends implement them:
//!
//! - **postgres**: sqlx repositories over a [`DatabasePool`]
//! - **memory**: a process-local [`memory::MemoryDatabase`]
//!
//! The backend is selected at runtime from `database.provider`.

pub mod connection;
pub mod filter;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use provider::Stores;
pub use store::{CategoryStore, FolderStore, MediaStore, TagStore};
