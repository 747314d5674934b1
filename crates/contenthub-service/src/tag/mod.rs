//! Flat tag management.

pub mod service;

pub use service::{TagInput, TagService};
