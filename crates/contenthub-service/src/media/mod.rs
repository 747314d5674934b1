//! Media library: uploads, payload lifecycle, and browsing.

pub mod browse;
pub mod cleanup;
pub mod service;

pub use browse::{BrowseOrder, BrowseQuery, BrowseResult, BrowseService, MEDIA_PAGE_SIZE};
pub use service::{MediaDownload, MediaService, UploadRequest};
