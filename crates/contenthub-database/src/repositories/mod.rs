//! PostgreSQL implementations of the store traits.

pub mod category;
pub mod folder;
pub mod media;
pub mod tag;

pub use category::CategoryRepository;
pub use folder::FolderRepository;
pub use media::MediaRepository;
pub use tag::TagRepository;

use contenthub_core::error::{AppError, ErrorKind};

/// Map a write error, turning a violation of `constraint` into a conflict.
pub(crate) fn map_write_error(
    e: sqlx::Error,
    constraint: &str,
    conflict_message: impl Into<String>,
    context: &str,
) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(constraint) => {
            AppError::conflict(conflict_message)
        }
        _ => AppError::with_source(ErrorKind::Database, context.to_string(), e),
    }
}

/// Escape `%`, `_` and `\` so user input is matched literally by `LIKE`.
pub(crate) fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
