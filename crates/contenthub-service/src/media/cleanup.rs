//! Best-effort removal of media payloads after their rows are gone.

use tracing::{debug, warn};

use contenthub_core::traits::storage::MediaStorage;
use contenthub_entity::media::Media;

/// Directory levels pruned above a removed file: `{id}/conversions` and `{id}`.
pub const PRUNE_LEVELS: usize = 2;

/// Delete the original and every rendition of `media`, then prune the
/// directories they leave empty.
///
/// Failures are logged and counted, never returned.
pub async fn purge_files(storage: &dyn MediaStorage, media: &Media) -> usize {
    let mut failures = 0;
    let mut paths = media.conversion_paths();
    paths.push(media.storage_path.clone());

    for path in &paths {
        match storage.delete(path).await {
            Ok(true) => {}
            Ok(false) => debug!(media_id = %media.id, path = %path, "Payload already missing"),
            Err(e) => {
                failures += 1;
                warn!(media_id = %media.id, path = %path, error = %e, "Failed to delete payload");
            }
        }
    }

    for path in &paths {
        if let Err(e) = storage.prune_empty_dirs(path, PRUNE_LEVELS).await {
            failures += 1;
            warn!(media_id = %media.id, path = %path, error = %e, "Failed to prune directories");
        }
    }

    failures
}
