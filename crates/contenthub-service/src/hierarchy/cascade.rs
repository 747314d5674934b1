//! Cascade delete planning for the folder tree.

use std::collections::HashSet;

use uuid::Uuid;

use contenthub_core::result::AppResult;
use contenthub_entity::media::Media;

use super::arena::NodeArena;

/// Everything a folder delete removes.
#[derive(Debug, Clone, Default)]
pub struct CascadePlan {
    /// Folders, children before parents; the target folder is last.
    pub folder_ids: Vec<Uuid>,
    /// Media items contained anywhere in the subtree.
    pub media: Vec<Media>,
}

impl CascadePlan {
    /// IDs of the planned media items.
    pub fn media_ids(&self) -> Vec<Uuid> {
        self.media.iter().map(|m| m.id).collect()
    }
}

/// Plan the delete of `folder_id` and its subtree.
///
/// `candidates` may include media outside the subtree; only items whose
/// folder is part of the plan are kept.
pub fn plan_folder_delete(
    arena: &NodeArena,
    folder_id: Uuid,
    candidates: Vec<Media>,
) -> AppResult<CascadePlan> {
    let folder_ids = arena.post_order(folder_id)?;
    let in_subtree: HashSet<Uuid> = folder_ids.iter().copied().collect();
    let media = candidates
        .into_iter()
        .filter(|m| m.folder_id.is_some_and(|f| in_subtree.contains(&f)))
        .collect();
    Ok(CascadePlan { folder_ids, media })
}
