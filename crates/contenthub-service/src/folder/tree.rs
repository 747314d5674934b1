//! Folder tree building and ancestry lookups.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_database::store::{FolderStore, MediaStore};
use contenthub_entity::folder::{FolderNode, FolderTree, MediaFolder};
use contenthub_entity::node::Breadcrumb;

use crate::hierarchy::NodeArena;

/// Builds folder trees and resolves ancestry.
#[derive(Debug, Clone)]
pub struct FolderTreeService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Media store, for per-folder counts.
    media: Arc<dyn MediaStore>,
}

impl FolderTreeService {
    /// Creates a new tree service.
    pub fn new(folders: Arc<dyn FolderStore>, media: Arc<dyn MediaStore>) -> Self {
        Self { folders, media }
    }

    /// The whole library as nested nodes with direct media counts.
    pub async fn get_tree(&self) -> Result<FolderTree, AppError> {
        let all = self.folders.find_all().await?;
        if all.is_empty() {
            return Ok(FolderTree::empty());
        }

        let counts: HashMap<Uuid, u64> = self
            .media
            .count_by_folder()
            .await?
            .into_iter()
            .filter_map(|(folder, count)| folder.map(|f| (f, count.max(0) as u64)))
            .collect();

        let arena = NodeArena::from_nodes(&all);
        let by_id: HashMap<Uuid, &MediaFolder> = all.iter().map(|f| (f.id, f)).collect();

        let roots = arena
            .children_of(None)
            .into_iter()
            .filter_map(|root| build_node(&arena, &by_id, &counts, root.id, 0))
            .collect();

        Ok(FolderTree {
            roots,
            total_folders: all.len() as u64,
        })
    }

    /// Root-first trail ending at the folder.
    pub async fn get_breadcrumbs(&self, folder_id: Uuid) -> Result<Vec<Breadcrumb>, AppError> {
        let all = self.folders.find_all().await?;
        let arena = NodeArena::from_nodes(&all);
        if !arena.contains(folder_id) {
            return Err(AppError::not_found("Folder not found"));
        }
        arena.breadcrumbs(folder_id)
    }

    /// Every folder below `folder_id`, depth-first.
    pub async fn get_descendants(&self, folder_id: Uuid) -> Result<Vec<MediaFolder>, AppError> {
        let all = self.folders.find_all().await?;
        let arena = NodeArena::from_nodes(&all);
        if !arena.contains(folder_id) {
            return Err(AppError::not_found("Folder not found"));
        }
        let order = arena.descendants(folder_id)?;
        let mut by_id: HashMap<Uuid, MediaFolder> = all.into_iter().map(|f| (f.id, f)).collect();
        Ok(order.into_iter().filter_map(|id| by_id.remove(&id)).collect())
    }
}

/// Builds a node and its children. Recursion follows arena child links,
/// which are acyclic from the roots.
fn build_node(
    arena: &NodeArena,
    by_id: &HashMap<Uuid, &MediaFolder>,
    counts: &HashMap<Uuid, u64>,
    id: Uuid,
    depth: usize,
) -> Option<FolderNode> {
    let folder = by_id.get(&id)?;
    let children = arena
        .children_of(Some(id))
        .into_iter()
        .filter_map(|child| build_node(arena, by_id, counts, child.id, depth + 1))
        .collect();

    Some(FolderNode {
        id,
        name: folder.name.clone(),
        path: folder.path.clone(),
        depth,
        media_count: counts.get(&id).copied().unwrap_or(0),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contenthub_database::memory::MemoryDatabase;
    use contenthub_entity::folder::CreateMediaFolder;
    use contenthub_entity::media::CreateMedia;

    async fn folder(db: &MemoryDatabase, parent: Option<&MediaFolder>, name: &str) -> MediaFolder {
        let path = match parent {
            Some(p) => format!("{}/{}", p.path, name),
            None => name.to_string(),
        };
        FolderStore::create(
            db,
            &CreateMediaFolder {
                parent_id: parent.map(|p| p.id),
                name: name.into(),
                path,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_tree_with_counts() {
        let db = MemoryDatabase::new();
        let svc = FolderTreeService::new(Arc::new(db.clone()), Arc::new(db.clone()));
        assert_eq!(svc.get_tree().await.unwrap().total_folders, 0);

        let images = folder(&db, None, "Images").await;
        let year = folder(&db, Some(&images), "2024").await;
        folder(&db, None, "Docs").await;

        let id = Uuid::new_v4();
        MediaStore::create(
            &db,
            &CreateMedia {
                id,
                folder_id: Some(year.id),
                owner_id: Uuid::nil(),
                name: "pic".into(),
                file_name: "pic.png".into(),
                mime_type: "image/png".into(),
                size_bytes: 1,
                storage_path: format!("{id}/pic.png"),
                conversions: Vec::new(),
            },
        )
        .await
        .unwrap();

        let tree = svc.get_tree().await.unwrap();
        assert_eq!(tree.total_folders, 3);
        assert_eq!(tree.roots.len(), 2);

        let images_node = tree.roots.iter().find(|n| n.id == images.id).unwrap();
        assert_eq!(images_node.children.len(), 1);
        assert_eq!(images_node.children[0].depth, 1);
        assert_eq!(images_node.children[0].media_count, 1);

        let crumbs = svc.get_breadcrumbs(year.id).await.unwrap();
        assert_eq!(
            crumbs.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
            vec!["Images", "2024"]
        );

        let below = svc.get_descendants(images.id).await.unwrap();
        assert_eq!(below.len(), 1);
        assert_eq!(below[0].id, year.id);
    }
}
