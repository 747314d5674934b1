//! Path derivation for both trees.

use std::collections::HashSet;

use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_core::result::AppResult;

use super::arena::NodeArena;

/// Separator of the virtual category path (`News > World > Europe`).
pub const CATEGORY_PATH_SEPARATOR: &str = " > ";

/// Separator of the stored folder path (`Images/2024`).
pub const FOLDER_PATH_SEPARATOR: &str = "/";

/// Materialized path of a folder named `name` under a parent with
/// `parent_path` (None for a root folder).
pub fn folder_path(parent_path: Option<&str>, name: &str) -> String {
    match parent_path {
        Some(parent) if !parent.is_empty() => format!("{parent}{FOLDER_PATH_SEPARATOR}{name}"),
        _ => name.to_string(),
    }
}

/// Trim a folder name and reject names that would corrupt stored paths.
pub fn normalize_folder_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    if trimmed.contains(FOLDER_PATH_SEPARATOR) {
        return Err(AppError::validation("Folder name cannot contain '/'"));
    }
    if trimmed.chars().count() > 255 {
        return Err(AppError::validation("Folder name may not exceed 255 characters"));
    }
    Ok(trimmed.to_string())
}

/// Re-derive stored paths for `root_id` and every folder below it after the
/// root takes `new_name` under a parent with `new_parent_path`.
///
/// Returns `(id, path)` pairs in pre-order, root first.
pub fn rematerialize_subtree(
    arena: &NodeArena,
    root_id: Uuid,
    new_parent_path: Option<&str>,
    new_name: &str,
) -> AppResult<Vec<(Uuid, String)>> {
    if !arena.contains(root_id) {
        return Err(AppError::not_found("Folder not found"));
    }

    let root_path = folder_path(new_parent_path, new_name);
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![(root_id, root_path)];

    while let Some((id, path)) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        for child in arena.children_of(Some(id)).into_iter().rev() {
            stack.push((child.id, folder_path(Some(&path), &child.name)));
        }
        out.push((id, path));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::arena::tests::record;

    #[test]
    fn test_folder_path() {
        assert_eq!(folder_path(None, "Images"), "Images");
        assert_eq!(folder_path(Some("Images"), "2024"), "Images/2024");
        assert_eq!(folder_path(Some(""), "Orphan"), "Orphan");
    }

    #[test]
    fn test_rename_root_rewrites_children() {
        let images = Uuid::new_v4();
        let y2024 = Uuid::new_v4();
        let jan = Uuid::new_v4();
        let arena = NodeArena::new(vec![
            record(images, None, "Images"),
            record(y2024, Some(images), "2024"),
            record(jan, Some(y2024), "January"),
        ]);

        let paths = rematerialize_subtree(&arena, images, None, "Media").unwrap();
        assert_eq!(
            paths,
            vec![
                (images, "Media".to_string()),
                (y2024, "Media/2024".to_string()),
                (jan, "Media/2024/January".to_string()),
            ]
        );
    }

    #[test]
    fn test_move_under_new_parent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let arena = NodeArena::new(vec![record(a, None, "A"), record(b, Some(a), "B")]);

        let paths = rematerialize_subtree(&arena, a, Some("Archive/Old"), "A").unwrap();
        assert_eq!(paths[0].1, "Archive/Old/A");
        assert_eq!(paths[1].1, "Archive/Old/A/B");
    }

    #[test]
    fn test_normalize_folder_name() {
        assert_eq!(normalize_folder_name("  Photos ").unwrap(), "Photos");
        assert!(normalize_folder_name("   ").is_err());
        assert!(normalize_folder_name("a/b").is_err());
    }
}
