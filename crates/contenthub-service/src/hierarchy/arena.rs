//! Index-based arena over `{id, parent_id, name}` records.

use std::collections::HashMap;

use uuid::Uuid;

use contenthub_core::error::AppError;
use contenthub_core::result::AppResult;
use contenthub_entity::node::{Breadcrumb, NodeRecord, TreeNode};

/// A snapshot of one tree kind, keyed by id, traversed by index.
///
/// A `parent_id` that points at no loaded node is treated as a root.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<NodeRecord>,
    index: HashMap<Uuid, usize>,
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl NodeArena {
    /// Build an arena. Children keep the order the records arrive in; the
    /// first record wins when an id repeats.
    pub fn new(records: impl IntoIterator<Item = NodeRecord>) -> Self {
        let mut nodes = Vec::new();
        let mut index = HashMap::new();
        for record in records {
            if index.contains_key(&record.id) {
                continue;
            }
            index.insert(record.id, nodes.len());
            nodes.push(record);
        }

        let parent: Vec<Option<usize>> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                n.parent_id
                    .and_then(|p| index.get(&p).copied())
                    .filter(|&p| p != i)
            })
            .collect();

        let mut children = vec![Vec::new(); nodes.len()];
        let mut roots = Vec::new();
        for (i, p) in parent.iter().enumerate() {
            match p {
                Some(p) => children[*p].push(i),
                None => roots.push(i),
            }
        }

        Self {
            nodes,
            index,
            parent,
            children,
            roots,
        }
    }

    /// Build an arena from entity rows.
    pub fn from_nodes<'a, T: TreeNode + 'a>(rows: impl IntoIterator<Item = &'a T>) -> Self {
        Self::new(rows.into_iter().map(TreeNode::node_record))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node with this id is loaded.
    pub fn contains(&self, id: Uuid) -> bool {
        self.index.contains_key(&id)
    }

    /// Look up a node.
    pub fn get(&self, id: Uuid) -> Option<&NodeRecord> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    fn require(&self, id: Uuid) -> AppResult<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or_else(|| AppError::not_found(format!("Node {id} not found")))
    }

    /// The effective parent (None for roots and dangling parents).
    pub fn parent_of(&self, id: Uuid) -> Option<Uuid> {
        let i = *self.index.get(&id)?;
        self.parent[i].map(|p| self.nodes[p].id)
    }

    /// Direct children in arrival order.
    pub fn children_of(&self, id: Option<Uuid>) -> Vec<&NodeRecord> {
        let slots = match id {
            None => &self.roots,
            Some(id) => match self.index.get(&id) {
                Some(&i) => &self.children[i],
                None => return Vec::new(),
            },
        };
        slots.iter().map(|&c| &self.nodes[c]).collect()
    }

    /// Ancestor chain from the node up, root last, excluding the node.
    ///
    /// Stops after `len()` steps even if the stored chain loops.
    fn ancestor_slots(&self, start: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut current = self.parent[start];
        while let Some(i) = current {
            if i == start || chain.len() >= self.nodes.len() {
                break;
            }
            chain.push(i);
            current = self.parent[i];
        }
        chain
    }

    /// Ancestor ids, nearest parent first.
    pub fn ancestors(&self, id: Uuid) -> AppResult<Vec<Uuid>> {
        let i = self.require(id)?;
        Ok(self
            .ancestor_slots(i)
            .into_iter()
            .map(|a| self.nodes[a].id)
            .collect())
    }

    /// Root-first trail ending at the node itself.
    pub fn breadcrumbs(&self, id: Uuid) -> AppResult<Vec<Breadcrumb>> {
        let i = self.require(id)?;
        let mut trail: Vec<Breadcrumb> = self
            .ancestor_slots(i)
            .into_iter()
            .rev()
            .map(|a| Breadcrumb {
                id: self.nodes[a].id,
                name: self.nodes[a].name.clone(),
            })
            .collect();
        trail.push(Breadcrumb {
            id,
            name: self.nodes[i].name.clone(),
        });
        Ok(trail)
    }

    /// Root-first names joined with `separator`.
    pub fn display_path(&self, id: Uuid, separator: &str) -> AppResult<String> {
        let names: Vec<String> = self.breadcrumbs(id)?.into_iter().map(|b| b.name).collect();
        Ok(names.join(separator))
    }

    /// Number of ancestors (0 for roots).
    pub fn depth(&self, id: Uuid) -> AppResult<usize> {
        let i = self.require(id)?;
        Ok(self.ancestor_slots(i).len())
    }

    /// All descendants in depth-first pre-order, excluding the node.
    pub fn descendants(&self, id: Uuid) -> AppResult<Vec<Uuid>> {
        let i = self.require(id)?;
        Ok(self
            .preorder_from(&[i])
            .into_iter()
            .skip(1)
            .map(|d| self.nodes[d].id)
            .collect())
    }

    /// Whether `candidate` sits somewhere below `ancestor`.
    pub fn is_descendant(&self, candidate: Uuid, ancestor: Uuid) -> bool {
        let (Some(&c), Some(&a)) = (self.index.get(&candidate), self.index.get(&ancestor)) else {
            return false;
        };
        self.ancestor_slots(c).contains(&a)
    }

    /// The node and its whole subtree with children before parents.
    pub fn post_order(&self, id: Uuid) -> AppResult<Vec<Uuid>> {
        let root = self.require(id)?;
        let mut visited = vec![false; self.nodes.len()];
        let mut out = Vec::new();
        // (slot, children already pushed)
        let mut stack = vec![(root, false)];
        visited[root] = true;

        while let Some((slot, expanded)) = stack.pop() {
            if expanded {
                out.push(self.nodes[slot].id);
                continue;
            }
            stack.push((slot, true));
            for &child in self.children[slot].iter().rev() {
                if !visited[child] {
                    visited[child] = true;
                    stack.push((child, false));
                }
            }
        }
        Ok(out)
    }

    /// Every node with its depth, roots first, depth-first pre-order.
    pub fn walk(&self) -> Vec<(&NodeRecord, usize)> {
        let mut visited = vec![false; self.nodes.len()];
        let mut out = Vec::new();
        let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|&r| (r, 0)).collect();

        while let Some((slot, depth)) = stack.pop() {
            if std::mem::replace(&mut visited[slot], true) {
                continue;
            }
            out.push((&self.nodes[slot], depth));
            for &child in self.children[slot].iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    fn preorder_from(&self, starts: &[usize]) -> Vec<usize> {
        let mut visited = vec![false; self.nodes.len()];
        let mut out = Vec::new();
        let mut stack: Vec<usize> = starts.iter().rev().copied().collect();

        while let Some(slot) = stack.pop() {
            if std::mem::replace(&mut visited[slot], true) {
                continue;
            }
            out.push(slot);
            stack.extend(self.children[slot].iter().rev());
        }
        out
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(id: Uuid, parent_id: Option<Uuid>, name: &str) -> NodeRecord {
        NodeRecord {
            id,
            parent_id,
            name: name.to_string(),
        }
    }

    /// A -> B -> C plus a lone root D.
    pub(crate) fn chain() -> (NodeArena, [Uuid; 4]) {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let arena = NodeArena::new(vec![
            record(ids[0], None, "A"),
            record(ids[1], Some(ids[0]), "B"),
            record(ids[2], Some(ids[1]), "C"),
            record(ids[3], None, "D"),
        ]);
        (arena, ids)
    }

    #[test]
    fn test_breadcrumbs_of_three_deep_node() {
        let (arena, [a, b, c, _]) = chain();
        let trail = arena.breadcrumbs(c).unwrap();
        assert_eq!(trail.len(), 3);
        assert_eq!(trail[0].id, a);
        assert_eq!(trail[1].id, b);
        assert_eq!(trail.last().unwrap().id, c);
        assert_eq!(trail.last().unwrap().name, "C");
    }

    #[test]
    fn test_display_path_and_depth() {
        let (arena, [a, _, c, _]) = chain();
        assert_eq!(arena.display_path(c, " > ").unwrap(), "A > B > C");
        assert_eq!(arena.display_path(a, " > ").unwrap(), "A");
        assert_eq!(arena.depth(c).unwrap(), 2);
        assert_eq!(arena.depth(a).unwrap(), 0);
    }

    #[test]
    fn test_descendants_preorder() {
        let a = Uuid::new_v4();
        let b1 = Uuid::new_v4();
        let b2 = Uuid::new_v4();
        let c = Uuid::new_v4();
        let arena = NodeArena::new(vec![
            record(a, None, "a"),
            record(b1, Some(a), "b1"),
            record(b2, Some(a), "b2"),
            record(c, Some(b1), "c"),
        ]);
        assert_eq!(arena.descendants(a).unwrap(), vec![b1, c, b2]);
        assert!(arena.descendants(c).unwrap().is_empty());
        assert!(arena.is_descendant(c, a));
        assert!(!arena.is_descendant(a, c));
    }

    #[test]
    fn test_post_order_puts_children_first() {
        let (arena, [a, b, c, _]) = chain();
        assert_eq!(arena.post_order(a).unwrap(), vec![c, b, a]);
    }

    #[test]
    fn test_dangling_parent_is_root() {
        let orphan = Uuid::new_v4();
        let arena = NodeArena::new(vec![record(orphan, Some(Uuid::new_v4()), "orphan")]);
        assert_eq!(arena.parent_of(orphan), None);
        assert_eq!(arena.breadcrumbs(orphan).unwrap().len(), 1);
        assert_eq!(arena.children_of(None).len(), 1);
    }

    #[test]
    fn test_corrupt_cycle_terminates() {
        let x = Uuid::new_v4();
        let y = Uuid::new_v4();
        let arena = NodeArena::new(vec![record(x, Some(y), "x"), record(y, Some(x), "y")]);

        assert!(arena.ancestors(x).unwrap().len() <= arena.len());
        assert!(arena.breadcrumbs(y).unwrap().len() <= arena.len() + 1);
        assert!(arena.descendants(x).unwrap().len() <= arena.len());
        assert!(arena.post_order(x).unwrap().len() <= arena.len());
    }

    #[test]
    fn test_parent_chains_terminate_within_node_count() {
        let (arena, ids) = chain();
        for id in ids {
            assert!(arena.ancestors(id).unwrap().len() < arena.len());
        }
    }

    #[test]
    fn test_unknown_node_is_not_found() {
        let (arena, _) = chain();
        let err = arena.breadcrumbs(Uuid::new_v4()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_walk_yields_depths() {
        let (arena, [a, b, c, d]) = chain();
        let walked: Vec<(Uuid, usize)> = arena.walk().into_iter().map(|(n, d)| (n.id, d)).collect();
        assert_eq!(walked, vec![(a, 0), (b, 1), (c, 2), (d, 0)]);
    }
}
