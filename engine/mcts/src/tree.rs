//! Search tree with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! The tree only grows; a new search starts a new tree.

use crate::node::{Node, NodeId};

/// Ordered multi-child tree with arena-based node storage.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    /// Arena storing all nodes
    nodes: Vec<Node<T>>,

    /// Root node index (always 0)
    root: NodeId,
}

impl<T> Tree<T> {
    /// Create a tree with a single root holding `data`.
    pub fn new(data: T) -> Self {
        Self {
            nodes: vec![Node::new_root(data)],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn data(&self, id: NodeId) -> &T {
        &self.get(id).data
    }

    #[inline]
    pub fn data_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.get_mut(id).data
    }

    /// Append a child holding `data` after the existing children of `parent`.
    pub fn add_child(&mut self, parent: NodeId, data: T) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new_child(parent, data));
        self.get_mut(parent).children.push(id);
        id
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id).parent;
        parent.is_some().then_some(parent)
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    #[inline]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_leaf()
    }

    /// `id` and each of its ancestors up to and including the root.
    pub fn path_to_root(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.parent(n))
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            total_nodes: self.nodes.len(),
            root_children: self.children(self.root).len(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        self.children(node_id)
            .iter()
            .map(|&id| self.compute_max_depth(id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_children: usize,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree() {
        let tree = Tree::new(0u32);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId(0));
        assert!(tree.parent(tree.root()).is_none());
        assert!(tree.is_leaf(tree.root()));
    }

    #[test]
    fn test_add_child_keeps_order() {
        let mut tree = Tree::new("root");
        let a = tree.add_child(tree.root(), "a");
        let b = tree.add_child(tree.root(), "b");
        let c = tree.add_child(tree.root(), "c");

        assert_eq!(tree.children(tree.root()), &[a, b, c]);
        assert_eq!(tree.parent(b), Some(tree.root()));
        assert_eq!(*tree.data(c), "c");
        assert!(!tree.is_leaf(tree.root()));
        assert!(tree.is_leaf(a));
    }

    #[test]
    fn test_path_to_root() {
        let mut tree = Tree::new(0);
        let child = tree.add_child(tree.root(), 1);
        let grandchild = tree.add_child(child, 2);

        let path: Vec<NodeId> = tree.path_to_root(grandchild).collect();
        assert_eq!(path, vec![grandchild, child, tree.root()]);
    }

    #[test]
    fn test_data_mut() {
        let mut tree = Tree::new(0u32);
        let child = tree.add_child(tree.root(), 0);
        *tree.data_mut(child) += 5;
        assert_eq!(*tree.data(child), 5);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = Tree::new(());
        let child = tree.add_child(tree.root(), ());
        tree.add_child(child, ());
        tree.add_child(tree.root(), ());

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.root_children, 2);
        assert_eq!(stats.max_depth, 2);
    }
}
