//! Search tree node representation.
//!
//! A node owns one payload and knows its parent and its children in the
//! order they were added.

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    pub data: T,

    /// Children in insertion order. Empty until the node is expanded.
    pub children: Vec<NodeId>,
}

impl<T> Node<T> {
    pub fn new_root(data: T) -> Self {
        Self {
            parent: NodeId::NONE,
            data,
            children: Vec::new(),
        }
    }

    pub fn new_child(parent: NodeId, data: T) -> Self {
        Self {
            parent,
            data,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = Node::new_root("root");
        assert!(node.is_root());
        assert!(node.is_leaf());
        assert_eq!(node.data, "root");
    }

    #[test]
    fn test_is_leaf() {
        let mut node = Node::new_child(NodeId(0), 7u32);
        assert!(!node.is_root());
        assert!(node.is_leaf());

        node.children.push(NodeId(1));
        assert!(!node.is_leaf());
    }
}
