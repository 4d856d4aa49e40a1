//! Node storage.
//!
//! Nodes live in an append-only arena and refer to each other by [`NodeId`].
//! A node owns its left child and, when it has one, its right child. A node
//! without a right subtree instead records a *thread* to its inorder
//! successor. Threads are plain ids: they never own anything, and the arena is
//! released as a whole, so teardown never walks them.

use std::ops::{Index, IndexMut};

/// Index of a node inside a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Right-hand slot of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Right {
    /// Owned right subtree.
    Child(NodeId),
    /// No right subtree; points at the inorder successor.
    Thread(NodeId),
    /// No right subtree and no successor: the node holds the greatest key.
    Absent,
}

impl Right {
    /// The real right child, ignoring threads.
    #[inline]
    pub(crate) fn child(self) -> Option<NodeId> {
        match self {
            Right::Child(id) => Some(id),
            Right::Thread(_) | Right::Absent => None,
        }
    }

    #[inline]
    pub(crate) fn is_threaded(self) -> bool {
        !matches!(self, Right::Child(_))
    }
}

#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Height of the subtree rooted here; a leaf has height 0.
    pub(crate) height: i32,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Right,
}

/// Append-only node arena.
#[derive(Debug)]
pub(crate) struct NodeArena<K, V> {
    nodes: Vec<Node<K, V>>,
}

impl<K, V> NodeArena<K, V> {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Allocate a detached leaf: height 0, no children, no successor yet.
    pub(crate) fn alloc(&mut self, key: K, value: V) -> NodeId {
        self.push(Node {
            key,
            value,
            height: 0,
            left: None,
            right: Right::Absent,
        })
    }

    pub(crate) fn push(&mut self, node: Node<K, V>) -> NodeId {
        let Ok(raw) = u32::try_from(self.nodes.len()) else {
            panic!("node arena exhausted: {} nodes", self.nodes.len());
        };
        self.nodes.push(node);
        NodeId(raw)
    }

    /// Cached height of an optional subtree; an absent subtree has height -1.
    #[inline]
    pub(crate) fn height(&self, id: Option<NodeId>) -> i32 {
        id.map_or(-1, |id| self[id].height)
    }

    /// Re-derive the cached height of `id` from its real children.
    #[inline]
    pub(crate) fn update_height(&mut self, id: NodeId) {
        let node = &self[id];
        let h = 1 + self.height(node.left).max(self.height(node.right.child()));
        self[id].height = h;
    }

    /// height(left) - height(actual right).
    #[inline]
    pub(crate) fn balance(&self, id: NodeId) -> i32 {
        let node = &self[id];
        self.height(node.left) - self.height(node.right.child())
    }

    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self[id].left {
            id = left;
        }
        id
    }

    /// Inorder successor of `id`: follow the thread, or take the leftmost
    /// node of the real right subtree.
    #[inline]
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        match self[id].right {
            Right::Thread(next) => Some(next),
            Right::Child(child) => Some(self.leftmost(child)),
            Right::Absent => None,
        }
    }
}

impl<K, V> Index<NodeId> for NodeArena<K, V> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.index()]
    }
}

impl<K, V> IndexMut<NodeId> for NodeArena<K, V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.index()]
    }
}
