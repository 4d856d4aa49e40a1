//! # avlt
//!
//! An ordered map on a threaded AVL tree.
//!
//! Every node without a right subtree stores a link to its inorder successor
//! instead. Forward iteration and range queries follow those links, so they
//! run without a stack or parent pointers: a range query costs
//! `O(log n + M)` time for `M` results and `O(1)` extra space.
//!
//! ## Example
//!
//! ```rust
//! use avlt::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! tree.insert(10, "ten");
//! tree.insert(20, "twenty");
//! tree.insert(30, "thirty");
//!
//! assert_eq!(tree.search(&20), Some(&"twenty"));
//! assert_eq!(tree.height(), 1);
//! assert_eq!(tree.range_search(&15, &25), [20]);
//! ```

mod copy;
mod cursor;
mod dump;
mod error;
mod insert;
mod node;
mod range;

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

pub use cursor::{Cursor, Iter, Keys};
pub use error::Error;
pub use range::Range;

use node::{NodeArena, NodeId, Right};

use tracing::debug;

/// Source of tree stamps. Stamps are unique across all trees in the process,
/// so a cursor taken from one tree is also rejected by every other tree.
static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);

fn next_stamp() -> u64 {
    NEXT_STAMP.fetch_add(1, AtomicOrdering::Relaxed)
}

// =============================================================================
// AvlTree
// =============================================================================

/// An ordered map backed by a threaded AVL tree.
///
/// - Keys are unique; inserting an existing key keeps the original value.
/// - Nodes are never removed individually. [`clear`](Self::clear) releases
///   them all at once.
/// - Clones are structural: same shape, heights and threads as the source.
pub struct AvlTree<K, V> {
    nodes: NodeArena<K, V>,
    root: Option<NodeId>,
    size: usize,
    /// Changes whenever the shape of the tree changes.
    stamp: u64,
    /// State behind [`begin`](Self::begin) / [`next`](Self::next).
    cursor: Cursor,
}

impl<K, V> AvlTree<K, V> {
    pub fn new() -> Self {
        Self::with_nodes(NodeArena::new())
    }

    /// An empty tree with room for `capacity` keys before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_nodes(NodeArena::with_capacity(capacity))
    }

    fn with_nodes(nodes: NodeArena<K, V>) -> Self {
        let stamp = next_stamp();
        Self {
            nodes,
            root: None,
            size: 0,
            stamp,
            cursor: Cursor::exhausted(stamp),
        }
    }

    /// Number of keys in the tree.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Height of the tree: 0 for a single key, -1 when empty.
    #[inline]
    pub fn height(&self) -> i32 {
        self.nodes.height(self.root)
    }

    /// Remove every key, releasing all nodes.
    pub fn clear(&mut self) {
        debug!(released = self.nodes.len(), "clearing tree");
        self.nodes.clear();
        self.root = None;
        self.size = 0;
        self.restamp();
        self.cursor = Cursor::exhausted(self.stamp);
    }

    fn restamp(&mut self) {
        self.stamp = next_stamp();
    }
}

impl<K: Ord, V> AvlTree<K, V> {
    fn find(&self, key: &K) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            cur = match key.cmp(&node.key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right.child(),
            };
        }
        None
    }

    /// The value stored under `key`.
    pub fn search(&self, key: &K) -> Option<&V> {
        self.find(key).map(|id| &self.nodes[id].value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// The value stored under `key`, or `V::default()` if there is none.
    pub fn lookup(&self, key: &K) -> V
    where
        V: Default + Clone,
    {
        self.search(key).cloned().unwrap_or_default()
    }

    /// The key in the right slot of `key`'s node, or `K::default()` if `key`
    /// is missing or its node has nothing on its right.
    ///
    /// For a threaded node this is the inorder successor. For a node with a
    /// right subtree it is the root of that subtree, not the successor; use
    /// [`next_key`](Self::next_key) for the successor in all cases.
    pub fn successor_of(&self, key: &K) -> K
    where
        K: Default + Clone,
    {
        self.find(key)
            .and_then(|id| match self.nodes[id].right {
                Right::Child(next) | Right::Thread(next) => Some(next),
                Right::Absent => None,
            })
            .map(|next| self.nodes[next].key.clone())
            .unwrap_or_default()
    }

    /// The smallest key greater than `key`, if `key` is present.
    pub fn next_key(&self, key: &K) -> Option<&K> {
        let id = self.find(key)?;
        self.nodes.successor(id).map(|next| &self.nodes[next].key)
    }

    /// Cached height of the node holding `key`, or -1 if it is missing.
    pub fn height_of(&self, key: &K) -> i32 {
        self.nodes.height(self.find(key))
    }
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}


#[cfg(test)]
mod proptests;
