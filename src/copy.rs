//! Structural copy.
//!
//! Re-inserting every key would rebuild a balanced tree, but not necessarily
//! the same one. The copy below reproduces every owned edge and every thread
//! exactly, in one post-order pass and without any rotation.

use tracing::debug;

use crate::node::{Node, NodeArena, NodeId, Right};
use crate::{AvlTree, Cursor};

impl<K: Clone, V: Clone> AvlTree<K, V> {
    /// Replace the contents of `self` with a structural copy of `source`.
    fn copy_from(&mut self, source: &Self) {
        self.nodes.clear();
        let mut pending = None;
        self.root = copy_subtree(&source.nodes, source.root, &mut self.nodes, &mut pending);
        self.size = source.size;
        self.restamp();
        self.cursor = Cursor::exhausted(self.stamp);
        debug!(nodes = self.size, height = self.height(), "copied tree");
    }
}

/// Copy the subtree at `src` into `dst`.
///
/// On return `pending` holds the copied node whose thread is still unset:
/// the greatest node of the subtree, if it is threaded. Its successor lies
/// outside the subtree, so the caller patches it.
fn copy_subtree<K: Clone, V: Clone>(
    src: &NodeArena<K, V>,
    at: Option<NodeId>,
    dst: &mut NodeArena<K, V>,
    pending: &mut Option<NodeId>,
) -> Option<NodeId> {
    let Some(at) = at else {
        *pending = None;
        return None;
    };
    let node = &src[at];

    let mut left_pending = None;
    let left = copy_subtree(src, node.left, dst, &mut left_pending);
    let right = copy_subtree(src, node.right.child(), dst, pending);

    let id = dst.push(Node {
        key: node.key.clone(),
        value: node.value.clone(),
        height: node.height,
        left,
        right: right.map_or(Right::Absent, Right::Child),
    });

    if let Some(predecessor) = left_pending {
        dst[predecessor].right = Right::Thread(id);
    }
    if node.right.is_threaded() {
        *pending = Some(id);
    }
    Some(id)
}

impl<K: Clone, V: Clone> Clone for AvlTree<K, V> {
    /// A structural copy: same shape, same heights, same threads.
    fn clone(&self) -> Self {
        let mut tree = Self::with_capacity(self.size);
        tree.copy_from(self);
        tree
    }

    /// Clears `self`, then copies `source` into it, reusing the allocation.
    fn clone_from(&mut self, source: &Self) {
        self.copy_from(source);
    }
}
