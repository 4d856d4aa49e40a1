//! Balanced insertion and the rotations that keep threads intact.

use std::cmp::Ordering;

use tracing::trace;

use crate::node::{NodeId, Right};
use crate::AvlTree;

impl<K: Ord, V> AvlTree<K, V> {
    /// Insert `key` with `value`.
    ///
    /// Returns `true` if the key was added. If the key is already present the
    /// tree is left untouched and `value` is dropped: the first value written
    /// for a key wins.
    ///
    /// A successful insert invalidates every outstanding [`Cursor`](crate::Cursor).
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let root = self.root;
        let (root, inserted) = self.insert_at(root, key, value);
        self.root = Some(root);
        if inserted.is_none() {
            return false;
        }
        self.size += 1;
        self.restamp();
        true
    }

    /// Insert below `at`, returning the (possibly rotated) subtree root and
    /// the id of the freshly allocated node, if any.
    fn insert_at(&mut self, at: Option<NodeId>, key: K, value: V) -> (NodeId, Option<NodeId>) {
        let Some(id) = at else {
            let leaf = self.nodes.alloc(key, value);
            return (leaf, Some(leaf));
        };

        let leaf = match key.cmp(&self.nodes[id].key) {
            Ordering::Equal => return (id, None),
            Ordering::Less => {
                let left = self.nodes[id].left;
                let (child, leaf) = self.insert_at(left, key, value);
                let Some(leaf) = leaf else {
                    return (id, None);
                };
                // The rightmost node of the left subtree precedes us.
                if self.nodes[child].right.is_threaded() {
                    self.nodes[child].right = Right::Thread(id);
                }
                self.nodes[id].left = Some(child);
                leaf
            }
            Ordering::Greater => {
                let right = self.nodes[id].right;
                let (child, leaf) = self.insert_at(right.child(), key, value);
                let Some(leaf) = leaf else {
                    return (id, None);
                };
                if right.is_threaded() {
                    // `child` is the new leaf and takes over our successor.
                    self.nodes[child].right = right;
                }
                self.nodes[id].right = Right::Child(child);
                leaf
            }
        };

        self.nodes.update_height(id);
        (self.rebalance(id, leaf), Some(leaf))
    }

    /// Restore the AVL balance at `id` after `leaf` was inserted below it.
    ///
    /// Single vs. double rotation is decided by comparing the inserted key
    /// with the key of the heavy child.
    fn rebalance(&mut self, id: NodeId, leaf: NodeId) -> NodeId {
        let balance = self.nodes.balance(id);

        if balance > 1 {
            let Some(left) = self.nodes[id].left else {
                unreachable!("left-heavy node without a left child");
            };
            if self.nodes[leaf].key > self.nodes[left].key {
                let pivot = self.rotate_left(left);
                self.nodes[id].left = Some(pivot);
            }
            return self.rotate_right(id);
        }

        if balance < -1 {
            let Some(right) = self.nodes[id].right.child() else {
                unreachable!("right-heavy node without a right child");
            };
            if self.nodes[leaf].key < self.nodes[right].key {
                let pivot = self.rotate_right(right);
                self.nodes[id].right = Right::Child(pivot);
            }
            return self.rotate_left(id);
        }

        id
    }
}

impl<K, V> AvlTree<K, V> {
    /// Rotate `id` down to the right; its left child becomes the subtree root.
    ///
    /// The left child's right slot always ends up owning `id`. If it was a
    /// thread it pointed at `id` already, so no other thread moves.
    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let Some(pivot) = self.nodes[id].left else {
            unreachable!("right rotation needs a left child");
        };
        trace!(node = id.index(), pivot = pivot.index(), "rotate right");

        let inner = self.nodes[pivot].right.child();
        self.nodes[pivot].right = Right::Child(id);
        self.nodes[id].left = inner;

        self.nodes.update_height(id);
        self.nodes.update_height(pivot);
        pivot
    }

    /// Rotate `id` down to the left; its right child becomes the subtree root.
    ///
    /// If the right child had no left subtree, `id` loses its right subtree and
    /// becomes the direct predecessor of the pivot, so it is threaded to it.
    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let Some(pivot) = self.nodes[id].right.child() else {
            unreachable!("left rotation needs a right child");
        };
        trace!(node = id.index(), pivot = pivot.index(), "rotate left");

        let inner = self.nodes[pivot].left;
        self.nodes[id].right = match inner {
            Some(inner) => Right::Child(inner),
            None => Right::Thread(pivot),
        };
        self.nodes[pivot].left = Some(id);

        self.nodes.update_height(id);
        self.nodes.update_height(pivot);
        pivot
    }
}
