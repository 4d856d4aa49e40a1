//! Stackless inorder traversal.
//!
//! Every traversal here starts at the leftmost node and steps to the inorder
//! successor: follow the thread if there is one, otherwise take the leftmost
//! node of the right subtree. No stack and no parent links are needed.

use std::iter::FusedIterator;

use crate::node::NodeId;
use crate::{AvlTree, Error};

/// A detached traversal position.
///
/// A cursor does not borrow the tree. Instead it remembers the stamp the tree
/// carried when the cursor was positioned, and refuses to advance once the
/// tree has changed shape.
///
/// ```rust
/// use avlt::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(2, "b");
/// tree.insert(1, "a");
///
/// let mut cursor = tree.cursor();
/// assert_eq!(cursor.next(&tree), Ok(Some(&1)));
///
/// tree.insert(3, "c");
/// assert!(cursor.next(&tree).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    next: Option<NodeId>,
    stamp: u64,
}

impl Cursor {
    /// A cursor that yields nothing.
    pub(crate) fn exhausted(stamp: u64) -> Self {
        Self { next: None, stamp }
    }

    /// Yield the key under the cursor and advance past it.
    ///
    /// Returns `Ok(None)` once the traversal is finished; an exhausted cursor
    /// never goes stale.
    #[allow(clippy::should_implement_trait)]
    pub fn next<'a, K, V>(&mut self, tree: &'a AvlTree<K, V>) -> Result<Option<&'a K>, Error> {
        Ok(self.step(tree)?.map(|id| &tree.nodes[id].key))
    }

    fn step<K, V>(&mut self, tree: &AvlTree<K, V>) -> Result<Option<NodeId>, Error> {
        let Some(id) = self.next else {
            return Ok(None);
        };
        if self.stamp != tree.stamp {
            return Err(Error::StaleCursor {
                cursor: self.stamp,
                tree: tree.stamp,
            });
        }
        self.next = tree.nodes.successor(id);
        Ok(Some(id))
    }
}

impl<K, V> AvlTree<K, V> {
    /// A cursor positioned at the smallest key.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            next: self.first(),
            stamp: self.stamp,
        }
    }

    /// Reset the tree's own cursor to the smallest key.
    ///
    /// ```rust
    /// use avlt::AvlTree;
    ///
    /// let mut tree: AvlTree<_, _> = [(3, ()), (1, ()), (2, ())].into_iter().collect();
    /// let mut keys = Vec::new();
    /// tree.begin();
    /// while let Some(key) = tree.next().unwrap() {
    ///     keys.push(*key);
    /// }
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    pub fn begin(&mut self) {
        self.cursor = self.cursor();
    }

    /// Yield the key under the tree's own cursor and advance it.
    ///
    /// Returns `Ok(None)` at the end of the sequence, or before [`begin`](Self::begin)
    /// was ever called. Fails with [`Error::StaleCursor`] if the tree was
    /// modified since `begin`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<&K>, Error> {
        let mut cursor = self.cursor;
        let id = cursor.step(self)?;
        self.cursor = cursor;
        Ok(id.map(|id| &self.nodes[id].key))
    }

    /// Iterate over `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: self,
            next: self.first(),
            remaining: self.size,
        }
    }

    /// Iterate over keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub(crate) fn first(&self) -> Option<NodeId> {
        self.root.map(|root| self.nodes.leftmost(root))
    }
}

pub struct Iter<'a, K, V> {
    tree: &'a AvlTree<K, V>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.nodes.successor(id);
        self.remaining -= 1;
        let node = &self.tree.nodes[id];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
