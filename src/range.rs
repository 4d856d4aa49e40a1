//! Bounded range queries.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use crate::node::NodeId;
use crate::AvlTree;

impl<K: Ord, V> AvlTree<K, V> {
    /// Iterate over entries with `lower <= key <= upper`, in key order.
    ///
    /// Finding the first entry costs one descent; every further entry is one
    /// successor step, so collecting `M` entries is `O(log n + M)`. An
    /// inverted range (`lower > upper`) is empty.
    pub fn range<'a>(&'a self, lower: &'a K, upper: &'a K) -> Range<'a, K, V> {
        let next = if lower > upper {
            None
        } else {
            self.seek(lower)
        };
        Range {
            tree: self,
            next,
            lower,
            upper,
        }
    }

    /// Keys in `[lower, upper]`, in ascending order.
    ///
    /// ```rust
    /// use avlt::AvlTree;
    ///
    /// let tree: AvlTree<_, _> = (0..10).map(|k| (k * 10, ())).collect();
    /// assert_eq!(tree.range_search(&15, &45), [20, 30, 40]);
    /// assert!(tree.range_search(&45, &15).is_empty());
    /// ```
    pub fn range_search(&self, lower: &K, upper: &K) -> Vec<K>
    where
        K: Clone,
    {
        self.range(lower, upper).map(|(key, _)| key.clone()).collect()
    }

    /// Starting point for a scan from `lower`.
    ///
    /// Descends as a search would, remembering the last node visited. On an
    /// exact hit that node is returned. Otherwise the last node visited is
    /// either the smallest key above `lower` or the largest key below it, in
    /// which case the scan skips it with one successor step.
    fn seek(&self, lower: &K) -> Option<NodeId> {
        let mut cur = self.root;
        let mut last = None;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            last = Some(id);
            cur = match lower.cmp(&node.key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right.child(),
            };
        }
        last
    }
}

/// Iterator returned by [`AvlTree::range`].
pub struct Range<'a, K, V> {
    tree: &'a AvlTree<K, V>,
    next: Option<NodeId>,
    lower: &'a K,
    upper: &'a K,
}

impl<'a, K: Ord, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.next {
            let node = &self.tree.nodes[id];
            if node.key > *self.upper {
                self.next = None;
                return None;
            }
            self.next = self.tree.nodes.successor(id);
            if node.key >= *self.lower {
                return Some((&node.key, &node.value));
            }
        }
        None
    }
}

impl<K: Ord, V> FusedIterator for Range<'_, K, V> {}
