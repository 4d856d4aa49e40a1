use thiserror::Error;

/// Errors reported by [`AvlTree`](crate::AvlTree) traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The cursor was positioned before the tree last changed shape, or it
    /// belongs to a different tree.
    #[error("cursor is stale: positioned at stamp {cursor}, tree is at stamp {tree}")]
    StaleCursor { cursor: u64, tree: u64 },
}
