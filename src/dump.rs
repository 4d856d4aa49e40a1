//! Diagnostic rendering.

use std::fmt::{self, Display};
use std::io::{self, Write};

use crate::node::{NodeId, Right};
use crate::AvlTree;

const RULE: &str = "**************************************************";
const BANNER: &str = "********************* AVLT ***********************";

impl<K: Display, V: Display> AvlTree<K, V> {
    /// Write a deterministic inorder rendering of the tree to `out`.
    ///
    /// After a header with size and height, each node is printed on its own
    /// line as `(key,value,height)`, or as `(key,value,height,successor)` when
    /// the node is threaded to a successor.
    ///
    /// ```rust
    /// use avlt::AvlTree;
    ///
    /// let tree: AvlTree<_, _> = [(10, 'a'), (20, 'b'), (30, 'c')].into_iter().collect();
    /// let mut out = Vec::new();
    /// tree.dump(&mut out).unwrap();
    /// let text = String::from_utf8(out).unwrap();
    /// assert!(text.contains("(10,a,0,20)\n(20,b,1)\n(30,c,0)\n"));
    /// ```
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{RULE}")?;
        writeln!(out, "{BANNER}")?;
        writeln!(out, "** size: {}", self.size)?;
        writeln!(out, "** height: {}", self.height())?;
        self.dump_subtree(out, self.root)?;
        writeln!(out, "{RULE}")
    }

    fn dump_subtree<W: Write>(&self, out: &mut W, at: Option<NodeId>) -> io::Result<()> {
        let Some(id) = at else {
            return Ok(());
        };
        let node = &self.nodes[id];

        self.dump_subtree(out, node.left)?;
        match node.right {
            Right::Thread(next) => writeln!(
                out,
                "({},{},{},{})",
                node.key, node.value, node.height, self.nodes[next].key
            )?,
            Right::Child(_) | Right::Absent => {
                writeln!(out, "({},{},{})", node.key, node.value, node.height)?
            }
        }
        self.dump_subtree(out, node.right.child())
    }

    /// The [`dump`](Self::dump) output as a `String`.
    pub fn dump_to_string(&self) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.dump(&mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
