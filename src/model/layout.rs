//! Array layouts of a tree arena.

use crate::model::tree::NodeIndex;
use std::fmt;

/// Order in which the nodes of a tree are laid out in its arena.
///
/// Both layouts keep every subtree in one contiguous run of indices,
/// so a plain linear scan over the arena is a traversal of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Root at index 0, every node precedes its descendants.
    #[default]
    Preorder,
    /// Root at the last index, every node follows its descendants.
    Postorder,
}

impl Layout {
    /// Returns the arena index of the root for a tree with `size` nodes.
    ///
    /// # Panics
    /// Panics (in debug builds) if `size` is zero.
    pub fn root_index(&self, size: usize) -> NodeIndex {
        debug_assert!(size > 0);
        match self {
            Layout::Preorder => 0,
            Layout::Postorder => size - 1,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Preorder => write!(f, "preorder"),
            Layout::Postorder => write!(f, "postorder"),
        }
    }
}
