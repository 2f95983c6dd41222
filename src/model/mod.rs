//! Data model for arena-based rooted trees.
//!
//! # Tree representation
//! Trees are represented by [ArrayTree], which uses the arena pattern to
//! store [Node]s referenced by [NodeIndex]. The arena is ordered by a
//! [Layout]:
//!
//! | Layout | Root index | Subtree of node `p` |
//! |--------|------------|---------------------|
//! | [Layout::Preorder] | `0` | contiguous run starting at `p` |
//! | [Layout::Postorder] | `size - 1` | contiguous run ending at `p` |
//!
//! Each node carries a semantic [NodeId]: leaves use `[0, num_leaves)`
//! (textual label − 1), internal nodes use `[num_leaves, size)` in the
//! order the parser finalized them.

pub mod layout;
pub mod node;
pub mod tree;

pub use layout::Layout;
pub use node::Node;
pub use tree::{ArrayTree, NodeId, NodeIndex, PreOrderIter};
