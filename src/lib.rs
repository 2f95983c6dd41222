//! Nwkarray reads and writes rooted trees given as restricted Newick
//! strings into arena-based trees stored in preorder or postorder layout.
//!
//! Core functionality provided:
//! - Parse: a validating scan counts nodes and leaves, then one builder pass
//!   fills an exactly sized arena using index stacks (no recursion).
//! - Write: one scan over the arena (forward for preorder, backward for
//!   postorder) rebuilds the Newick string.
//! - Tree model: [ArrayTree] of [Node]s addressed by index, see [crate::model].
//! - Layouts:
//!   - [Layout::Preorder]: root first, each subtree a contiguous run starting at its root.
//!   - [Layout::Postorder]: root last, each subtree a contiguous run ending at its root.
//!
//! Limitations:
//! - Leaf labels are the integers `1..=n` (stored as 0-based leaf ids)
//! - No branch lengths, internal node labels or comments
//! - One tree per string/file
//!
//! # Usage patterns
//! 1. The functions in this crate root (and [crate::newick]) give quick
//!    access with default settings.
//! 2. Configure a [NewickParser](crate::newick::NewickParser) for control
//!    over layout and label bound.
//!
//! ## Example
//!
//! ```
//! use nwkarray::model::Layout;
//! use nwkarray::{parse_str, to_newick};
//!
//! let first = parse_str("(1,2,(3,4));", Layout::Preorder).unwrap();
//! let second = parse_str("(1,2,(3,4));", Layout::Postorder).unwrap();
//!
//! assert_eq!(first.root_index(), 0);
//! assert_eq!(second.root_index(), 5);
//! assert!(first.is_isomorphic_to(&second));
//! assert_eq!(to_newick(&second), "(1,2,(3,4));");
//! ```
//!
//! Read and write files:
//! ```no_run
//! use nwkarray::model::Layout;
//!
//! let tree = nwkarray::read("tree.nwk", Layout::Postorder)?;
//! nwkarray::write(&tree, "copy.nwk")?;
//! # Ok::<(), nwkarray::error::NewickError>(())
//! ```

pub mod error;
pub mod model;
pub mod newick;
pub mod parser;

pub use crate::error::{NewickError, NewickErrorKind};
pub use crate::model::{ArrayTree, Layout, Node};
use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Reads the single Newick string in the file at `path` into a tree
/// with the given layout.
///
/// See [`newick::parse_file`] for full documentation.
pub fn read<P: AsRef<Path>>(path: P, layout: Layout) -> Result<ArrayTree, NewickError> {
    newick::parse_file(path, layout)
}

/// Writes the tree to the file at `path` as a Newick string and newline.
///
/// See [`newick::write_file`] for full documentation.
pub fn write<P: AsRef<Path>>(tree: &ArrayTree, path: P) -> Result<(), NewickError> {
    newick::write_file(tree, path)
}

/// Parses a Newick string into a tree with the given layout.
///
/// See [`newick::parse_str`] for full documentation.
pub fn parse_str<S: AsRef<str>>(newick: S, layout: Layout) -> Result<ArrayTree, NewickError> {
    newick::parse_str(newick, layout)
}

/// Returns the Newick string (with `;`, without newline) of the tree.
///
/// See [`newick::to_newick`] for full documentation.
pub fn to_newick(tree: &ArrayTree) -> String {
    newick::to_newick(tree)
}
