//! Newick format parser and writer for array-layout trees.
//!
//! This module provides [NewickParser] to parse restricted Newick strings
//! into [ArrayTree]s in preorder or postorder [Layout], and the writer
//! functions to turn them back into text.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_file`] - reads a file holding one Newick string
//! * [`parse_str`] - parses a single string
//! * [`write_file`] - writes a tree followed by a newline
//! * [`to_newick`] - returns the Newick string of a tree
//!
//! # Format
//! The restricted Newick format has the following grammar:
//! * `tree ::= element ';'`
//! * `group ::= '(' element (',' element)* ')'`
//! * `element ::= group | label`
//! * `label ::= [1-9][0-9]*` (1-based leaf identifier)
//!
//! Furthermore:
//! * Groups may have any positive number of elements
//! * Labels of a tree with `n` leaves are exactly `1..=n`
//! * Whitespace may surround the string, but not occur within it
//! * Branch lengths, internal node labels and comments are not supported
//!   and reported as `UnsupportedFeature`

mod defs;
pub mod parser;
pub mod scanner;
pub mod writer;

pub use parser::NewickParser;
pub use scanner::{ScanSummary, Scanner};
pub use writer::{to_newick, write_newick, write_newick_file};

use crate::error::NewickError;
use crate::model::{ArrayTree, Layout};
use std::path::Path;

// ============================================================================
// QUICK API (pub)
// ============================================================================
/// Reads a file containing a single Newick string and builds its tree in
/// the given layout.
///
/// The whole file is loaded into memory before scanning. Whitespace
/// around the string (e.g. a trailing newline) is fine.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
/// * `layout` - Arena order of the returned tree
///
/// # Returns
/// * [ArrayTree] - Tree parsed from the file
/// * [NewickError] - If file reading fails or the Newick string is invalid
///
/// # Example
/// ```no_run
/// use nwkarray::model::Layout;
/// use nwkarray::newick::parse_file;
///
/// let tree = parse_file("first.nwk", Layout::Preorder)?;
/// println!("Parsed tree with {} leaves", tree.num_leaves());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P, layout: Layout) -> Result<ArrayTree, NewickError> {
    NewickParser::new(layout).parse_file(path)
}

/// Parses a single Newick string into a tree in the given layout.
///
/// # Example
/// ```
/// use nwkarray::model::Layout;
/// use nwkarray::newick::parse_str;
///
/// let tree = parse_str("1;", Layout::Postorder)?;
/// assert_eq!(tree.num_nodes(), 1);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S, layout: Layout) -> Result<ArrayTree, NewickError> {
    NewickParser::new(layout).parse_str(newick)
}

/// Writes a tree to a file as one Newick string followed by a newline.
///
/// See [`write_newick_file`].
pub fn write_file<P: AsRef<Path>>(tree: &ArrayTree, path: P) -> Result<(), NewickError> {
    write_newick_file(tree, path)
}
