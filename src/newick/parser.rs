//! Structs and logic to build array trees from Newick strings.
//!
//! This module provides the [NewickParser] struct. Parsing is two linear
//! passes over the in-memory input: the [Scanner] validates and counts, then
//! the layout-specific builder fills the exactly sized arena using a
//! connection stack and a degree stack instead of recursion.

use crate::error::NewickError;
use crate::model::{ArrayTree, Layout, Node, NodeId, NodeIndex};
use crate::newick::defs::{DEFAULT_MAX_LABEL_DIGITS, TERMINATOR};
use crate::newick::scanner::{ScanSummary, Scanner};
use crate::parser::ByteParser;
use std::path::Path;
use tracing::{debug, info};

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for restricted Newick strings into [ArrayTree]s.
///
/// # Construction
/// * [`new(layout)`](Self::new) — generic constructor
/// * [`preorder()`](Self::preorder) / [`postorder()`](Self::postorder)
///
/// # Configuration
/// * [`with_layout(layout)`](Self::with_layout)
///     - Arena order of the built trees.
/// * [`with_max_label_digits(digits)`](Self::with_max_label_digits)
///     - Longest accepted leaf label, longer ones are a `LabelOverflow`
///       (default 20).
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) / [`parse_bytes`](Self::parse_bytes) — in-memory input
/// * [`parse_file`](Self::parse_file) — reads the whole file first
///
/// # Example
/// ```
/// use nwkarray::newick::NewickParser;
///
/// let tree = NewickParser::postorder().parse_str("((1,2),3);").unwrap();
/// assert_eq!(tree.root_index(), 4);
/// assert_eq!(tree.num_leaves(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    layout: Layout,
    max_label_digits: usize,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] building trees in the given layout.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            max_label_digits: DEFAULT_MAX_LABEL_DIGITS,
        }
    }

    /// Creates a new [NewickParser] building preorder trees.
    pub fn preorder() -> Self {
        Self::new(Layout::Preorder)
    }

    /// Creates a new [NewickParser] building postorder trees.
    pub fn postorder() -> Self {
        Self::new(Layout::Postorder)
    }

    /// Sets the layout of the built trees.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the maximal number of digits a leaf label may have.
    pub fn with_max_label_digits(mut self, max_label_digits: usize) -> Self {
        self.max_label_digits = max_label_digits;
        self
    }

    /// Returns the configured layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::preorder()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Reads the whole file into memory and parses the single Newick
    /// string it contains.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Returns
    /// * `Ok(ArrayTree)` - The parsed tree
    /// * `Err(NewickError)` - `IoFailure` if reading fails, otherwise the parse error
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ArrayTree, NewickError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        info!(path = %path.display(), bytes = bytes.len(), layout = %self.layout, "reading tree");
        self.parse_bytes(&bytes)
    }

    /// Parses a single Newick string.
    ///
    /// Whitespace around the string is skipped, whitespace inside is an error.
    pub fn parse_str<S: AsRef<str>>(&self, newick: S) -> Result<ArrayTree, NewickError> {
        self.parse_bytes(newick.as_ref().as_bytes())
    }

    /// Parses a single Newick string given as bytes.
    ///
    /// # Returns
    /// * `Ok(ArrayTree)` - The fully built tree
    /// * `Err(NewickError)` - If the input is not a valid restricted Newick string;
    ///   no partially built tree is retained
    pub fn parse_bytes(&self, input: &[u8]) -> Result<ArrayTree, NewickError> {
        let mut parser = ByteParser::new(input);
        parser.skip_whitespace();
        let start = parser.position();

        let summary = Scanner::new(self.max_label_digits).scan(&mut parser)?;

        // Second pass over the already validated bytes
        parser.set_position(start);
        let tree = match self.layout {
            Layout::Preorder => self.build_preorder(&mut parser, &summary)?,
            Layout::Postorder => self.build_postorder(&mut parser, &summary)?,
        };

        debug_assert!(tree.is_valid());
        debug!(
            layout = %self.layout,
            size = tree.num_nodes(),
            num_leaves = tree.num_leaves(),
            "built tree"
        );
        Ok(tree)
    }
}

// ============================================================================
// Building
// ============================================================================
impl NewickParser {
    /// Builds the preorder arena: an internal node takes its slot (and id)
    /// at its opening `(`, so every node lands before its descendants.
    ///
    /// At `)`, the top `degree` entries of the connection stack are the
    /// children of the group and the entry below them is the node that
    /// opened it; the children are attached and popped, leaving the
    /// internal node as the closed subtree.
    fn build_preorder(
        &self,
        parser: &mut ByteParser<'_>,
        summary: &ScanSummary,
    ) -> Result<ArrayTree, NewickError> {
        let mut nodes = vec![Node::default(); summary.size];
        let mut leaf_ids = LeafIds::new(summary.num_leaves);
        let mut connection_stack: Vec<NodeIndex> = Vec::with_capacity(summary.size);
        let mut degree_stack: Vec<usize> = Vec::with_capacity(summary.max_depth);
        let mut cur_node: NodeIndex = 0;
        let mut next_internal_id: NodeId = summary.num_leaves;

        while let Some(byte) = parser.peek() {
            match byte {
                b'(' => {
                    parser.next_byte();
                    nodes[cur_node] = Node::new(next_internal_id);
                    next_internal_id += 1;
                    connection_stack.push(cur_node);
                    if let Some(parent_degree) = degree_stack.last_mut() {
                        *parent_degree += 1;
                    }
                    degree_stack.push(0);
                    cur_node += 1;
                }
                b')' => {
                    let Some(degree) = degree_stack.pop() else {
                        return Err(unbalanced(parser));
                    };
                    let Some(opener_pos) = connection_stack.len().checked_sub(degree + 1) else {
                        return Err(unbalanced(parser));
                    };
                    let opener = connection_stack[opener_pos];
                    nodes[opener].set_children(connection_stack.drain(opener_pos + 1..).collect());
                    parser.next_byte();
                }
                b',' => {
                    parser.next_byte();
                }
                TERMINATOR => break,
                _ => {
                    let id = leaf_ids.parse_next(parser, self.max_label_digits)?;
                    nodes[cur_node] = Node::new(id);
                    connection_stack.push(cur_node);
                    // Absent only for the single-leaf tree
                    if let Some(parent_degree) = degree_stack.last_mut() {
                        *parent_degree += 1;
                    }
                    cur_node += 1;
                }
            }
        }

        debug_assert_eq!(connection_stack, [0]);
        debug_assert!(degree_stack.is_empty());
        Ok(ArrayTree::from_parts(Layout::Preorder, nodes, summary.num_leaves))
    }

    /// Builds the postorder arena: an internal node takes its slot (and id)
    /// at its closing `)`, after all of its descendants.
    ///
    /// At `)`, the top `degree` entries of the connection stack are the
    /// already built children; they are replaced by the new internal node.
    fn build_postorder(
        &self,
        parser: &mut ByteParser<'_>,
        summary: &ScanSummary,
    ) -> Result<ArrayTree, NewickError> {
        let mut nodes = vec![Node::default(); summary.size];
        let mut leaf_ids = LeafIds::new(summary.num_leaves);
        let mut connection_stack: Vec<NodeIndex> = Vec::with_capacity(summary.size);
        let mut degree_stack: Vec<usize> = Vec::with_capacity(summary.max_depth);
        let mut cur_node: NodeIndex = 0;
        let mut next_internal_id: NodeId = summary.num_leaves;

        while let Some(byte) = parser.peek() {
            match byte {
                b'(' => {
                    parser.next_byte();
                    if let Some(parent_degree) = degree_stack.last_mut() {
                        *parent_degree += 1;
                    }
                    degree_stack.push(0);
                }
                b')' => {
                    let Some(degree) = degree_stack.pop() else {
                        return Err(unbalanced(parser));
                    };
                    let Some(first_child_pos) = connection_stack.len().checked_sub(degree) else {
                        return Err(unbalanced(parser));
                    };
                    let children = connection_stack.drain(first_child_pos..).collect();
                    nodes[cur_node] = Node::new_internal(next_internal_id, children);
                    next_internal_id += 1;
                    connection_stack.push(cur_node);
                    cur_node += 1;
                    parser.next_byte();
                }
                b',' => {
                    parser.next_byte();
                }
                TERMINATOR => break,
                _ => {
                    let id = leaf_ids.parse_next(parser, self.max_label_digits)?;
                    nodes[cur_node] = Node::new(id);
                    connection_stack.push(cur_node);
                    if let Some(parent_degree) = degree_stack.last_mut() {
                        *parent_degree += 1;
                    }
                    cur_node += 1;
                }
            }
        }

        debug_assert_eq!(connection_stack, [summary.size - 1]);
        debug_assert!(degree_stack.is_empty());
        Ok(ArrayTree::from_parts(Layout::Postorder, nodes, summary.num_leaves))
    }
}

fn unbalanced(parser: &ByteParser<'_>) -> NewickError {
    NewickError::malformed(parser, "Unbalanced ')'")
}

// =#========================================================================#=
// LEAF IDS
// =#========================================================================$=
/// Converts leaf labels to ids and makes sure the ids of a tree are
/// exactly `[0, num_leaves)`.
struct LeafIds {
    seen: Vec<bool>,
}

impl LeafIds {
    fn new(num_leaves: usize) -> Self {
        Self {
            seen: vec![false; num_leaves],
        }
    }

    /// Parses the label at the parser position and returns its leaf id.
    ///
    /// # Errors
    /// `InvalidLabel` if the label is outside `1..=num_leaves` or was seen before.
    fn parse_next(
        &mut self,
        parser: &mut ByteParser<'_>,
        max_label_digits: usize,
    ) -> Result<NodeId, NewickError> {
        let label = parser.parse_digit_run(max_label_digits)?;
        let num_leaves = self.seen.len();

        if !(1..=num_leaves).contains(&label.value) {
            return Err(NewickError::invalid_label(
                parser,
                label.start,
                format!("Label {} outside of 1..={num_leaves}", label.value),
            ));
        }

        let id = label.value - 1;
        if std::mem::replace(&mut self.seen[id], true) {
            return Err(NewickError::invalid_label(
                parser,
                label.start,
                format!("Label {} occurs more than once", label.value),
            ));
        }

        Ok(id)
    }
}
