//! Newick serialization of array trees.
//!
//! Both layouts are written by one linear scan over the arena with a stack
//! of per-ancestor progress frames, no recursion:
//! * Preorder arenas are scanned front to back and emit the string front to back.
//! * Postorder arenas are scanned back to front. With children stored left
//!   to right, this visits the mirror image of the tree in preorder, so the
//!   string is emitted back to front and reversed once at the end.

use crate::error::NewickError;
use crate::model::{ArrayTree, Layout, Node};
use crate::newick::defs::TERMINATOR;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, trace};

/// Progress of one open ancestor during serialization.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Number of children of the ancestor
    degree: usize,
    /// Number of children whose subtrees are completely written
    finished: usize,
}

/// Writes the given tree to a file as one Newick string followed by a newline.
///
/// The whole string is built in memory and flushed at once.
///
/// # Arguments
/// * `tree` - The tree to write
/// * `path` - Path of the file to create (or truncate)
///
/// # Errors
/// Returns an `IoFailure` if the file cannot be created or written.
pub fn write_newick_file<P: AsRef<Path>>(tree: &ArrayTree, path: P) -> Result<(), NewickError> {
    let path = path.as_ref();
    info!(path = %path.display(), layout = %tree.layout(), size = tree.num_nodes(), "writing tree");
    let file = File::create(path)?;
    write_newick(tree, BufWriter::new(file))
}

/// Writes the given tree to any writer as one Newick string followed by a newline.
///
/// # Example
/// ```
/// use nwkarray::model::Layout;
/// use nwkarray::newick::write_newick;
/// use nwkarray::parse_str;
///
/// let tree = parse_str("((1,2),3);", Layout::Postorder).unwrap();
/// let mut out = Vec::new();
/// write_newick(&tree, &mut out).unwrap();
/// assert_eq!(out, b"((1,2),3);\n");
/// ```
pub fn write_newick<W: Write>(tree: &ArrayTree, mut writer: W) -> Result<(), NewickError> {
    let mut newick = to_newick_bytes(tree, 1);
    newick.push(b'\n');
    writer.write_all(&newick)?;
    writer.flush()?;
    Ok(())
}

/// Returns the Newick representation of this tree with closing semicolon.
///
/// Leaf labels are written 1-based (leaf id + 1); no branch lengths or
/// internal labels are ever produced.
///
/// # Example
/// ```
/// use nwkarray::model::Layout;
/// use nwkarray::newick::to_newick;
/// use nwkarray::parse_str;
///
/// let tree = parse_str("(1,2,(3,4));", Layout::Preorder).unwrap();
/// assert_eq!(to_newick(&tree), "(1,2,(3,4));");
/// ```
pub fn to_newick(tree: &ArrayTree) -> String {
    let newick = to_newick_bytes(tree, 0);
    // Only ASCII digits and punctuation are ever emitted
    String::from_utf8_lossy(&newick).into_owned()
}

/// Serializes the tree into a buffer with room for `extra` trailing bytes.
fn to_newick_bytes(tree: &ArrayTree, extra: usize) -> Vec<u8> {
    let capacity = newick_len(tree) + extra;
    let mut newick = Vec::with_capacity(capacity);

    match tree.layout() {
        Layout::Preorder => {
            emit(tree.nodes().iter(), tree.num_internal(), &mut newick, b'(', b')', push_label);
        }
        Layout::Postorder => {
            emit(
                tree.nodes().iter().rev(),
                tree.num_internal(),
                &mut newick,
                b')',
                b'(',
                push_label_reversed,
            );
            newick.reverse();
        }
    }
    newick.push(TERMINATOR);

    debug_assert_eq!(newick.len() + extra, capacity);
    trace!(layout = %tree.layout(), len = newick.len(), "serialized tree");
    newick
}

/// Runs the frame state machine over the nodes in scan order.
///
/// `open` is emitted when an internal node is entered, `close` when its
/// last child subtree is finished.
fn emit<'a, I>(
    nodes: I,
    num_internal: usize,
    out: &mut Vec<u8>,
    open: u8,
    close: u8,
    push: fn(&mut Vec<u8>, usize),
) where
    I: Iterator<Item = &'a Node>,
{
    let mut frames: Vec<Frame> = Vec::with_capacity(num_internal);

    for node in nodes {
        if node.is_internal() {
            frames.push(Frame {
                degree: node.degree(),
                finished: 0,
            });
            out.push(open);
            continue;
        }

        push(out, node.id() + 1);

        // Close every ancestor whose last child this leaf completed
        while frames.last().is_some_and(|frame| frame.finished + 1 == frame.degree) {
            frames.pop();
            out.push(close);
        }

        if let Some(frame) = frames.last_mut() {
            frame.finished += 1;
            out.push(b',');
        }
    }
}

/// Appends the decimal digits of `label`, least significant first.
fn push_label_reversed(out: &mut Vec<u8>, mut label: usize) {
    loop {
        out.push(b'0' + (label % 10) as u8);
        label /= 10;
        if label == 0 {
            break;
        }
    }
}

/// Appends the decimal digits of `label`.
fn push_label(out: &mut Vec<u8>, label: usize) {
    let start = out.len();
    push_label_reversed(out, label);
    out[start..].reverse();
}

/// Computes the exact length of the Newick string of a tree (with `;`).
///
/// * Parentheses: two per internal node
/// * Commas: one less than the degree per internal node, which sums to
///   `num_nodes - 1 - num_internal`
/// * Labels: digits of `1..=num_leaves`
pub(crate) fn newick_len(tree: &ArrayTree) -> usize {
    let num_internal = tree.num_internal();
    let parentheses = 2 * num_internal;
    let commas = tree.num_nodes() - 1 - num_internal;
    let labels = calculate_index_digit_capacity(tree.num_leaves());

    parentheses + commas + labels + 1
}

/// Calculates the total number of digits of all labels `1..=count`.
///
/// Computed as `count * max_digits` minus, for every shorter digit count
/// `d`, the `10^d - 1` numbers that have at most `d` digits.
///
/// # Examples
/// - 14 leaves (1-14): 14*2 - 9 = 19 digits
/// - 102 leaves (1-102): 102*3 - 9 - 99 = 198 digits
fn calculate_index_digit_capacity(count: usize) -> usize {
    if count == 0 {
        return 0;
    }

    let max_digits = count.ilog10() as usize + 1;

    // Overestimate (as if all labels had max_digits), then subtract
    // 9, 99, 999, ... for the lower digit counts
    let mut total = count * max_digits;
    for digits in 1..max_digits as u32 {
        total -= 10usize.pow(digits) - 1;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::calculate_index_digit_capacity;

    #[test]
    fn test_digit_capacity_matches_digit_count() {
        for count in [1, 9, 10, 14, 99, 100, 102, 1000, 12345] {
            let expected: usize = (1..=count).map(|label: usize| label.to_string().len()).sum();
            assert_eq!(calculate_index_digit_capacity(count), expected, "count {count}");
        }
    }

    #[test]
    fn test_digit_capacity_of_nothing() {
        assert_eq!(calculate_index_digit_capacity(0), 0);
    }
}
