//! Constants and definitions for the Newick scanner, parser and writer.

/// Default bound on the number of digits of one leaf label
/// (20 digits cover every `u64`)
pub(crate) const DEFAULT_MAX_LABEL_DIGITS: usize = 20;

/// Terminator of a Newick string
pub(crate) const TERMINATOR: u8 = b';';
