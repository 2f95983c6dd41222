//! Error types for reading and writing array-layout Newick trees.
//!
//! This module provides [NewickError] and [NewickErrorKind] for representing
//! and reporting everything that can go wrong while scanning, building or
//! writing a tree. Every error aborts the whole operation, no partially
//! built tree is ever handed out.

use crate::parser::byte_parser::ByteParser;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 20;

// =#========================================================================#=
// NEWICK ERROR KIND
// =#========================================================================#=
/// Kinds of errors that can occur while reading or writing a Newick string.
#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum NewickErrorKind {
    /// Unbalanced or misplaced parentheses/commas, empty input,
    /// missing terminator or trailing bytes.
    #[error("Malformed Newick string - {0}")]
    MalformedSyntax(String),

    /// Digit run does not fit into a node id or exceeds the digit bound.
    #[error("Leaf label overflow - {0}")]
    LabelOverflow(String),

    /// Zero, out-of-range, repeated or zero-padded leaf label.
    #[error("Invalid leaf label - {0}")]
    InvalidLabel(String),

    /// Internal-node label, branch length, comment or non-numeric label.
    #[error("Unsupported Newick feature - {0}")]
    UnsupportedFeature(String),

    /// Underlying file could not be opened, read or written.
    #[error("IO error - {0}")]
    IoFailure(String),
}

// =#========================================================================#=
// NEWICK ERROR
// =#========================================================================$=
/// Error with contextual information (position and following bytes).
#[derive(Error, Debug)]
#[error("{kind}{}", location_suffix(.position, .context))]
pub struct NewickError {
    kind: NewickErrorKind,
    position: Option<usize>,
    context: String,
}

fn location_suffix(position: &Option<usize>, context: &str) -> String {
    match position {
        Some(position) if context.is_empty() => format!(" at position {position}"),
        Some(position) => format!(" at position {position} (next bytes: {context:?})"),
        None => String::new(),
    }
}

impl NewickError {
    /// Create a NewickError from an error kind and the parser state
    pub fn from_parser(kind: NewickErrorKind, parser: &ByteParser<'_>) -> Self {
        Self::at(kind, parser, parser.position())
    }

    /// Create a NewickError for a token that started at `position`
    pub fn at(kind: NewickErrorKind, parser: &ByteParser<'_>, position: usize) -> Self {
        Self {
            kind,
            position: Some(position),
            context: parser.get_context_as_string(position, DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for MalformedSyntax
    pub fn malformed(parser: &ByteParser<'_>, msg: impl Into<String>) -> Self {
        Self::from_parser(NewickErrorKind::MalformedSyntax(msg.into()), parser)
    }

    /// Convenience constructor for LabelOverflow
    pub fn label_overflow(parser: &ByteParser<'_>, position: usize, msg: impl Into<String>) -> Self {
        Self::at(NewickErrorKind::LabelOverflow(msg.into()), parser, position)
    }

    /// Convenience constructor for InvalidLabel
    pub fn invalid_label(parser: &ByteParser<'_>, position: usize, msg: impl Into<String>) -> Self {
        Self::at(NewickErrorKind::InvalidLabel(msg.into()), parser, position)
    }

    /// Convenience constructor for UnsupportedFeature
    pub fn unsupported(parser: &ByteParser<'_>, msg: impl Into<String>) -> Self {
        Self::from_parser(NewickErrorKind::UnsupportedFeature(msg.into()), parser)
    }

    /// Create a NewickError without parser context (e.g. for IO errors)
    pub fn without_context(kind: NewickErrorKind) -> Self {
        Self {
            kind,
            position: None,
            context: String::new(),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> &NewickErrorKind {
        &self.kind
    }

    /// Get the byte offset where the error occurred, if it stems from parsing
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Get the bytes following the error position
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl From<std::io::Error> for NewickError {
    fn from(err: std::io::Error) -> Self {
        Self::without_context(NewickErrorKind::IoFailure(err.to_string()))
    }
}
