//! First pass over a Newick string: validation and counting.
//!
//! The [Scanner] walks the input once, front to back, and checks it against
//! the restricted grammar
//! * `tree ::= element ';'`
//! * `group ::= '(' element (',' element)* ')'`
//! * `element ::= group | label`
//! * `label ::= [1-9][0-9]*`
//!
//! On success it reports how many nodes and leaves the tree has, which is
//! all the builder needs to allocate the arena and its stacks exactly once.

use crate::error::NewickError;
use crate::newick::defs::{DEFAULT_MAX_LABEL_DIGITS, TERMINATOR};
use crate::parser::ByteParser;
use tracing::debug;

/// Counts gathered by the [Scanner].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Total number of nodes (internal nodes and leaves)
    pub size: usize,
    /// Number of leaves
    pub num_leaves: usize,
    /// Maximal number of simultaneously open groups
    pub max_depth: usize,
}

impl ScanSummary {
    /// Number of internal nodes, one per `(`.
    pub fn num_internal(&self) -> usize {
        self.size - self.num_leaves
    }
}

/// What the grammar allows at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// A group or a label, i.e. `(` or a digit
    Element,
    /// After a finished element: `,` or `)` inside a group, `;` at depth 0
    Separator,
}

/// Validating, counting scanner.
#[derive(Debug, Clone)]
pub struct Scanner {
    max_label_digits: usize,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LABEL_DIGITS)
    }
}

impl Scanner {
    /// Creates a scanner accepting labels of up to `max_label_digits` digits.
    pub fn new(max_label_digits: usize) -> Self {
        Self { max_label_digits }
    }

    /// Scans one Newick string starting at the current parser position.
    ///
    /// Leading whitespace must already have been skipped. After the
    /// terminating `;` only whitespace may follow.
    ///
    /// # Returns
    /// * `Ok(ScanSummary)` - Counts of the tree
    /// * `Err(NewickError)` - If the string violates the grammar
    ///
    /// # Example
    /// ```
    /// use nwkarray::newick::scanner::Scanner;
    /// use nwkarray::parser::ByteParser;
    ///
    /// let mut parser = ByteParser::for_str("(1,2,(3,4));");
    /// let summary = Scanner::default().scan(&mut parser).unwrap();
    /// assert_eq!(summary.size, 6);
    /// assert_eq!(summary.num_leaves, 4);
    /// assert_eq!(summary.max_depth, 2);
    /// ```
    pub fn scan(&self, parser: &mut ByteParser<'_>) -> Result<ScanSummary, NewickError> {
        if parser.is_eof() {
            return Err(NewickError::malformed(parser, "Empty input"));
        }

        let mut size = 0;
        let mut num_leaves = 0;
        let mut depth = 0usize;
        let mut max_depth = 0;
        let mut expect = Expect::Element;
        let mut last_closed_group = false;

        loop {
            let Some(byte) = parser.peek() else {
                return Err(NewickError::malformed(parser, "Missing terminating ';'"));
            };

            match (byte, expect) {
                (b'(', Expect::Element) => {
                    parser.next_byte();
                    size += 1;
                    depth += 1;
                    max_depth = max_depth.max(depth);
                }
                (b'0'..=b'9', Expect::Element) => {
                    let label = parser.parse_digit_run(self.max_label_digits)?;
                    if label.value == 0 {
                        return Err(NewickError::invalid_label(
                            parser,
                            label.start,
                            "Labels are 1-based, found 0",
                        ));
                    }
                    if label.has_leading_zero(parser) {
                        return Err(NewickError::invalid_label(
                            parser,
                            label.start,
                            "Labels must not have leading zeros",
                        ));
                    }
                    size += 1;
                    num_leaves += 1;
                    expect = Expect::Separator;
                }
                (b',', Expect::Separator) if depth > 0 => {
                    parser.next_byte();
                    expect = Expect::Element;
                }
                (b')', Expect::Separator) if depth > 0 => {
                    parser.next_byte();
                    depth -= 1;
                }
                (TERMINATOR, Expect::Separator) if depth == 0 => {
                    parser.next_byte();
                    break;
                }
                (TERMINATOR, Expect::Separator) => {
                    return Err(NewickError::malformed(
                        parser,
                        format!("Reached ';' with {depth} unclosed group(s)"),
                    ));
                }
                (b',' | b')', Expect::Separator) => {
                    return Err(NewickError::malformed(
                        parser,
                        format!("Unbalanced '{}' outside of any group", char::from(byte)),
                    ));
                }
                (b'0'..=b'9', Expect::Separator) if last_closed_group => {
                    return Err(NewickError::unsupported(parser, "Internal node labels"));
                }
                (b'(', Expect::Separator) => {
                    return Err(NewickError::malformed(parser, "Expected ',' before '('"));
                }
                (b')', Expect::Element) => {
                    return Err(NewickError::malformed(parser, "Empty group or missing element before ')'"));
                }
                (b',' | TERMINATOR, Expect::Element) => {
                    return Err(NewickError::malformed(
                        parser,
                        format!("Missing element before '{}'", char::from(byte)),
                    ));
                }
                (b':', _) => return Err(NewickError::unsupported(parser, "Branch lengths")),
                (b'[', _) => return Err(NewickError::unsupported(parser, "Comments")),
                (b, _) if b.is_ascii_whitespace() => {
                    return Err(NewickError::malformed(parser, "Whitespace inside Newick string"));
                }
                (b, _) if b.is_ascii_alphabetic() || b == b'\'' || b == b'_' => {
                    return Err(NewickError::unsupported(parser, "Non-numeric labels"));
                }
                (b, _) => {
                    return Err(NewickError::malformed(
                        parser,
                        format!("Unexpected byte {:?}", char::from(b)),
                    ));
                }
            }

            last_closed_group = byte == b')';
        }

        parser.skip_whitespace();
        if !parser.is_eof() {
            return Err(NewickError::malformed(parser, "Unexpected content after ';'"));
        }

        let summary = ScanSummary {
            size,
            num_leaves,
            max_depth,
        };
        debug!(size, num_leaves, max_depth, "scanned Newick string");
        Ok(summary)
    }
}
