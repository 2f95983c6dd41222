//! Low-level byte-by-byte cursor for ASCII Newick input.
//!
//! This module provides [ByteParser] for in-memory text with support for
//! peeking, consuming, digit-run parsing and context extraction for error
//! reporting. It is the foundation of the scanner and both tree builders.

use crate::error::NewickError;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte cursor over an in-memory ASCII buffer.
///
/// The whole input is held in memory (files are read at once), so the
/// cursor can be rewound with [`set_position`](Self::set_position) to run
/// the builder pass over the same bytes the scanner has already validated.
///
/// # Example
/// ```
/// use nwkarray::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  (12,3);");
/// parser.skip_whitespace();
/// assert!(parser.consume_if(b'('));
/// let label = parser.parse_digit_run(20).unwrap();
/// assert_eq!(label.value, 12);
/// assert_eq!(parser.peek(), Some(b','));
/// ```
pub struct ByteParser<'a> {
    /// The bytes being parsed
    input: &'a [u8],
    /// Current position in the byte slice
    pos: usize,
}

/// A run of decimal digits consumed as one leaf label.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DigitRun {
    /// Numeric value of the run
    pub value: usize,
    /// Byte offset of the first digit
    pub start: usize,
    /// Number of digits
    pub len: usize,
}

impl DigitRun {
    /// Whether the run has superfluous leading zeros (e.g. `007`).
    pub fn has_leading_zero(&self, parser: &ByteParser<'_>) -> bool {
        self.len > 1 && parser.byte_at(self.start) == Some(b'0')
    }
}

impl<'a> ByteParser<'a> {
    /// Creates a new `ByteParser` over a byte slice.
    ///
    /// # Arguments
    /// * `input` - The bytes to parse
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Creates a new `ByteParser` over a string.
    ///
    /// # Arguments
    /// * `input` - The string to parse
    pub fn for_str(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Gets the current byte and advances the position (consumes it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.input.get(pos).copied()
    }

    /// Consumes the current byte if it matches the target byte.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skips (consumes) all consecutive ASCII whitespace characters.
    ///
    /// Whitespace includes: space (' '), tab ('\t'), newline ('\n'),
    /// carriage return ('\r') and form feed.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Parses a run of decimal digits as one number.
    ///
    /// Expects the parser at the first digit. The whole run is consumed,
    /// no matter how long, so that the cursor always ends on the byte after
    /// the label.
    ///
    /// # Arguments
    /// * `max_digits` - Maximal accepted number of digits
    ///
    /// # Errors
    /// * `MalformedSyntax` - if the current byte is not a digit
    /// * `LabelOverflow` - if the run is longer than `max_digits`
    ///   or its value does not fit into `usize`
    pub fn parse_digit_run(&mut self, max_digits: usize) -> Result<DigitRun, NewickError> {
        let start = self.pos;
        let mut value: Option<usize> = Some(0);

        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            value = value
                .and_then(|v| v.checked_mul(10))
                .and_then(|v| v.checked_add(usize::from(b - b'0')));
            self.pos += 1;
        }

        let len = self.pos - start;
        if len == 0 {
            return Err(NewickError::malformed(self, "Expected a leaf label (digits)"));
        }
        if len > max_digits {
            return Err(NewickError::label_overflow(
                self,
                start,
                format!("Label has {len} digits, at most {max_digits} are supported"),
            ));
        }
        let value = value.ok_or_else(|| {
            NewickError::label_overflow(self, start, format!("Label exceeds maximum of {}", usize::MAX))
        })?;

        Ok(DigitRun { value, start, len })
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Sets the position in the byte stream.
    ///
    /// # Arguments
    /// * `pos` - The byte offset to seek to
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Returns a string of up to `k` bytes starting at `pos` for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, pos: usize, k: usize) -> String {
        let start = pos.min(self.input.len());
        let end = (start + k).min(self.input.len());
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }
}
