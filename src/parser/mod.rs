//! Basic low-level byte parser functionality.
pub mod byte_parser;

pub use byte_parser::{ByteParser, DigitRun};
