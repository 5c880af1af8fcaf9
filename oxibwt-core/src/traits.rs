//! Core traits for reversible byte transforms.
//!
//! Every stage of the block-sorting pipeline (Burrows-Wheeler, Move-To-Front)
//! is a whole-buffer transform with an exact inverse. Stages are chained by
//! running `forward` in order and `inverse` in reverse order.

use crate::error::Result;
use std::io::{Read, Write};

/// Direction of a transform, as selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Apply the forward transform (`-` in filter syntax).
    #[default]
    Forward,
    /// Apply the inverse transform (`+` in filter syntax).
    Inverse,
}

impl Direction {
    /// Parse the classic filter argument: `-` for forward, `+` for inverse.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(Self::Forward),
            "+" => Some(Self::Inverse),
            _ => None,
        }
    }

    /// The filter symbol for this direction.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Forward => "-",
            Self::Inverse => "+",
        }
    }
}

/// A reversible transform over a single in-memory byte buffer.
///
/// Implementations own no state between calls: every invocation starts from
/// the same initial tables, so one value can be shared freely.
///
/// Either call returns the full output or an error. There is no partial
/// output mode.
pub trait ByteTransform {
    /// Short stage name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Apply the forward transform.
    fn forward(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Apply the inverse transform.
    fn inverse(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Apply the transform in the given direction.
    fn apply(&self, direction: Direction, input: &[u8]) -> Result<Vec<u8>> {
        match direction {
            Direction::Forward => self.forward(input),
            Direction::Inverse => self.inverse(input),
        }
    }

    /// Read the whole of `reader`, transform it and write the result.
    ///
    /// Returns the number of bytes written.
    fn filter(
        &self,
        direction: Direction,
        reader: &mut dyn Read,
        writer: &mut dyn Write,
    ) -> Result<u64> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;

        let output = self.apply(direction, &input)?;
        writer.write_all(&output)?;
        writer.flush()?;

        Ok(output.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Reverse;

    impl ByteTransform for Reverse {
        fn name(&self) -> &'static str {
            "reverse"
        }

        fn forward(&self, input: &[u8]) -> Result<Vec<u8>> {
            Ok(input.iter().rev().copied().collect())
        }

        fn inverse(&self, input: &[u8]) -> Result<Vec<u8>> {
            self.forward(input)
        }
    }

    #[test]
    fn test_direction_symbols() {
        assert_eq!(Direction::from_symbol("-"), Some(Direction::Forward));
        assert_eq!(Direction::from_symbol("+"), Some(Direction::Inverse));
        assert_eq!(Direction::from_symbol("x"), None);
        assert_eq!(Direction::Inverse.symbol(), "+");
        assert_eq!(Direction::default(), Direction::Forward);
    }

    #[test]
    fn test_filter_roundtrip() {
        let mut reader = Cursor::new(b"abc".to_vec());
        let mut out = Vec::new();
        let written = Reverse
            .filter(Direction::Forward, &mut reader, &mut out)
            .unwrap();
        assert_eq!(written, 3);
        assert_eq!(out, b"cba");

        let back = Reverse.apply(Direction::Inverse, &out).unwrap();
        assert_eq!(back, b"abc");
    }
}
