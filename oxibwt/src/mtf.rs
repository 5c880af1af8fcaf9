//! Move-to-Front Transform.
//!
//! MTF replaces each byte with its position in a dynamic list of all 256 byte
//! values, then moves that byte to the front of the list. Runs of equal bytes
//! in BWT output become runs of zeros, and recently seen bytes get small
//! ranks.

use oxibwt_core::error::{OxiBwtError, Result};
use oxibwt_core::{ALPHABET_SIZE, ByteTransform};

/// The MTF rank table: a permutation of every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MtfTable {
    symbols: [u8; ALPHABET_SIZE],
}

impl MtfTable {
    /// A table in identity order: byte `v` at rank `v`.
    pub fn new() -> Self {
        let mut symbols = [0u8; ALPHABET_SIZE];
        for (rank, symbol) in symbols.iter_mut().enumerate() {
            *symbol = rank as u8;
        }
        Self { symbols }
    }

    /// Current rank of `byte`.
    #[inline]
    pub fn rank_of(&self, byte: u8) -> u8 {
        // The table holds every byte value, so the scan always stops.
        let mut rank = 0;
        while self.symbols[rank] != byte {
            rank += 1;
        }
        rank as u8
    }

    /// Byte currently at `rank`.
    #[inline]
    pub fn symbol_at(&self, rank: u8) -> u8 {
        self.symbols[rank as usize]
    }

    /// Move the byte at `rank` to the front, shifting the bytes before it back by one.
    #[inline]
    pub fn move_to_front(&mut self, rank: u8) {
        self.symbols[..=rank as usize].rotate_right(1);
    }

    /// Current table order, front first.
    pub fn symbols(&self) -> &[u8; ALPHABET_SIZE] {
        &self.symbols
    }

    /// Returns true if every byte value appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; ALPHABET_SIZE];
        for &symbol in &self.symbols {
            if seen[symbol as usize] {
                return false;
            }
            seen[symbol as usize] = true;
        }
        true
    }
}

impl Default for MtfTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Perform Move-to-Front encoding.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut table = MtfTable::new();
    let mut result = Vec::with_capacity(data.len());

    for &byte in data {
        let rank = table.rank_of(byte);
        result.push(rank);
        table.move_to_front(rank);
    }

    result
}

/// Perform Move-to-Front decoding.
pub fn decode(ranks: &[u8]) -> Vec<u8> {
    let mut table = MtfTable::new();
    let mut result = Vec::with_capacity(ranks.len());

    for &rank in ranks {
        result.push(table.symbol_at(rank));
        table.move_to_front(rank);
    }

    result
}

/// Decode ranks delivered as wider symbols, as an entropy decoder may produce.
///
/// A rank above 255 is reported as malformed input, naming its position.
pub fn decode_symbols<I>(ranks: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = u16>,
{
    let ranks = ranks.into_iter();
    let mut table = MtfTable::new();
    let mut result = Vec::with_capacity(ranks.size_hint().0);

    for (pos, rank) in ranks.enumerate() {
        let rank = u8::try_from(rank).map_err(|_| {
            OxiBwtError::malformed(format!("MTF rank {} at position {} exceeds 255", rank, pos))
        })?;
        result.push(table.symbol_at(rank));
        table.move_to_front(rank);
    }

    Ok(result)
}

/// The Move-to-Front stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveToFront;

impl ByteTransform for MoveToFront {
    fn name(&self) -> &'static str {
        "mtf"
    }

    fn forward(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(encode(input))
    }

    fn inverse(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(decode(input))
    }
}
