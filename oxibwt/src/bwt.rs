//! Burrows-Wheeler Transform.
//!
//! The forward transform sorts every circular rotation of the block and keeps
//! the last column of the sorted matrix, which groups bytes that share a
//! following context. The inverse rebuilds the text from that column alone
//! with a counting sort, in linear time and without another suffix sort.
//!
//! On the wire a block is the primary index as a big-endian `u32` followed by
//! the last column. The empty block is the empty byte string.

use crate::suffix::CircularSuffixArray;
use log::debug;
use oxibwt_core::error::{OxiBwtError, Result};
use oxibwt_core::{ALPHABET_SIZE, ByteTransform, PRIMARY_INDEX_BYTES};
use std::io::{self, Read, Write};

/// A transformed block: the last column and the row of the original text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BwtBlock {
    /// Sorted rank of the unrotated text.
    pub primary_index: u32,
    /// Byte preceding each sorted rotation, in rank order.
    pub last_column: Vec<u8>,
}

impl BwtBlock {
    /// The block for an empty text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of text bytes in the block.
    pub fn len(&self) -> usize {
        self.last_column.len()
    }

    /// Returns true if the block holds no text.
    pub fn is_empty(&self) -> bool {
        self.last_column.is_empty()
    }

    /// Serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            PRIMARY_INDEX_BYTES + self.len()
        }
    }

    /// Serialize the block: primary index then last column.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        if !self.is_empty() {
            out.extend_from_slice(&self.primary_index.to_be_bytes());
            out.extend_from_slice(&self.last_column);
        }
        out
    }

    /// Write the serialized block to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        if !self.is_empty() {
            writer.write_all(&self.primary_index.to_be_bytes())?;
            writer.write_all(&self.last_column)?;
        }
        Ok(())
    }

    /// Parse a serialized block that spans all of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::empty());
        }

        if data.len() < PRIMARY_INDEX_BYTES {
            return Err(OxiBwtError::malformed(format!(
                "truncated primary index: {} of {} bytes",
                data.len(),
                PRIMARY_INDEX_BYTES
            )));
        }

        let (header, payload) = data.split_at(PRIMARY_INDEX_BYTES);
        if payload.is_empty() {
            return Err(OxiBwtError::malformed("header without payload"));
        }
        let mut primary = [0u8; PRIMARY_INDEX_BYTES];
        primary.copy_from_slice(header);

        let block = Self {
            primary_index: u32::from_be_bytes(primary),
            last_column: payload.to_vec(),
        };
        block.validate()?;
        Ok(block)
    }

    /// Read a block whose text length `len` is known from outer framing.
    ///
    /// Exactly `len` payload bytes must be available after the header. For
    /// `len == 0` nothing is read.
    pub fn read_from<R: Read>(reader: &mut R, len: usize) -> Result<Self> {
        if len == 0 {
            return Ok(Self::empty());
        }

        let mut header = [0u8; PRIMARY_INDEX_BYTES];
        read_exact_or_malformed(reader, &mut header, "primary index")?;

        let mut last_column = vec![0u8; len];
        read_exact_or_malformed(reader, &mut last_column, "block payload")?;

        let block = Self {
            primary_index: u32::from_be_bytes(header),
            last_column,
        };
        block.validate()?;
        Ok(block)
    }

    /// Check that the primary index fits the block: zero for an empty block,
    /// otherwise a row of the last column.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            if self.primary_index != 0 {
                return Err(OxiBwtError::malformed(format!(
                    "primary index {} given for an empty block",
                    self.primary_index
                )));
            }
            return Ok(());
        }

        if self.primary_index as usize >= self.len() {
            return Err(OxiBwtError::malformed(format!(
                "primary index {} out of range for block of {} bytes",
                self.primary_index,
                self.len()
            )));
        }
        Ok(())
    }

    /// Reconstruct the original text.
    pub fn inverse(&self) -> Result<Vec<u8>> {
        inverse_transform(&self.last_column, self.primary_index)
    }
}

/// Read into `buf` completely, reporting a short stream as malformed input.
fn read_exact_or_malformed<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(OxiBwtError::malformed(format!(
                    "{} declared {} bytes but only {} available",
                    what,
                    buf.len(),
                    filled
                )));
            }
            Ok(read) => filled += read,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Perform the Burrows-Wheeler Transform.
pub fn transform(data: &[u8]) -> Result<BwtBlock> {
    if data.is_empty() {
        return Ok(BwtBlock::empty());
    }

    let suffixes = CircularSuffixArray::new(data)?;
    block_from_suffixes(data, &suffixes)
}

/// Perform the Burrows-Wheeler Transform, sorting rotations on all cores.
#[cfg(feature = "parallel")]
pub fn transform_parallel(data: &[u8]) -> Result<BwtBlock> {
    if data.is_empty() {
        return Ok(BwtBlock::empty());
    }

    let suffixes = CircularSuffixArray::new_parallel(data)?;
    block_from_suffixes(data, &suffixes)
}

fn block_from_suffixes(data: &[u8], suffixes: &CircularSuffixArray) -> Result<BwtBlock> {
    let n = data.len();

    let primary = suffixes
        .primary_row()
        .ok_or_else(|| OxiBwtError::invalid_argument("no rotation starts at offset 0"))?;

    // Last column: the byte circularly before each sorted rotation.
    let last_column: Vec<u8> = suffixes
        .iter()
        .map(|offset| data[if offset == 0 { n - 1 } else { offset - 1 }])
        .collect();

    debug!("bwt: {} bytes, primary index {}", n, primary);

    Ok(BwtBlock {
        primary_index: primary as u32,
        last_column,
    })
}

/// Perform the inverse Burrows-Wheeler Transform.
///
/// `next[r]` is the position in `last_column` of the byte that starts row
/// `r`; following it from `primary_index` replays the text in order.
pub fn inverse_transform(last_column: &[u8], primary_index: u32) -> Result<Vec<u8>> {
    let n = last_column.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut row = primary_index as usize;
    if row >= n {
        return Err(OxiBwtError::malformed(format!(
            "primary index {} out of range for block of {} bytes",
            primary_index, n
        )));
    }

    // count[v + 1] holds occurrences of v; prefix sums turn it into first ranks.
    let mut count = [0usize; ALPHABET_SIZE + 1];
    for &byte in last_column {
        count[byte as usize + 1] += 1;
    }
    for v in 0..ALPHABET_SIZE {
        count[v + 1] += count[v];
    }

    let mut next = vec![0usize; n];
    for (i, &byte) in last_column.iter().enumerate() {
        let rank = &mut count[byte as usize];
        next[*rank] = i;
        *rank += 1;
    }

    let mut text = Vec::with_capacity(n);
    for _ in 0..n {
        row = next[row];
        text.push(last_column[row]);
    }

    debug!("inverse bwt: {} bytes from primary index {}", n, primary_index);
    Ok(text)
}

/// The Burrows-Wheeler stage with its wire framing.
#[derive(Debug, Clone, Copy, Default)]
pub struct BurrowsWheeler;

impl ByteTransform for BurrowsWheeler {
    fn name(&self) -> &'static str {
        "bwt"
    }

    fn forward(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(transform(input)?.to_bytes())
    }

    fn inverse(&self, input: &[u8]) -> Result<Vec<u8>> {
        BwtBlock::from_bytes(input)?.inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bwt_empty() {
        let block = transform(b"").unwrap();
        assert!(block.is_empty());
        assert_eq!(block.primary_index, 0);
        assert!(block.to_bytes().is_empty());
        assert!(inverse_transform(b"", 0).unwrap().is_empty());
        assert!(BurrowsWheeler.inverse(b"").unwrap().is_empty());
    }

    #[test]
    fn test_bwt_single() {
        let block = transform(b"a").unwrap();
        assert_eq!(block.last_column, b"a");
        assert_eq!(block.primary_index, 0);
        assert_eq!(block.to_bytes(), vec![0, 0, 0, 0, b'a']);
    }

    #[test]
    fn test_bwt_abracadabra() {
        let block = transform(b"ABRACADABRA!").unwrap();
        assert_eq!(block.primary_index, 3);
        assert_eq!(block.last_column, b"ARD!RCAAAABB");

        let mut expected = vec![0x00, 0x00, 0x00, 0x03];
        expected.extend_from_slice(b"ARD!RCAAAABB");
        assert_eq!(block.to_bytes(), expected);

        assert_eq!(block.inverse().unwrap(), b"ABRACADABRA!");
    }

    #[test]
    fn test_bwt_banana() {
        let block = transform(b"banana").unwrap();
        assert_eq!(block.last_column, b"nnbaaa");
        assert_eq!(block.primary_index, 3);
        assert_eq!(inverse_transform(b"nnbaaa", 3).unwrap(), b"banana");
    }

    #[test]
    fn test_bwt_roundtrip() {
        let test_cases = [
            b"hello world".as_slice(),
            b"abracadabra",
            b"mississippi",
            b"AAAAAAAAAA",
            b"ABAB",
            b"abcde",
            b"\x00\xff\x00\xff\x01",
            b"the quick brown fox jumps over the lazy dog",
        ];

        for data in test_cases {
            let block = transform(data).unwrap();
            let recovered = inverse_transform(&block.last_column, block.primary_index).unwrap();
            assert_eq!(recovered, data, "Failed for: {:?}", data);

            let framed = BurrowsWheeler.forward(data).unwrap();
            assert_eq!(BurrowsWheeler.inverse(&framed).unwrap(), data);
        }
    }

    #[test]
    fn test_bwt_groups_similar() {
        let data = b"abababab";
        let block = transform(data).unwrap();

        let runs = 1 + block
            .last_column
            .windows(2)
            .filter(|pair| pair[0] != pair[1])
            .count();
        assert!(runs <= 2, "BWT should group similar bytes");
    }

    #[test]
    fn test_inverse_rejects_bad_primary() {
        let err = inverse_transform(b"abc", 3).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_from_bytes_framing() {
        assert!(BwtBlock::from_bytes(&[0, 0]).unwrap_err().is_malformed());
        assert!(BwtBlock::from_bytes(&[0, 0, 0, 0]).unwrap_err().is_malformed());
        assert!(
            BwtBlock::from_bytes(&[0, 0, 0, 2, b'a', b'b'])
                .unwrap_err()
                .is_malformed()
        );

        let block = BwtBlock::from_bytes(&[0, 0, 0, 1, b'b', b'a']).unwrap();
        assert_eq!(block.primary_index, 1);
        assert_eq!(block.last_column, b"ba");
    }

    #[test]
    fn test_read_from_declared_length() {
        let block = transform(b"mississippi").unwrap();
        let mut bytes = Vec::new();
        block.write_to(&mut bytes).unwrap();
        assert_eq!(bytes.len(), block.encoded_len());

        let read = BwtBlock::read_from(&mut Cursor::new(&bytes), 11).unwrap();
        assert_eq!(read, block);

        let err = BwtBlock::read_from(&mut Cursor::new(&bytes), 12).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("declared 12 bytes but only 11"));

        let err = BwtBlock::read_from(&mut Cursor::new(&bytes[..2]), 11).unwrap_err();
        assert!(err.is_malformed());

        let empty = BwtBlock::read_from(&mut Cursor::new(Vec::new()), 0).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_validate_empty_block() {
        let block = BwtBlock {
            primary_index: 5,
            last_column: Vec::new(),
        };
        assert!(block.validate().unwrap_err().is_malformed());
        assert!(BwtBlock::empty().validate().is_ok());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_transform_matches() {
        let data = b"the quick brown fox jumps over the lazy dog ".repeat(40);
        assert_eq!(transform(&data).unwrap(), transform_parallel(&data).unwrap());
    }
}
