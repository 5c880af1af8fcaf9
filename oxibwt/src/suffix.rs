//! Circular suffix array.
//!
//! Sorts the n circular rotations of a text without materialising them. A
//! rotation is identified by its starting offset `i` and its `d`-th byte is
//! `text[(i + d) % n]`.
//!
//! Sorting is a 3-way radix quicksort on one byte position at a time. Offsets
//! whose byte at depth `d` is smaller or larger than the pivot stay at depth
//! `d`; offsets that tie advance to depth `d + 1`. Work items live on an
//! explicit heap stack, so highly repetitive input cannot overflow the call
//! stack.
//!
//! Byte-identical rotations (periodic text) are ordered by smallest offset
//! first. Together with the byte comparison this makes the order a total
//! order, which keeps the primary index well defined.
//!
//! Natural text sorts in close to linear time. The worst case is O(n²) byte
//! comparisons, reached by a single repeated byte or any text with a very
//! short period: every rotation ties at every depth until depth n.

use log::trace;
use oxibwt_core::MAX_BLOCK_LEN;
use oxibwt_core::error::{OxiBwtError, Result};
use std::cmp::Ordering;

/// Ranges at or below this size are finished with insertion sort.
const INSERTION_CUTOFF: usize = 15;

/// The sorted order of all circular rotations of a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularSuffixArray {
    index: Vec<usize>,
}

impl CircularSuffixArray {
    /// Sort the circular rotations of `text`.
    ///
    /// An empty text gives an empty array. Texts longer than
    /// [`MAX_BLOCK_LEN`] are rejected because their primary index would not
    /// fit the fixed-width block header.
    pub fn new(text: &[u8]) -> Result<Self> {
        check_len(text)?;

        let mut index: Vec<usize> = (0..text.len()).collect();
        sort_rotations(text, &mut index, 0);

        Ok(Self { index })
    }

    /// Sort the circular rotations of `text` using all rayon worker threads.
    ///
    /// Offsets are first bucketed by their leading byte. Each bucket is a
    /// disjoint slice of the output and is sorted independently from depth 1.
    /// The result is identical to [`CircularSuffixArray::new`].
    #[cfg(feature = "parallel")]
    pub fn new_parallel(text: &[u8]) -> Result<Self> {
        use oxibwt_core::ALPHABET_SIZE;
        use rayon::prelude::*;

        check_len(text)?;

        let mut counts = [0usize; ALPHABET_SIZE];
        for &byte in text {
            counts[byte as usize] += 1;
        }

        let mut next = [0usize; ALPHABET_SIZE];
        let mut total = 0;
        for (start, &count) in next.iter_mut().zip(counts.iter()) {
            *start = total;
            total += count;
        }

        let mut index = vec![0usize; text.len()];
        for (offset, &byte) in text.iter().enumerate() {
            index[next[byte as usize]] = offset;
            next[byte as usize] += 1;
        }

        let mut buckets: Vec<&mut [usize]> = Vec::new();
        let mut rest = index.as_mut_slice();
        for &count in counts.iter().filter(|&&count| count > 0) {
            let (bucket, tail) = std::mem::take(&mut rest).split_at_mut(count);
            buckets.push(bucket);
            rest = tail;
        }

        buckets
            .into_par_iter()
            .for_each(|bucket| sort_rotations(text, bucket, 1));

        Ok(Self { index })
    }

    /// Number of rotations, equal to the text length.
    pub fn length(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the text was empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Offset of the rotation at sorted rank `i`.
    pub fn index(&self, i: usize) -> Result<usize> {
        self.index
            .get(i)
            .copied()
            .ok_or_else(|| OxiBwtError::out_of_range(i, self.index.len()))
    }

    /// The whole permutation, in sorted rank order.
    pub fn as_slice(&self) -> &[usize] {
        &self.index
    }

    /// Iterate over offsets in sorted rank order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.index.iter().copied()
    }

    /// Rank of the unrotated text (the rotation starting at offset 0).
    ///
    /// Exactly one rank holds offset 0, so this is `None` only for an empty text.
    pub fn primary_row(&self) -> Option<usize> {
        self.index.iter().position(|&offset| offset == 0)
    }

    /// Consume the array and return the permutation.
    pub fn into_vec(self) -> Vec<usize> {
        self.index
    }
}

fn check_len(text: &[u8]) -> Result<()> {
    if text.len() > MAX_BLOCK_LEN {
        return Err(OxiBwtError::invalid_argument(format!(
            "text of {} bytes exceeds the block limit of {} bytes",
            text.len(),
            MAX_BLOCK_LEN
        )));
    }
    Ok(())
}

/// Byte `depth` of the rotation starting at `offset`.
///
/// Both arguments are below `text.len()`, so one subtraction replaces `%`.
#[inline]
fn byte_at(text: &[u8], offset: usize, depth: usize) -> u8 {
    let pos = offset + depth;
    if pos >= text.len() {
        text[pos - text.len()]
    } else {
        text[pos]
    }
}

/// Sort `index`, whose offsets all agree on the first `depth` bytes.
fn sort_rotations(text: &[u8], index: &mut [usize], depth: usize) {
    let n = text.len();
    let mut stack: Vec<(usize, usize, usize)> = Vec::new();
    push_range(&mut stack, 0, index.len(), depth);

    let mut partitions = 0usize;
    let mut max_stack = stack.len();

    while let Some((lo, hi, d)) = stack.pop() {
        let range = &mut index[lo..hi];

        if d >= n {
            // Identical rotations: fall back to offset order.
            range.sort_unstable();
            continue;
        }

        if range.len() <= INSERTION_CUTOFF {
            insertion_sort(text, range, d);
            continue;
        }

        let (lt, gt) = partition(text, range, d);
        partitions += 1;

        push_range(&mut stack, lo, lo + lt, d);
        push_range(&mut stack, lo + gt, hi, d);
        push_range(&mut stack, lo + lt, lo + gt, d + 1);
        max_stack = max_stack.max(stack.len());
    }

    trace!(
        "suffix sort: {} offsets from depth {}, {} partitions, stack peak {}",
        index.len(),
        depth,
        partitions,
        max_stack
    );
}

#[inline]
fn push_range(stack: &mut Vec<(usize, usize, usize)>, lo: usize, hi: usize, depth: usize) {
    if hi - lo > 1 {
        stack.push((lo, hi, depth));
    }
}

/// Three-way partition on the byte at `depth`, pivoting on the middle offset.
///
/// Returns `(lt, gt)` with `range[..lt]` below the pivot byte,
/// `range[lt..gt]` equal to it and `range[gt..]` above it.
fn partition(text: &[u8], range: &mut [usize], depth: usize) -> (usize, usize) {
    range.swap(0, range.len() / 2);
    let pivot = byte_at(text, range[0], depth);

    let (mut lt, mut i, mut gt) = (0, 1, range.len());
    while i < gt {
        match byte_at(text, range[i], depth).cmp(&pivot) {
            Ordering::Less => {
                range.swap(lt, i);
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                gt -= 1;
                range.swap(i, gt);
            }
            Ordering::Equal => i += 1,
        }
    }

    (lt, gt)
}

fn insertion_sort(text: &[u8], range: &mut [usize], depth: usize) {
    for i in 1..range.len() {
        let mut j = i;
        while j > 0 && compare_rotations(text, range[j], range[j - 1], depth) == Ordering::Less {
            range.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Compare two rotations from `depth` onwards; full ties go to the smaller offset.
fn compare_rotations(text: &[u8], a: usize, b: usize, depth: usize) -> Ordering {
    for d in depth..text.len() {
        match byte_at(text, a, d).cmp(&byte_at(text, b, d)) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.cmp(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(text: &[u8]) -> Vec<usize> {
        let n = text.len();
        let rotation = |i: usize| -> Vec<u8> { text[i..].iter().chain(&text[..i]).copied().collect() };
        let mut index: Vec<usize> = (0..n).collect();
        index.sort_by(|&a, &b| rotation(a).cmp(&rotation(b)).then(a.cmp(&b)));
        index
    }

    fn make_text(len: usize, sigma: u32, seed: u32) -> Vec<u8> {
        let mut x = seed;
        (0..len)
            .map(|_| {
                x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                ((x >> 16) % sigma) as u8
            })
            .collect()
    }

    fn assert_permutation(csa: &CircularSuffixArray) {
        let mut seen = vec![false; csa.length()];
        for offset in csa.iter() {
            assert!(offset < csa.length());
            assert!(!seen[offset], "offset {} appears twice", offset);
            seen[offset] = true;
        }
    }

    #[test]
    fn test_abracadabra() {
        let csa = CircularSuffixArray::new(b"ABRACADABRA!").unwrap();
        assert_eq!(csa.length(), 12);
        assert_eq!(csa.as_slice(), &[11, 10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2]);
        assert_eq!(csa.primary_row(), Some(3));
        assert_eq!(csa.index(0).unwrap(), 11);
        assert_eq!(csa.index(11).unwrap(), 2);
    }

    #[test]
    fn test_index_out_of_range() {
        let csa = CircularSuffixArray::new(b"abc").unwrap();
        let err = csa.index(3).unwrap_err();
        assert!(matches!(
            err,
            OxiBwtError::OutOfRange {
                index: 3,
                length: 3
            }
        ));
    }

    #[test]
    fn test_empty_text() {
        let csa = CircularSuffixArray::new(b"").unwrap();
        assert_eq!(csa.length(), 0);
        assert!(csa.is_empty());
        assert_eq!(csa.primary_row(), None);
        assert!(csa.index(0).is_err());
    }

    #[test]
    fn test_single_byte() {
        let csa = CircularSuffixArray::new(b"x").unwrap();
        assert_eq!(csa.as_slice(), &[0]);
        assert_eq!(csa.primary_row(), Some(0));
    }

    #[test]
    fn test_identical_bytes_use_offset_order() {
        let csa = CircularSuffixArray::new(b"AAAAAAAAAA").unwrap();
        assert_eq!(csa.into_vec(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_periodic_text_ties() {
        let csa = CircularSuffixArray::new(b"ABAB").unwrap();
        assert_eq!(csa.as_slice(), &[0, 2, 1, 3]);

        let text = b"abcabcabcabcabcabcabcabc";
        let csa = CircularSuffixArray::new(text).unwrap();
        assert_eq!(csa.as_slice(), naive(text).as_slice());
    }

    #[test]
    fn test_matches_naive_on_small_random_texts() {
        for len in 1..=64 {
            for sigma in [2, 4, 256] {
                let text = make_text(len, sigma, len as u32 * 31 + sigma);
                let csa = CircularSuffixArray::new(&text).unwrap();
                assert_eq!(
                    csa.as_slice(),
                    naive(&text).as_slice(),
                    "mismatch on len={} sigma={}",
                    len,
                    sigma
                );
            }
        }
    }

    #[test]
    fn test_sorted_and_permutation_on_larger_text() {
        let text = make_text(5000, 4, 7);
        let csa = CircularSuffixArray::new(&text).unwrap();
        assert_permutation(&csa);
        for pair in csa.as_slice().windows(2) {
            assert_eq!(
                compare_rotations(&text, pair[0], pair[1], 0),
                Ordering::Less
            );
        }
    }

    #[test]
    fn test_long_repetitive_text_does_not_overflow() {
        let text = vec![b'A'; 4000];
        let csa = CircularSuffixArray::new(&text).unwrap();
        assert_eq!(csa.into_vec(), (0..4000).collect::<Vec<_>>());

        let text = b"ab".repeat(2000);
        let csa = CircularSuffixArray::new(&text).unwrap();
        assert_permutation(&csa);
        assert_eq!(csa.index(0).unwrap(), 0);
        assert_eq!(csa.index(1).unwrap(), 2);
        assert_eq!(csa.index(2000).unwrap(), 1);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        for (len, sigma) in [(0, 4), (1, 4), (100, 2), (3000, 4), (3000, 256)] {
            let text = make_text(len, sigma, 99);
            let sequential = CircularSuffixArray::new(&text).unwrap();
            let parallel = CircularSuffixArray::new_parallel(&text).unwrap();
            assert_eq!(sequential, parallel, "len={} sigma={}", len, sigma);
        }

        let text = vec![7u8; 500];
        assert_eq!(
            CircularSuffixArray::new(&text).unwrap(),
            CircularSuffixArray::new_parallel(&text).unwrap()
        );
    }
}
