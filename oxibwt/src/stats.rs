//! Block diagnostics.
//!
//! Measures how well the pipeline prepares a block for an entropy coder: how
//! many runs the BWT leaves, how many MTF ranks are zero, and the order-0
//! entropy before and after.

use crate::{bwt, mtf};
use oxibwt_core::ALPHABET_SIZE;
use oxibwt_core::error::Result;

/// Summary of one block run through BWT and MTF.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStats {
    /// Input length in bytes.
    pub len: usize,
    /// Distinct byte values in the input.
    pub distinct_symbols: usize,
    /// Maximal runs of equal bytes in the input.
    pub input_runs: usize,
    /// Maximal runs of equal bytes in the BWT last column.
    pub bwt_runs: usize,
    /// Primary index of the BWT block.
    pub primary_index: u32,
    /// MTF ranks equal to zero.
    pub zero_ranks: usize,
    /// Order-0 entropy of the input, in bits per byte.
    pub input_entropy: f64,
    /// Order-0 entropy of the MTF ranks, in bits per byte.
    pub mtf_entropy: f64,
}

impl BlockStats {
    /// Transform `data` and collect statistics.
    pub fn analyze(data: &[u8]) -> Result<Self> {
        let block = bwt::transform(data)?;
        let ranks = mtf::encode(&block.last_column);

        Ok(Self {
            len: data.len(),
            distinct_symbols: histogram(data).iter().filter(|&&count| count > 0).count(),
            input_runs: count_runs(data),
            bwt_runs: count_runs(&block.last_column),
            primary_index: block.primary_index,
            zero_ranks: ranks.iter().filter(|&&rank| rank == 0).count(),
            input_entropy: entropy(data),
            mtf_entropy: entropy(&ranks),
        })
    }

    /// Fraction of MTF ranks that are zero, in `[0, 1]`.
    pub fn zero_rank_ratio(&self) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            self.zero_ranks as f64 / self.len as f64
        }
    }

    /// Lower bound on entropy-coded size of the rank stream, in bytes.
    pub fn estimated_coded_len(&self) -> usize {
        (self.mtf_entropy * self.len as f64 / 8.0).ceil() as usize
    }
}

/// Number of maximal runs of equal bytes.
pub fn count_runs(data: &[u8]) -> usize {
    if data.is_empty() {
        return 0;
    }
    1 + data.windows(2).filter(|pair| pair[0] != pair[1]).count()
}

/// Order-0 Shannon entropy in bits per byte.
pub fn entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let total = data.len() as f64;
    histogram(data)
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

fn histogram(data: &[u8]) -> [usize; ALPHABET_SIZE] {
    let mut counts = [0usize; ALPHABET_SIZE];
    for &byte in data {
        counts[byte as usize] += 1;
    }
    counts
}
