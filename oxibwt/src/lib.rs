//! Block-sorting preprocessing for OxiBWT.
//!
//! This crate provides the reversible front end of a block-sorting compressor:
//! 1. Circular suffix sorting - orders every rotation of a block
//! 2. Burrows-Wheeler Transform (BWT) - keeps the last column of that order
//! 3. Move-to-Front Transform (MTF) - turns clustered bytes into small ranks
//!
//! The MTF rank stream is meant to be consumed by an external entropy coder.
//!
//! ```rust
//! use oxibwt::{bwt, mtf};
//!
//! let block = bwt::transform(b"ABRACADABRA!").unwrap();
//! assert_eq!(block.primary_index, 3);
//! assert_eq!(block.last_column, b"ARD!RCAAAABB");
//!
//! let ranks = mtf::encode(&block.to_bytes());
//! let restored = oxibwt::inverse(&ranks).unwrap();
//! assert_eq!(restored, b"ABRACADABRA!");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Burrows-Wheeler Transform implementation.
pub mod bwt;
/// Move-to-Front Transform implementation.
pub mod mtf;
/// Stage chaining.
pub mod pipeline;
/// Block diagnostics.
pub mod stats;
/// Circular suffix array construction.
pub mod suffix;

pub use bwt::{BurrowsWheeler, BwtBlock, inverse_transform, transform};
pub use mtf::{MoveToFront, MtfTable};
pub use oxibwt_core::{ByteTransform, Direction, OxiBwtError, Result};
pub use pipeline::{Pipeline, forward, inverse};
pub use stats::BlockStats;
pub use suffix::CircularSuffixArray;

#[cfg(feature = "parallel")]
pub use bwt::transform_parallel;
