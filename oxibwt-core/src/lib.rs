//! # OxiBWT Core
//!
//! Core components shared by the OxiBWT crates.
//!
//! - [`error`]: the error taxonomy and `Result` alias
//! - [`traits`]: the [`ByteTransform`] trait implemented by every stage
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI: oxibwt bwt / mtf / pipeline / stats                │
//! ├─────────────────────────────────────────────────────────┤
//! │ Pipeline: Burrows-Wheeler -> Move-To-Front              │
//! ├─────────────────────────────────────────────────────────┤
//! │ Stages: CircularSuffixArray, BWT, MTF                   │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate): errors, ByteTransform, constants     │
//! └─────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod traits;

pub use error::{OxiBwtError, Result};
pub use traits::{ByteTransform, Direction};

/// Number of distinct symbols; the alphabet is every byte value.
pub const ALPHABET_SIZE: usize = 256;

/// Width in bytes of the big-endian primary index that prefixes a BWT block.
pub const PRIMARY_INDEX_BYTES: usize = 4;

/// Longest text a single block may hold, so its primary index fits in `u32`.
pub const MAX_BLOCK_LEN: usize = u32::MAX as usize;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{OxiBwtError, Result};
    pub use crate::traits::{ByteTransform, Direction};
    pub use crate::{ALPHABET_SIZE, MAX_BLOCK_LEN, PRIMARY_INDEX_BYTES};
}
