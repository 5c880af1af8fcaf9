//! Command implementations for OxiBWT CLI.

pub mod stats;
pub mod transform;

pub use stats::cmd_stats;
pub use transform::{Stage, cmd_transform};
