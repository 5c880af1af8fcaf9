//! Filter commands: run one stage, or the whole pipeline, over a byte stream.

use crate::utils::{describe, open_output, read_input};
use log::info;
use oxibwt::{BurrowsWheeler, MoveToFront, Pipeline};
use oxibwt_core::{ByteTransform, Direction};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Which transform a filter command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Burrows-Wheeler Transform only.
    Bwt,
    /// Move-to-Front only.
    Mtf,
    /// Burrows-Wheeler followed by Move-to-Front.
    Pipeline,
}

impl Stage {
    fn transform(&self) -> Box<dyn ByteTransform> {
        match self {
            Self::Bwt => Box::new(BurrowsWheeler),
            Self::Mtf => Box::new(MoveToFront),
            Self::Pipeline => Box::new(Pipeline::standard()),
        }
    }
}

pub fn cmd_transform(
    stage: Stage,
    direction: Direction,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let transform = stage.transform();
    let data = read_input(input)?;

    info!(
        "{} {}: {} -> {}",
        transform.name(),
        direction.symbol(),
        describe(input, "stdin"),
        describe(output, "stdout")
    );

    let start = Instant::now();
    let result = transform.apply(direction, &data)?;

    // The output is only created once the whole block has transformed.
    let mut writer = open_output(output)?;
    writer.write_all(&result)?;
    writer.flush()?;

    info!(
        "{} {}: {} -> {} bytes in {:.2?}",
        transform.name(),
        direction.symbol(),
        data.len(),
        result.len(),
        start.elapsed()
    );

    Ok(())
}
