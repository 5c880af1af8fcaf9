//! Chaining of reversible stages.
//!
//! The standard pipeline is the classic block-sorting front end: the
//! Burrows-Wheeler Transform followed by Move-to-Front. Its output is a rank
//! stream ready for an entropy coder.

use crate::bwt::BurrowsWheeler;
use crate::mtf::MoveToFront;
use log::debug;
use oxibwt_core::ByteTransform;
use oxibwt_core::error::Result;

/// An ordered list of stages, run forward in order and inverted in reverse.
pub struct Pipeline {
    stages: Vec<Box<dyn ByteTransform + Send + Sync>>,
}

impl Pipeline {
    /// A pipeline with no stages; both directions return the input unchanged.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Burrows-Wheeler followed by Move-to-Front.
    pub fn standard() -> Self {
        Self::new().then(BurrowsWheeler).then(MoveToFront)
    }

    /// Append a stage.
    pub fn then<T>(mut self, stage: T) -> Self
    where
        T: ByteTransform + Send + Sync + 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    /// Names of the stages in forward order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl ByteTransform for Pipeline {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn forward(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut data = input.to_vec();
        for stage in &self.stages {
            data = stage.forward(&data)?;
            debug!("{}: forward produced {} bytes", stage.name(), data.len());
        }
        Ok(data)
    }

    fn inverse(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut data = input.to_vec();
        for stage in self.stages.iter().rev() {
            data = stage.inverse(&data)?;
            debug!("{}: inverse produced {} bytes", stage.name(), data.len());
        }
        Ok(data)
    }
}

/// Run the standard pipeline forward.
pub fn forward(data: &[u8]) -> Result<Vec<u8>> {
    Pipeline::standard().forward(data)
}

/// Invert the standard pipeline.
pub fn inverse(data: &[u8]) -> Result<Vec<u8>> {
    Pipeline::standard().inverse(data)
}
