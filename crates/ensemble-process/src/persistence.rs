//! Byte codecs for process samples

use crate::sample::{ProcessSample, ProcessSampleRepr};
use ensemble_core::Result;
use tracing::debug;

/// Encodes a sample to bytes and back
///
/// Decoding must re-establish the sample invariants rather than trust the
/// payload.
pub trait SampleCodec {
    fn encode(&self, sample: &ProcessSample) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<ProcessSample>;
}

/// JSON codec backed by serde_json
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl SampleCodec for JsonCodec {
    fn encode(&self, sample: &ProcessSample) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(sample)?
        } else {
            serde_json::to_vec(sample)?
        };
        debug!(size = sample.size(), bytes = bytes.len(), "encoded process sample");
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<ProcessSample> {
        // parse first, then rebuild through the validating path
        let repr: ProcessSampleRepr = serde_json::from_slice(bytes)?;
        let sample = ProcessSample::try_from(repr)?;
        debug!(size = sample.size(), "decoded process sample");
        Ok(sample)
    }
}
