pub mod decoder;
pub mod encoder;

pub use decoder::decode;
pub use encoder::{encode, spans, RleSpan};

use crate::error::Result;
use crate::Codec;

/// High bit of a control byte marks a run
pub const RUN_FLAG: u8 = 0x80;

/// Low seven bits of a run control byte hold the count
pub const RUN_COUNT_MASK: u8 = 0x7F;

/// Longest run a single span encodes
pub const MAX_RUN_LEN: usize = 127;

/// Longest raw span a single control byte covers
pub const MAX_RAW_LEN: usize = 128;

/// Run-length codec with one control byte per span
#[derive(Clone, Copy, Debug, Default)]
pub struct RleCodec;

impl RleCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for RleCodec {
    fn name(&self) -> &'static str {
        "RLE"
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(encode(input))
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        decode(input)
    }
}
