pub mod decoder;
pub mod encoder;
pub mod tree;

pub use decoder::decode;
pub use encoder::encode;
pub use tree::{Code, CodeTable, FrequencyTable, HuffmanNode, HuffmanTree};

use crate::error::Result;
use crate::Codec;

/// Static Huffman codec carrying its frequency table in the artifact
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for HuffmanCodec {
    fn name(&self) -> &'static str {
        "Huffman"
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        encode(input)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        decode(input)
    }
}
