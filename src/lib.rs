pub mod bench;
pub mod bits;
pub mod error;
pub mod huffman;
pub mod lz77;
pub mod rle;

pub use bench::{
    benchmark_all, benchmark_file, benchmark_files, render_report, run_benchmark, BenchConfig,
    BenchResult, BenchSummary, FileReport,
};
pub use error::{Error, Result};
pub use huffman::HuffmanCodec;
pub use lz77::{Lz77Codec, Lz77Config};
pub use rle::RleCodec;

use std::fmt;

/// Uniform contract shared by every codec
///
/// Each call owns its own state; a codec value may be shared between
/// threads and called concurrently.
pub trait Codec: Send + Sync {
    /// Display name used in reports
    fn name(&self) -> &'static str;

    /// Compress the whole of `input` into a self-describing artifact
    fn encode(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Reconstruct the original bytes from an artifact
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Codec selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Algorithm {
    Huffman,
    Lz77,
    Rle,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Huffman, Algorithm::Lz77, Algorithm::Rle];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Huffman => "Huffman",
            Self::Lz77 => "LZ77",
            Self::Rle => "RLE",
        }
    }

    /// Conventional file extension for artifacts of this codec
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Huffman => ".huff",
            Self::Lz77 => ".lz77",
            Self::Rle => ".rle",
        }
    }

    /// Codec with default parameters
    pub fn codec(&self) -> Box<dyn Codec> {
        match self {
            Self::Huffman => Box::new(HuffmanCodec::new()),
            Self::Lz77 => Box::new(Lz77Codec::new()),
            Self::Rle => Box::new(RleCodec::new()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compress `input` with the default parameters of `algorithm`
pub fn compress(algorithm: Algorithm, input: &[u8]) -> Result<Vec<u8>> {
    algorithm.codec().encode(input)
}

/// Decompress an artifact produced by [`compress`] with the same `algorithm`
pub fn decompress(algorithm: Algorithm, input: &[u8]) -> Result<Vec<u8>> {
    algorithm.codec().decode(input)
}

/// Sizes before and after compression
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompressionStats {
    pub original_size: u64,
    pub compressed_size: u64,
}

impl CompressionStats {
    pub fn new(original_size: usize, compressed_size: usize) -> Self {
        Self { original_size: original_size as u64, compressed_size: compressed_size as u64 }
    }

    /// Space saved as a percentage of the original; negative when the artifact grew
    pub fn ratio_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_size as f64 / self.original_size as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_metadata() {
        assert_eq!(Algorithm::Huffman.extension(), ".huff");
        assert_eq!(Algorithm::Lz77.extension(), ".lz77");
        assert_eq!(Algorithm::Rle.extension(), ".rle");
        assert_eq!(Algorithm::Lz77.to_string(), "LZ77");
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.codec().name(), algorithm.name());
        }
    }

    #[test]
    fn test_compress_roundtrip_all() {
        let input = b"to be or not to be, that is the question".repeat(4);
        for algorithm in Algorithm::ALL {
            let compressed = compress(algorithm, &input).unwrap();
            assert_eq!(decompress(algorithm, &compressed).unwrap(), input, "{}", algorithm);
        }
    }

    #[test]
    fn test_ratio_percent() {
        assert_eq!(CompressionStats::new(0, 16).ratio_percent(), 0.0);
        assert_eq!(CompressionStats::new(100, 25).ratio_percent(), 75.0);
        assert!(CompressionStats::new(10, 20).ratio_percent() < 0.0);
    }
}
