pub mod decoder;
pub mod encoder;
pub mod tokens;
pub mod window;

pub use decoder::decode;
pub use encoder::{encode, tokenize};
pub use tokens::{Lz77Token, TOKEN_SIZE};
pub use window::SlidingWindow;

use crate::error::{Error, Result};
use crate::Codec;

/// Artifact holds the input verbatim
pub const MARKER_STORED: u8 = b'U';

/// Artifact holds a token stream
pub const MARKER_TOKENS: u8 = b'C';

/// LZ77 parameters
///
/// Encoder and decoder must agree on `window_size` (the decoder's may be larger).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lz77Config {
    /// History size searched for matches (1-65535)
    pub window_size: usize,
    /// Shortest match worth a back-reference
    pub min_match_len: usize,
    /// Longest match a single token may copy (up to 65535)
    pub max_match_len: usize,
    /// Inputs shorter than this are stored instead of tokenized
    pub stored_threshold: usize,
}

impl Lz77Config {
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 || self.window_size > u16::MAX as usize {
            return Err(Error::InvalidConfig(format!(
                "window size {} outside 1..={}",
                self.window_size,
                u16::MAX
            )));
        }
        if self.min_match_len == 0 {
            return Err(Error::InvalidConfig("minimum match length must be at least 1".into()));
        }
        if self.min_match_len > self.max_match_len {
            return Err(Error::InvalidConfig(format!(
                "minimum match length {} exceeds maximum {}",
                self.min_match_len, self.max_match_len
            )));
        }
        if self.max_match_len > u16::MAX as usize {
            return Err(Error::InvalidConfig(format!(
                "maximum match length {} exceeds {}",
                self.max_match_len,
                u16::MAX
            )));
        }
        Ok(())
    }
}

impl Default for Lz77Config {
    fn default() -> Self {
        Self {
            window_size: Lz77Codec::WINDOW_SIZE,
            min_match_len: Lz77Codec::MIN_MATCH_LEN,
            max_match_len: Lz77Codec::MAX_MATCH_LEN,
            stored_threshold: Lz77Codec::STORED_THRESHOLD,
        }
    }
}

/// Sliding-window codec emitting `(offset, length, next_literal)` tokens
#[derive(Clone, Debug, Default)]
pub struct Lz77Codec {
    config: Lz77Config,
}

impl Lz77Codec {
    pub const WINDOW_SIZE: usize = 4096;
    pub const MIN_MATCH_LEN: usize = 3;
    pub const MAX_MATCH_LEN: usize = 18;
    pub const STORED_THRESHOLD: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Lz77Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Lz77Config {
        &self.config
    }
}

impl Codec for Lz77Codec {
    fn name(&self) -> &'static str {
        "LZ77"
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        encode(input, &self.config)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        decode(input, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Lz77Config::default();
        assert_eq!(config.window_size, 4096);
        assert_eq!(config.min_match_len, 3);
        assert_eq!(config.max_match_len, 18);
        assert_eq!(config.stored_threshold, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let bad = [
            Lz77Config { window_size: 0, ..Default::default() },
            Lz77Config { window_size: 70_000, ..Default::default() },
            Lz77Config { min_match_len: 0, ..Default::default() },
            Lz77Config { min_match_len: 20, ..Default::default() },
            Lz77Config { max_match_len: 70_000, ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(Lz77Codec::with_config(config), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_independent_instances() {
        let small = Lz77Codec::with_config(Lz77Config {
            window_size: 8,
            max_match_len: 4,
            stored_threshold: 0,
            ..Default::default()
        })
        .unwrap();
        let default = Lz77Codec::new();

        let input = b"abcdefgh".repeat(40);
        let small_out = small.encode(&input).unwrap();
        let default_out = default.encode(&input).unwrap();

        assert_ne!(small_out, default_out);
        assert_eq!(small.decode(&small_out).unwrap(), input);
        assert_eq!(default.decode(&default_out).unwrap(), input);
    }
}
