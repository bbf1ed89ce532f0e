use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Input errors
    #[error("Empty input: no symbols to build a code table from")]
    EmptyInput,

    #[error("Input too large: {size} bytes exceeds maximum {max}")]
    InputTooLarge { size: u64, max: u64 },

    // Stream errors
    #[error("Truncated stream: needed {needed} more bytes, {available} available")]
    TruncatedStream { needed: u64, available: u64 },

    #[error("Corrupt Huffman tree: {0}")]
    CorruptTree(String),

    #[error("Back-reference offset {offset} exceeds available window {available}")]
    InvalidOffset { offset: u16, available: usize },

    #[error("Unknown format marker: 0x{0:02x}")]
    UnknownFormatMarker(u8),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
