use crate::error::{Error, Result};

/// Serialized size of one token: `[offset:2][length:2][next_literal:1]`
pub const TOKEN_SIZE: usize = 5;

/// One step of the LZ77 stream
///
/// `length == 0` is a pure literal and `offset` is ignored. Otherwise the
/// decoder copies `length` bytes starting `offset` bytes back (1 = the most
/// recent byte) and then appends `next_literal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lz77Token {
    pub offset: u16,
    pub length: u16,
    pub next_literal: u8,
}

impl Lz77Token {
    pub fn literal(byte: u8) -> Self {
        Self { offset: 0, length: 0, next_literal: byte }
    }

    pub fn reference(offset: u16, length: u16, next_literal: u8) -> Self {
        Self { offset, length, next_literal }
    }

    pub fn is_literal(&self) -> bool {
        self.length == 0
    }

    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        self.length as usize + 1
    }

    /// Append the little-endian record to `out`
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.offset.to_le_bytes());
        out.extend_from_slice(&self.length.to_le_bytes());
        out.push(self.next_literal);
    }

    /// Parse one record from the front of `bytes`
    pub fn read_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < TOKEN_SIZE {
            return Err(Error::TruncatedStream {
                needed: (TOKEN_SIZE - bytes.len()) as u64,
                available: 0,
            });
        }
        Ok(Self {
            offset: u16::from_le_bytes([bytes[0], bytes[1]]),
            length: u16::from_le_bytes([bytes[2], bytes[3]]),
            next_literal: bytes[4],
        })
    }
}
