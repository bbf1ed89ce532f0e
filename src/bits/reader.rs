use crate::error::{Error, Result};
use std::io::Read;

/// Bit-level reader for Huffman payloads
///
/// Bytes are pulled from the underlying reader on demand and handed out
/// one bit at a time, MSB-first.
pub struct BitReader<R: Read> {
    reader: R,
    /// Current byte being consumed
    current_byte: u8,
    /// Bits left in current byte (0-8)
    bits_left: u8,
    /// Total bytes read (for error reporting)
    bytes_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, current_byte: 0, bits_left: 0, bytes_read: 0 }
    }

    /// Pull the next byte from the source, `None` at end of input
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.bytes_read += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    /// Next bit, or `None` once the source is exhausted
    pub fn next_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_left == 0 {
            match self.next_byte()? {
                Some(byte) => {
                    self.current_byte = byte;
                    self.bits_left = 8;
                }
                None => return Ok(None),
            }
        }

        self.bits_left -= 1;
        Ok(Some((self.current_byte >> self.bits_left) & 1 == 1))
    }

    /// Read a single bit, failing with `TruncatedStream` at end of input
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        self.next_bit()?.ok_or(Error::TruncatedStream { needed: 1, available: 0 })
    }

    /// Read `n` bits (0-64), most significant first
    pub fn read_bits(&mut self, n: u8) -> Result<u64> {
        debug_assert!(n <= 64);

        let mut value = 0u64;
        for _ in 0..n {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Ok(value)
    }

    /// Discard remaining bits in current byte, align to next byte boundary
    pub fn align_to_byte(&mut self) {
        self.bits_left = 0;
    }

    /// Read exactly `buf.len()` bytes (aligns to byte boundary first)
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.align_to_byte();
        let len = buf.len();
        for (filled, b) in buf.iter_mut().enumerate() {
            *b = self.next_byte()?.ok_or(Error::TruncatedStream {
                needed: (len - filled) as u64,
                available: 0,
            })?;
        }
        Ok(())
    }

    /// Read a complete byte (aligns to byte boundary first)
    pub fn read_byte(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_bytes(&mut buf)?;
        Ok(buf[0])
    }

    /// Read a 32-bit little-endian value (aligns to byte boundary first)
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_bytes(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Read a 64-bit little-endian value (aligns to byte boundary first)
    pub fn read_u64_le(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_bytes(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    /// Get position in bytes (for error reporting)
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}
