use crate::error::{Error, Result};

/// Bounded circular history for LZ77 decoding
///
/// Holds the most recent `capacity` bytes; older bytes are overwritten first.
pub struct SlidingWindow {
    buffer: Vec<u8>,
    /// Next write position (0..capacity)
    write_pos: usize,
    /// Total bytes ever written
    total_written: u64,
}

impl SlidingWindow {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self { buffer: vec![0u8; capacity], write_pos: 0, total_written: 0 }
    }

    /// Add a single byte to the window
    #[inline]
    pub fn push_byte(&mut self, byte: u8) {
        self.buffer[self.write_pos] = byte;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        self.total_written += 1;
    }

    /// Add multiple bytes to the window
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push_byte(b);
        }
    }

    /// Copy `length` bytes from `distance` bytes back onto the end of `out`.
    ///
    /// Note: distance=1 means the most recently written byte. Length can
    /// exceed distance, in which case the copy repeats bytes it has just
    /// appended to `out`.
    pub fn copy_to_vec(&self, distance: u16, length: u16, out: &mut Vec<u8>) -> Result<()> {
        let available = self.available();
        if distance == 0 || distance as usize > available {
            return Err(Error::InvalidOffset { offset: distance, available });
        }

        let capacity = self.buffer.len();
        let dist = distance as usize;
        let start_len = out.len();
        let mut read_pos = (self.write_pos + capacity - dist) % capacity;

        out.reserve(length as usize);
        for i in 0..length as usize {
            if i < dist {
                out.push(self.buffer[read_pos]);
                read_pos = (read_pos + 1) % capacity;
            } else {
                // Overlapping copy: repeat what this call already produced
                let byte = out[start_len + i - dist];
                out.push(byte);
            }
        }
        Ok(())
    }

    /// Get available window size
    pub fn available(&self) -> usize {
        self.total_written.min(self.buffer.len() as u64) as usize
    }
}
