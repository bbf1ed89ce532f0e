/// Bit-level writer for Huffman payloads
///
/// Writes bits MSB-first: the first bit written lands in the high bit
/// of the first output byte.
pub struct BitWriter {
    /// Accumulated output bytes
    output: Vec<u8>,
    /// Current byte being built
    current_byte: u8,
    /// Bits written to current byte (0-7)
    bits_in_byte: u8,
    /// Total bits written, excluding flush padding
    bits_written: u64,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            current_byte: 0,
            bits_in_byte: 0,
            bits_written: 0,
        }
    }

    /// Write a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.current_byte = (self.current_byte << 1) | bit as u8;
        self.bits_in_byte += 1;
        self.bits_written += 1;

        if self.bits_in_byte == 8 {
            self.output.push(self.current_byte);
            self.current_byte = 0;
            self.bits_in_byte = 0;
        }
    }

    /// Write the low `n` bits (0-64) of `value`, most significant first
    pub fn write_bits(&mut self, value: u64, n: u8) {
        debug_assert!(n <= 64);

        for shift in (0..n).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
    }

    /// Pad the partial trailing byte with zero bits and emit it
    ///
    /// Padding is not counted in `bits_written`.
    pub fn flush(&mut self) {
        if self.bits_in_byte > 0 {
            self.output.push(self.current_byte << (8 - self.bits_in_byte));
            self.current_byte = 0;
            self.bits_in_byte = 0;
        }
    }

    /// Write a raw byte (must be byte-aligned)
    pub fn write_byte(&mut self, byte: u8) {
        if self.bits_in_byte == 0 {
            self.output.push(byte);
            self.bits_written += 8;
        } else {
            // Not aligned, write through bits
            self.write_bits(byte as u64, 8);
        }
    }

    /// Write a 32-bit value in little-endian
    pub fn write_u32_le(&mut self, value: u32) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Write a 64-bit value in little-endian
    pub fn write_u64_le(&mut self, value: u64) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Write raw bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }

    /// Flush and return the output bytes
    pub fn finish(mut self) -> Vec<u8> {
        self.flush();
        self.output
    }

    /// Total bits written so far, excluding padding
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Get current output length in bytes (including partial byte)
    pub fn len(&self) -> usize {
        self.output.len() + if self.bits_in_byte > 0 { 1 } else { 0 }
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.output.is_empty() && self.bits_in_byte == 0
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}
