use log::{debug, trace};

use super::tree::{FrequencyTable, HuffmanTree};
use crate::bits::BitWriter;
use crate::error::{Error, Result};

/// Size of the distinct-symbol count field
pub const DISTINCT_COUNT_SIZE: usize = 8;

/// Size of one `(byte, frequency)` table entry
pub const TABLE_ENTRY_SIZE: usize = 5;

/// Size of the payload bit-count field
pub const TOTAL_BITS_SIZE: usize = 8;

/// Largest per-symbol frequency the table can carry
pub const MAX_FREQUENCY: u64 = u32::MAX as u64;

/// Largest input the codec accepts, and so the largest output a decoder will produce
pub const MAX_INPUT_LEN: u64 = 1 << 30;

/// Encode `input` as a Huffman artifact
///
/// Layout (little-endian): `[distinct:8][(byte:1, freq:4) x distinct][total_bits:8][payload]`.
/// The table is written in ascending byte order, which is also the order the
/// tree builder consumes it in, so the decoder rebuilds the identical tree.
/// Empty input produces a table with no entries and a zero-bit payload.
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    if input.len() as u64 > MAX_INPUT_LEN {
        return Err(Error::InputTooLarge { size: input.len() as u64, max: MAX_INPUT_LEN });
    }

    let freq = FrequencyTable::from_bytes(input);

    if freq.iter().any(|(_, count)| count > MAX_FREQUENCY) {
        return Err(Error::InputTooLarge { size: input.len() as u64, max: MAX_FREQUENCY });
    }

    let header_size = DISTINCT_COUNT_SIZE + freq.distinct() * TABLE_ENTRY_SIZE + TOTAL_BITS_SIZE;
    let mut writer = BitWriter::with_capacity(header_size + input.len());

    writer.write_u64_le(freq.distinct() as u64);
    for (symbol, count) in freq.iter() {
        writer.write_byte(symbol);
        writer.write_u32_le(count as u32);
    }

    if freq.is_empty() {
        writer.write_u64_le(0);
        debug!("huffman: empty input, {} byte artifact", header_size);
        return Ok(writer.finish());
    }

    let tree = HuffmanTree::from_frequencies(&freq)?;
    let codes = tree.code_table()?;
    let total_bits = tree
        .payload_bits()
        .ok_or_else(|| Error::Internal("payload bit count overflow".to_string()))?;

    trace!("huffman tree:\n{}", tree);
    writer.write_u64_le(total_bits);

    // Single distinct byte: the code is empty and the payload carries no bits
    let start = writer.bits_written();
    for &byte in input {
        let code = codes
            .get(byte)
            .ok_or_else(|| Error::Internal(format!("no code for byte 0x{:02x}", byte)))?;
        writer.write_bits(code.bits, code.len);
    }
    debug_assert_eq!(writer.bits_written() - start, total_bits);

    let output = writer.finish();
    debug!(
        "huffman: {} bytes -> {} bytes ({} symbols, {} payload bits)",
        input.len(),
        output.len(),
        freq.distinct(),
        total_bits
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty() {
        let data = encode(b"").unwrap();
        assert_eq!(data.len(), DISTINCT_COUNT_SIZE + TOTAL_BITS_SIZE);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_single_symbol_has_no_payload() {
        let data = encode(&[b'z'; 1000]).unwrap();
        assert_eq!(data.len(), DISTINCT_COUNT_SIZE + TABLE_ENTRY_SIZE + TOTAL_BITS_SIZE);
        assert_eq!(u64::from_le_bytes(data[0..8].try_into().unwrap()), 1);
        assert_eq!(data[8], b'z');
        assert_eq!(u32::from_le_bytes(data[9..13].try_into().unwrap()), 1000);
        assert_eq!(u64::from_le_bytes(data[13..21].try_into().unwrap()), 0);
    }

    #[test]
    fn test_encode_layout() {
        let data = encode(b"abracadabra").unwrap();
        let table_end = DISTINCT_COUNT_SIZE + 5 * TABLE_ENTRY_SIZE;

        assert_eq!(u64::from_le_bytes(data[0..8].try_into().unwrap()), 5);
        // Entries are in ascending byte order
        let symbols: Vec<u8> =
            (0..5).map(|i| data[DISTINCT_COUNT_SIZE + i * TABLE_ENTRY_SIZE]).collect();
        assert_eq!(symbols, b"abcdr".to_vec());

        let total_bits =
            u64::from_le_bytes(data[table_end..table_end + TOTAL_BITS_SIZE].try_into().unwrap());
        assert_eq!(total_bits, 23);
        // 23 bits -> 3 payload bytes
        assert_eq!(data.len(), table_end + TOTAL_BITS_SIZE + 3);
    }

    #[test]
    fn test_encode_payload_bits() {
        // a=0 c=100 d=101 b=110 r=111
        let data = encode(b"abracadabra").unwrap();
        let payload = &data[data.len() - 3..];
        // a b r a c a d a b r a
        // 0 110 111 0 100 0 101 0 110 111 0 -> 01101110 10001010 1101110(0)
        assert_eq!(payload, &[0b0110_1110, 0b1000_1010, 0b1101_1100]);
    }

    #[test]
    fn test_skewed_input_compresses() {
        let mut input = vec![b'a'; 10_000];
        input.extend_from_slice(b"bcdefg");
        let data = encode(&input).unwrap();
        assert!(data.len() < input.len() / 4);
    }
}
