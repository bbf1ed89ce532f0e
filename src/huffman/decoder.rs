use log::debug;

use super::encoder::MAX_INPUT_LEN;
use super::tree::{FrequencyTable, HuffmanNode, HuffmanTree};
use crate::bits::BitReader;
use crate::error::{Error, Result};

/// Decode a Huffman artifact produced by [`super::encoder::encode`]
///
/// The frequency table is read back and fed through the same tree
/// construction the encoder used; the payload is then walked one bit at a
/// time from the root, emitting a byte at every leaf.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(data);

    let distinct = reader.read_u64_le()?;
    if distinct > 256 {
        return Err(Error::CorruptTree(format!("{} distinct symbols declared", distinct)));
    }

    let mut freq = FrequencyTable::new();
    let mut previous: Option<u8> = None;
    for _ in 0..distinct {
        let symbol = reader.read_byte()?;
        let count = reader.read_u32_le()?;

        if count == 0 {
            return Err(Error::CorruptTree(format!("zero frequency for byte 0x{:02x}", symbol)));
        }
        if previous.is_some_and(|p| symbol <= p) {
            return Err(Error::CorruptTree(format!(
                "frequency table out of order at byte 0x{:02x}",
                symbol
            )));
        }
        previous = Some(symbol);
        freq.add(symbol, count as u64);
    }

    let total_bits = reader.read_u64_le()?;

    if freq.is_empty() {
        if total_bits != 0 {
            return Err(Error::CorruptTree(format!(
                "{} payload bits declared with an empty table",
                total_bits
            )));
        }
        return Ok(Vec::new());
    }

    let tree = HuffmanTree::from_frequencies(&freq)?;
    let expected_bits = tree
        .payload_bits()
        .ok_or_else(|| Error::CorruptTree("payload bit count overflow".to_string()))?;
    if total_bits != expected_bits {
        return Err(Error::CorruptTree(format!(
            "{} payload bits declared, table implies {}",
            total_bits, expected_bits
        )));
    }

    // Bound the declared output before allocating for it
    let declared = freq.total();
    if declared > MAX_INPUT_LEN {
        return Err(Error::InputTooLarge { size: declared, max: MAX_INPUT_LEN });
    }
    let output_len = declared as usize;

    // A lone leaf has the empty code: the count alone says how many bytes to emit
    if let HuffmanNode::Leaf { symbol, .. } = *tree.node(tree.root()) {
        debug!("huffman: single symbol 0x{:02x} x {}", symbol, output_len);
        let mut output = Vec::new();
        output
            .try_reserve_exact(output_len)
            .map_err(|_| Error::InputTooLarge { size: declared, max: MAX_INPUT_LEN })?;
        output.resize(output_len, symbol);
        return Ok(output);
    }

    let payload_bytes = (total_bits + 7) / 8;
    let available = data.len() as u64 - reader.bytes_read();
    if available < payload_bytes {
        return Err(Error::TruncatedStream { needed: payload_bytes, available });
    }

    let root = tree.root();
    let mut node = root;
    let mut output = Vec::with_capacity(output_len);

    for _ in 0..total_bits {
        let bit = reader.read_bit()?;
        node = tree
            .child(node, bit)
            .ok_or_else(|| Error::CorruptTree("bit path leads off the tree".to_string()))?;

        if let HuffmanNode::Leaf { symbol, .. } = *tree.node(node) {
            if output.len() == output_len {
                return Err(Error::CorruptTree("payload decodes past declared length".to_string()));
            }
            output.push(symbol);
            node = root;
        }
    }

    if node != root {
        return Err(Error::CorruptTree("payload ends inside a code".to_string()));
    }
    if output.len() != output_len {
        return Err(Error::TruncatedStream {
            needed: (output_len - output.len()) as u64,
            available: 0,
        });
    }

    debug!("huffman: {} bytes -> {} bytes", data.len(), output.len());
    Ok(output)
}
