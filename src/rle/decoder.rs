use log::debug;

use super::{RUN_COUNT_MASK, RUN_FLAG};
use crate::error::{Error, Result};

/// Decode a span sequence produced by [`super::encoder::encode`]
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(data.len() * 2);
    let mut pos = 0;

    while pos < data.len() {
        let control = data[pos];
        pos += 1;
        let remaining = data.len() - pos;

        if control & RUN_FLAG != 0 {
            let count = (control & RUN_COUNT_MASK) as usize;
            let value = *data
                .get(pos)
                .ok_or(Error::TruncatedStream { needed: 1, available: 0 })?;
            output.resize(output.len() + count, value);
            pos += 1;
        } else {
            let count = control as usize + 1;
            if remaining < count {
                return Err(Error::TruncatedStream {
                    needed: count as u64,
                    available: remaining as u64,
                });
            }
            output.extend_from_slice(&data[pos..pos + count]);
            pos += count;
        }
    }

    debug!("rle: {} bytes -> {} bytes", data.len(), output.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rle::encoder::encode;

    #[test]
    fn test_decode_run() {
        assert_eq!(decode(&[0x8A, b'a']).unwrap(), b"aaaaaaaaaa".to_vec());
    }

    #[test]
    fn test_decode_raw() {
        assert_eq!(decode(&[0x02, b'x', b'y', b'z']).unwrap(), b"xyz".to_vec());
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_roundtrip_mixed() {
        let input = b"WWWWWWWWWWWWBWWWWWWWWWWWWBBBWWWWWWWWWWWWWWWWWWWWWWWWBWWWWWWWWWWWWWW";
        assert_eq!(decode(&encode(input)).unwrap(), input.to_vec());
    }

    #[test]
    fn test_truncated_run() {
        assert!(matches!(
            decode(&[0x85]),
            Err(Error::TruncatedStream { needed: 1, available: 0 })
        ));
    }

    #[test]
    fn test_truncated_raw() {
        assert!(matches!(
            decode(&[0x04, 1, 2]),
            Err(Error::TruncatedStream { needed: 5, available: 2 })
        ));
    }
}
