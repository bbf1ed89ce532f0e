//! Property tests over arbitrary byte inputs.

use proptest::collection::vec;
use proptest::prelude::*;

use minipress::huffman::{FrequencyTable, HuffmanTree};
use minipress::lz77::{self, MARKER_STORED};
use minipress::rle::{self, RleSpan};
use minipress::{compress, decompress, Algorithm, Lz77Codec, Lz77Config};

/// Bytes drawn from a small alphabet, so runs and repeats are common
fn low_entropy_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), Just(0u8)], 0..max_len)
}

proptest! {
    #[test]
    fn prop_roundtrip_arbitrary(data in vec(any::<u8>(), 0..2048)) {
        for algorithm in Algorithm::ALL {
            let compressed = compress(algorithm, &data).unwrap();
            prop_assert_eq!(decompress(algorithm, &compressed).unwrap(), data.clone());
        }
    }

    #[test]
    fn prop_roundtrip_low_entropy(data in low_entropy_bytes(4096)) {
        for algorithm in Algorithm::ALL {
            let compressed = compress(algorithm, &data).unwrap();
            prop_assert_eq!(decompress(algorithm, &compressed).unwrap(), data.clone());
        }
    }

    #[test]
    fn prop_lz77_roundtrip_any_config(
        data in low_entropy_bytes(2048),
        window_size in 1usize..512,
        min_match_len in 1usize..6,
        extra in 0usize..300,
    ) {
        let config = Lz77Config {
            window_size,
            min_match_len,
            max_match_len: min_match_len + extra,
            stored_threshold: 0,
        };
        let codec = Lz77Codec::with_config(config.clone()).unwrap();
        let encoded = lz77::encode(&data, codec.config()).unwrap();
        prop_assert_eq!(lz77::decode(&encoded, &config).unwrap(), data);
    }

    #[test]
    fn prop_lz77_short_inputs_stored(data in vec(any::<u8>(), 0..64)) {
        let encoded = lz77::encode(&data, &Lz77Config::default()).unwrap();
        prop_assert_eq!(encoded[0], MARKER_STORED);
        prop_assert_eq!(&encoded[1..], &data[..]);
    }

    #[test]
    fn prop_huffman_codes_prefix_free(data in vec(any::<u8>(), 1..1024)) {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&data)).unwrap();
        let codes: Vec<_> = tree.code_table().unwrap().iter().map(|(_, code)| code).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                prop_assert!(!a.is_prefix_of(b) && !b.is_prefix_of(a));
            }
        }
    }

    #[test]
    fn prop_rle_span_limits(data in low_entropy_bytes(2048)) {
        let spans = rle::spans(&data);
        let mut covered = 0;
        for span in &spans {
            match span {
                RleSpan::Run { count, .. } => {
                    prop_assert!((2..=127).contains(count));
                }
                RleSpan::Raw(bytes) => {
                    prop_assert!((1..=128).contains(&bytes.len()));
                }
            }
            covered += span.len();
        }
        prop_assert_eq!(covered, data.len());
        prop_assert_eq!(rle::decode(&rle::encode(&data)).unwrap(), data);
    }

    #[test]
    fn prop_decoders_reject_garbage_without_panicking(data in vec(any::<u8>(), 0..256)) {
        for algorithm in Algorithm::ALL {
            let _ = decompress(algorithm, &data);
        }
    }
}
