#![no_main]

use libfuzzer_sys::fuzz_target;
use minipress::{compress, decompress, Algorithm};

fuzz_target!(|data: &[u8]| {
    for algorithm in Algorithm::ALL {
        let compressed = compress(algorithm, data).expect("encode failed");
        let decompressed = decompress(algorithm, &compressed).expect("decode failed");
        assert_eq!(decompressed, data, "{} round trip mismatch", algorithm);
    }
});
