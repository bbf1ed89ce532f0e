#![no_main]

use libfuzzer_sys::fuzz_target;
use minipress::{decompress, Algorithm};

fuzz_target!(|data: &[u8]| {
    // First byte picks the codec, the rest is an untrusted artifact.
    // Decoding may fail; we're looking for panics, not errors
    let Some((&selector, artifact)) = data.split_first() else {
        return;
    };
    let algorithm = Algorithm::ALL[selector as usize % Algorithm::ALL.len()];
    let _ = decompress(algorithm, artifact);
});
