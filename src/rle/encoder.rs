use log::debug;

use super::{MAX_RAW_LEN, MAX_RUN_LEN, RUN_FLAG};

/// A maximal span of the input, as the encoder classifies it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RleSpan<'a> {
    /// `value` repeated `count` times (2-127)
    Run { value: u8, count: u8 },
    /// 1-128 bytes copied verbatim
    Raw(&'a [u8]),
}

impl RleSpan<'_> {
    /// Control byte that introduces this span
    pub fn control(&self) -> u8 {
        match self {
            RleSpan::Run { count, .. } => RUN_FLAG + count,
            RleSpan::Raw(bytes) => (bytes.len() - 1) as u8,
        }
    }

    /// Number of input bytes this span covers
    pub fn len(&self) -> usize {
        match self {
            RleSpan::Run { count, .. } => *count as usize,
            RleSpan::Raw(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialized size: control byte plus payload
    pub fn encoded_len(&self) -> usize {
        match self {
            RleSpan::Run { .. } => 2,
            RleSpan::Raw(bytes) => 1 + bytes.len(),
        }
    }
}

/// Partition `input` into runs and raw spans, left to right
///
/// A run is taken whenever the current byte repeats at least once. Otherwise
/// a raw span grows until the next two bytes are equal, the input ends, or
/// it reaches 128 bytes.
pub fn spans(input: &[u8]) -> Vec<RleSpan<'_>> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < input.len() {
        let value = input[i];
        let run = input[i..].iter().take(MAX_RUN_LEN).take_while(|&&b| b == value).count();

        if run >= 2 {
            spans.push(RleSpan::Run { value, count: run as u8 });
            i += run;
        } else {
            let mut raw = 0;
            while i + raw < input.len()
                && raw < MAX_RAW_LEN
                && !(i + raw + 1 < input.len() && input[i + raw] == input[i + raw + 1])
            {
                raw += 1;
            }
            spans.push(RleSpan::Raw(&input[i..i + raw]));
            i += raw;
        }
    }

    spans
}

/// Encode `input` as a sequence of control-prefixed spans
pub fn encode(input: &[u8]) -> Vec<u8> {
    let spans = spans(input);
    let mut output = Vec::with_capacity(spans.iter().map(|s| s.encoded_len()).sum());

    for span in &spans {
        output.push(span.control());
        match span {
            RleSpan::Run { value, .. } => output.push(*value),
            RleSpan::Raw(bytes) => output.extend_from_slice(bytes),
        }
    }

    debug!("rle: {} bytes -> {} bytes ({} spans)", input.len(), output.len(), spans.len());
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_run() {
        assert_eq!(encode(b"aaaaaaaaaa"), vec![0x8A, b'a']);
    }

    #[test]
    fn test_empty() {
        assert!(encode(b"").is_empty());
        assert!(spans(b"").is_empty());
    }

    #[test]
    fn test_single_byte() {
        assert_eq!(encode(b"x"), vec![0x00, b'x']);
    }

    #[test]
    fn test_raw_stops_before_run() {
        assert_eq!(
            spans(b"abcdd"),
            vec![RleSpan::Raw(b"abc"), RleSpan::Run { value: b'd', count: 2 }]
        );
        assert_eq!(encode(b"abcdd"), vec![0x02, b'a', b'b', b'c', 0x82, b'd']);
    }

    #[test]
    fn test_run_cap() {
        let input = vec![7u8; 300];
        let spans = spans(&input);
        assert_eq!(
            spans,
            vec![
                RleSpan::Run { value: 7, count: 127 },
                RleSpan::Run { value: 7, count: 127 },
                RleSpan::Run { value: 7, count: 46 },
            ]
        );
        assert_eq!(spans[0].control(), 0xFF);
    }

    #[test]
    fn test_run_remainder_of_one_becomes_raw() {
        let input = vec![1u8; 128];
        assert_eq!(spans(&input), vec![RleSpan::Run { value: 1, count: 127 }, RleSpan::Raw(&[1])]);
    }

    #[test]
    fn test_raw_cap() {
        let input: Vec<u8> = (0..200u8).collect();
        let spans = spans(&input);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].len(), 128);
        assert_eq!(spans[0].control(), 0x7F);
        assert_eq!(spans[1].len(), 72);
        assert_eq!(spans[1].control(), 71);
    }

    #[test]
    fn test_encoded_len_matches_output() {
        let input = b"aabbbcdeffffffg";
        let total: usize = spans(input).iter().map(|s| s.encoded_len()).sum();
        assert_eq!(encode(input).len(), total);
    }
}
