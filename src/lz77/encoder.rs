use log::{debug, trace};

use super::tokens::{Lz77Token, TOKEN_SIZE};
use super::{Lz77Config, MARKER_STORED, MARKER_TOKENS};
use crate::error::Result;

/// Encode `input` as an LZ77 artifact
///
/// Inputs shorter than `stored_threshold`, and inputs whose token stream
/// would not be smaller than a stored copy, are written as `'U'` + raw bytes.
pub fn encode(input: &[u8], config: &Lz77Config) -> Result<Vec<u8>> {
    config.validate()?;

    if input.len() < config.stored_threshold {
        debug!("lz77: {} bytes below threshold {}, stored", input.len(), config.stored_threshold);
        return Ok(store(input));
    }

    let tokens = tokenize(input, config);
    let tokenized_len = 1 + tokens.len() * TOKEN_SIZE;
    if tokenized_len >= 1 + input.len() {
        debug!("lz77: {} tokens would not shrink {} bytes, stored", tokens.len(), input.len());
        return Ok(store(input));
    }

    let mut output = Vec::with_capacity(tokenized_len);
    output.push(MARKER_TOKENS);
    for token in &tokens {
        token.write_to(&mut output);
    }

    debug!("lz77: {} bytes -> {} bytes ({} tokens)", input.len(), output.len(), tokens.len());
    Ok(output)
}

fn store(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(1 + input.len());
    output.push(MARKER_STORED);
    output.extend_from_slice(input);
    output
}

/// Split `input` into tokens
///
/// The window is the `window_size` bytes before the cursor. After each token
/// the cursor advances past the matched bytes plus the trailing literal.
pub fn tokenize(input: &[u8], config: &Lz77Config) -> Vec<Lz77Token> {
    let mut tokens = Vec::with_capacity(input.len() / 4 + 1);
    let mut cursor = 0;

    while cursor < input.len() {
        let (offset, length) = find_longest_match(input, cursor, config);

        if length >= config.min_match_len {
            let token = Lz77Token::reference(offset as u16, length as u16, input[cursor + length]);
            trace!("lz77: @{} match offset={} length={}", cursor, offset, length);
            tokens.push(token);
            cursor += length + 1;
        } else {
            tokens.push(Lz77Token::literal(input[cursor]));
            cursor += 1;
        }
    }

    tokens
}

/// Longest match for the bytes at `cursor` within the window, as `(offset, length)`
///
/// Matches may run past the cursor (offset < length). The length is capped so
/// that at least one byte remains for the trailing literal. Among equal
/// lengths the smallest offset wins.
fn find_longest_match(input: &[u8], cursor: usize, config: &Lz77Config) -> (usize, usize) {
    let max_len = config.max_match_len.min(input.len() - cursor - 1);
    if max_len < config.min_match_len {
        return (0, 0);
    }

    let window_start = cursor.saturating_sub(config.window_size);
    let window = &input[window_start..cursor];
    let lookahead = &input[cursor + 1..cursor + max_len];

    let mut best = (0, 0);
    // Candidates are positions holding the first lookahead byte, nearest first
    for pos in memchr::memrchr_iter(input[cursor], window) {
        let start = window_start + pos;
        let length = 1 + input[start + 1..]
            .iter()
            .zip(lookahead)
            .take_while(|(a, b)| a == b)
            .count();

        if length > best.1 {
            best = (cursor - start, length);
            if length == max_len {
                break;
            }
        }
    }

    best
}
