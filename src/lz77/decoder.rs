use log::debug;

use super::tokens::{Lz77Token, TOKEN_SIZE};
use super::window::SlidingWindow;
use super::{Lz77Config, MARKER_STORED, MARKER_TOKENS};
use crate::error::{Error, Result};

/// Decode an LZ77 artifact produced by [`super::encoder::encode`]
///
/// `config.window_size` must be at least the encoder's window size.
pub fn decode(data: &[u8], config: &Lz77Config) -> Result<Vec<u8>> {
    config.validate()?;

    let (&marker, body) =
        data.split_first().ok_or(Error::TruncatedStream { needed: 1, available: 0 })?;

    match marker {
        MARKER_STORED => {
            debug!("lz77: stored artifact, {} bytes", body.len());
            Ok(body.to_vec())
        }
        MARKER_TOKENS => decode_tokens(body, config),
        other => Err(Error::UnknownFormatMarker(other)),
    }
}

/// Replay a token stream against a window rebuilt from the decoder's own output
fn decode_tokens(body: &[u8], config: &Lz77Config) -> Result<Vec<u8>> {
    let remainder = body.len() % TOKEN_SIZE;
    if remainder != 0 {
        return Err(Error::TruncatedStream {
            needed: (TOKEN_SIZE - remainder) as u64,
            available: remainder as u64,
        });
    }

    let mut window = SlidingWindow::new(config.window_size);
    let mut output = Vec::with_capacity(body.len());

    for record in body.chunks_exact(TOKEN_SIZE) {
        let token = Lz77Token::read_from(record)?;

        if !token.is_literal() {
            let start = output.len();
            window.copy_to_vec(token.offset, token.length, &mut output)?;
            window.push_bytes(&output[start..]);
        }

        output.push(token.next_literal);
        window.push_byte(token.next_literal);
    }

    debug!("lz77: {} tokens -> {} bytes", body.len() / TOKEN_SIZE, output.len());
    Ok(output)
}
