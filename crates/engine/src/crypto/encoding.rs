//! External text encodings for cipher frames.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::protocol::TextEncoding;

use super::cipher::CipherError;

/// Render `frame` as text.
pub fn encode(frame: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Base64 => STANDARD.encode(frame),
        TextEncoding::Hex => hex::encode(frame),
    }
}

/// Parse text produced by [`encode`].
///
/// # Errors
///
/// Returns [`CipherError::InvalidEncoding`] if `text` is not valid in `encoding`.
pub fn decode(text: &str, encoding: TextEncoding) -> Result<Vec<u8>, CipherError> {
    match encoding {
        TextEncoding::Base64 => STANDARD.decode(text).map_err(|_| CipherError::InvalidEncoding),
        TextEncoding::Hex => hex::decode(text).map_err(|_| CipherError::InvalidEncoding),
    }
}
