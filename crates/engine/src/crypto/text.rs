//! Text in, encoded frame out (and back).

use common::protocol::{
    CipherAlgorithm, DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse,
    TextEncoding,
};
use common::{ErrorCode, Tool};
use tracing::debug;

use super::cipher::{open, seal, CipherError};
use super::encoding::{decode, encode};
use super::key::derive_key;

/// Encrypt `text` under `passphrase` and render the frame in `encoding`.
///
/// # Errors
///
/// - [`ErrorCode::TextEmpty`] if `text` is empty.
/// - [`ErrorCode::InputNotValid`] if `passphrase` is empty.
pub fn encrypt_text(
    text: &str,
    passphrase: &str,
    algorithm: CipherAlgorithm,
    encoding: TextEncoding,
) -> Result<String, ErrorCode> {
    if text.is_empty() {
        return Err(ErrorCode::TextEmpty);
    }
    if passphrase.is_empty() {
        return Err(ErrorCode::InputNotValid);
    }

    let key = derive_key(passphrase);
    let frame = seal(text.as_bytes(), &key, algorithm)?;
    debug!(?algorithm, frame_len = frame.len(), "sealed frame");
    Ok(encode(&frame, encoding))
}

/// Decode `cipher_text` from `encoding` and decrypt it under `passphrase`.
///
/// # Errors
///
/// - [`ErrorCode::TextEmpty`] if `cipher_text` is empty.
/// - [`ErrorCode::InputNotValid`] if `passphrase` is empty.
/// - [`ErrorCode::WrongFormat`] if `cipher_text` is not valid `encoding`.
/// - [`ErrorCode::FailedToDecrypt`] if the frame is truncated, fails its
///   padding or tag check, or does not decrypt to UTF-8.
pub fn decrypt_text(
    cipher_text: &str,
    passphrase: &str,
    algorithm: CipherAlgorithm,
    encoding: TextEncoding,
) -> Result<String, ErrorCode> {
    if cipher_text.is_empty() {
        return Err(ErrorCode::TextEmpty);
    }
    if passphrase.is_empty() {
        return Err(ErrorCode::InputNotValid);
    }

    let frame = decode(cipher_text, encoding)?;
    let key = derive_key(passphrase);
    let plaintext = open(&frame, &key, algorithm)?;
    debug!(?algorithm, frame_len = frame.len(), "opened frame");
    String::from_utf8(plaintext).map_err(|_| CipherError::NotUtf8.into())
}

/// `cipher.encrypt`: text encryption.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encryptor;

impl Tool for Encryptor {
    const NAME: &'static str = "cipher.encrypt";
    type Request = EncryptRequest;
    type Response = EncryptResponse;

    fn run(&self, request: EncryptRequest) -> Result<EncryptResponse, ErrorCode> {
        let cipher_text =
            encrypt_text(&request.text, &request.key, request.algorithm, request.encoding)?;
        Ok(EncryptResponse { cipher_text })
    }
}

/// `cipher.decrypt`: text decryption.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decryptor;

impl Tool for Decryptor {
    const NAME: &'static str = "cipher.decrypt";
    type Request = DecryptRequest;
    type Response = DecryptResponse;

    fn run(&self, request: DecryptRequest) -> Result<DecryptResponse, ErrorCode> {
        let text = decrypt_text(
            &request.cipher_text,
            &request.key,
            request.algorithm,
            request.encoding,
        )?;
        Ok(DecryptResponse { text })
    }
}
