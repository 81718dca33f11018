//! Byte-level sealing and opening of cipher frames.
//!
//! [`seal`] and [`open`] take already-derived key material (see
//! [`super::key`]) and work on raw bytes; text handling and external
//! encodings live in [`super::text`].

use aes::{Aes128, Aes256};
use aes_gcm::{AeadInPlace, Aes256Gcm, Nonce, Tag};
use cbc::cipher::{
    block_padding::Pkcs7, BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit,
};
use common::protocol::CipherAlgorithm;
use common::ErrorCode;
use des::TdesEde3;
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

use super::key::key_len;
use super::rc4::Rc4;

/// IV length for AES-CBC.
pub const AES_IV_LEN: usize = 16;
/// IV length for 3DES-CBC.
pub const DES_IV_LEN: usize = 8;
/// Nonce length for AES-GCM.
pub const GCM_NONCE_LEN: usize = 12;
/// Authentication tag length for AES-GCM.
pub const GCM_TAG_LEN: usize = 16;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Key material shorter than the algorithm requires.
    #[error("invalid key length")]
    InvalidKeyLength,

    /// The AEAD refused to encrypt (plaintext beyond the GCM size limit).
    #[error("encryption failed")]
    EncryptFailed,

    /// The frame is shorter than its fixed prefix.
    #[error("cipher frame is truncated")]
    Truncated,

    /// Padding check or authentication failed (wrong key or tampered data).
    #[error("decryption failed")]
    DecryptFailed,

    /// The decrypted bytes are not UTF-8 text.
    #[error("decrypted bytes are not valid UTF-8")]
    NotUtf8,

    /// The frame's base64 / hex text could not be decoded.
    #[error("invalid external encoding")]
    InvalidEncoding,
}

impl From<CipherError> for ErrorCode {
    fn from(err: CipherError) -> Self {
        match err {
            CipherError::InvalidKeyLength | CipherError::EncryptFailed => ErrorCode::Unknown,
            CipherError::Truncated | CipherError::DecryptFailed | CipherError::NotUtf8 => {
                ErrorCode::FailedToDecrypt
            }
            CipherError::InvalidEncoding => ErrorCode::WrongFormat,
        }
    }
}

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

fn algorithm_key(key: &[u8], algorithm: CipherAlgorithm) -> Result<&[u8], CipherError> {
    key.get(..key_len(algorithm))
        .ok_or(CipherError::InvalidKeyLength)
}

fn split_prefix(frame: &[u8], len: usize) -> Result<(&[u8], &[u8]), CipherError> {
    if frame.len() < len {
        return Err(CipherError::Truncated);
    }
    Ok(frame.split_at(len))
}

// ---------------------------------------------------------------------------
// CBC
// ---------------------------------------------------------------------------

fn cbc_seal<C, const IV: usize>(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CipherError>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let iv = random_bytes::<IV>();
    let body = cbc::Encryptor::<C>::new_from_slices(key, &iv)
        .map_err(|_| CipherError::InvalidKeyLength)?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut frame = Vec::with_capacity(IV + body.len());
    frame.extend_from_slice(&iv);
    frame.extend_from_slice(&body);
    Ok(frame)
}

fn cbc_open<C, const IV: usize>(key: &[u8], frame: &[u8]) -> Result<Vec<u8>, CipherError>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let (iv, body) = split_prefix(frame, IV)?;
    cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| CipherError::InvalidKeyLength)?
        .decrypt_padded_vec_mut::<Pkcs7>(body)
        .map_err(|_| CipherError::DecryptFailed)
}

// ---------------------------------------------------------------------------
// GCM
// ---------------------------------------------------------------------------

fn gcm_seal(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength)?;
    let nonce = random_bytes::<GCM_NONCE_LEN>();

    let mut body = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut body)
        .map_err(|_| CipherError::EncryptFailed)?;

    let mut frame = Vec::with_capacity(GCM_NONCE_LEN + GCM_TAG_LEN + body.len());
    frame.extend_from_slice(&nonce);
    frame.extend_from_slice(&tag);
    frame.extend_from_slice(&body);
    Ok(frame)
}

fn gcm_open(key: &[u8], frame: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength)?;
    let (nonce, rest) = split_prefix(frame, GCM_NONCE_LEN)?;
    let (tag, body) = split_prefix(rest, GCM_TAG_LEN)?;

    let mut plaintext = body.to_vec();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(nonce),
            b"",
            &mut plaintext,
            Tag::from_slice(tag),
        )
        .map_err(|_| CipherError::DecryptFailed)?;
    Ok(plaintext)
}

// ---------------------------------------------------------------------------
// RC4
// ---------------------------------------------------------------------------

fn rc4_apply(key: &[u8], data: &[u8]) -> Result<Vec<u8>, CipherError> {
    let mut out = data.to_vec();
    Rc4::new(key)?.apply_keystream(&mut out);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Encrypt `plaintext` into a frame for `algorithm`.
///
/// `key` is derived key material; only its first
/// [`key_len(algorithm)`](super::key::key_len) bytes are used.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is too short.
pub fn seal(plaintext: &[u8], key: &[u8], algorithm: CipherAlgorithm) -> Result<Vec<u8>, CipherError> {
    let key = algorithm_key(key, algorithm)?;
    match algorithm {
        CipherAlgorithm::Aes128Cbc => cbc_seal::<Aes128, AES_IV_LEN>(key, plaintext),
        CipherAlgorithm::Aes256Cbc => cbc_seal::<Aes256, AES_IV_LEN>(key, plaintext),
        CipherAlgorithm::Aes256Gcm => gcm_seal(key, plaintext),
        CipherAlgorithm::TripleDesCbc => cbc_seal::<TdesEde3, DES_IV_LEN>(key, plaintext),
        CipherAlgorithm::Rc4 => rc4_apply(key, plaintext),
    }
}

/// Decrypt a frame produced by [`seal`].
///
/// # Errors
///
/// - [`CipherError::Truncated`] if the frame is shorter than its prefix.
/// - [`CipherError::DecryptFailed`] on bad padding or a failed GCM tag check.
/// - [`CipherError::InvalidKeyLength`] if `key` is too short.
pub fn open(frame: &[u8], key: &[u8], algorithm: CipherAlgorithm) -> Result<Vec<u8>, CipherError> {
    let key = algorithm_key(key, algorithm)?;
    match algorithm {
        CipherAlgorithm::Aes128Cbc => cbc_open::<Aes128, AES_IV_LEN>(key, frame),
        CipherAlgorithm::Aes256Cbc => cbc_open::<Aes256, AES_IV_LEN>(key, frame),
        CipherAlgorithm::Aes256Gcm => gcm_open(key, frame),
        CipherAlgorithm::TripleDesCbc => cbc_open::<TdesEde3, DES_IV_LEN>(key, frame),
        CipherAlgorithm::Rc4 => rc4_apply(key, frame),
    }
}
