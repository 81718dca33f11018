//! Passphrase → key bytes.

use common::protocol::CipherAlgorithm;
use sha2::{Digest, Sha256};

/// Length of the derived key material (one SHA-256 output).
pub const DERIVED_KEY_LEN: usize = 32;

/// SHA-256 of the passphrase's UTF-8 bytes.
pub fn derive_key(passphrase: &str) -> [u8; DERIVED_KEY_LEN] {
    Sha256::digest(passphrase.as_bytes()).into()
}

/// Number of leading derived-key bytes `algorithm` consumes.
pub fn key_len(algorithm: CipherAlgorithm) -> usize {
    match algorithm {
        CipherAlgorithm::Aes128Cbc => 16,
        CipherAlgorithm::TripleDesCbc => 24,
        CipherAlgorithm::Aes256Cbc | CipherAlgorithm::Aes256Gcm | CipherAlgorithm::Rc4 => 32,
    }
}
