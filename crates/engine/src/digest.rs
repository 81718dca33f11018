//! Fixed-output digests over UTF-8 text, rendered as lowercase hex.
//!
//! With a key the digest becomes HMAC-<algorithm> over the same bytes.

use common::protocol::{HashAlgorithm, HashRequest, HashResponse};
use common::{ErrorCode, Tool};
use hmac::{Mac, SimpleHmac};
use md5::Md5;
use sha1::Sha1;
use sha2::digest::{core_api::BlockSizeUser, Digest};
use sha2::{Sha256, Sha384, Sha512};

fn digest_hex<D: Digest>(data: &[u8]) -> String {
    hex::encode(D::digest(data))
}

fn hmac_hex<D: Digest + BlockSizeUser>(key: &[u8], data: &[u8]) -> Result<String, ErrorCode> {
    let mut mac =
        <SimpleHmac<D> as Mac>::new_from_slice(key).map_err(|_| ErrorCode::Unknown)?;
    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Hash `text` with `algorithm`.
///
/// # Errors
///
/// Returns [`ErrorCode::TextEmpty`] if `text` is empty.
pub fn hash_text(text: &str, algorithm: HashAlgorithm) -> Result<String, ErrorCode> {
    if text.is_empty() {
        return Err(ErrorCode::TextEmpty);
    }
    let data = text.as_bytes();
    Ok(match algorithm {
        HashAlgorithm::Md5 => digest_hex::<Md5>(data),
        HashAlgorithm::Sha1 => digest_hex::<Sha1>(data),
        HashAlgorithm::Sha256 => digest_hex::<Sha256>(data),
        HashAlgorithm::Sha384 => digest_hex::<Sha384>(data),
        HashAlgorithm::Sha512 => digest_hex::<Sha512>(data),
    })
}

/// HMAC `text` with `key` using `algorithm` as the underlying digest.
///
/// # Errors
///
/// Returns [`ErrorCode::TextEmpty`] if `text` is empty.
pub fn hmac_text(text: &str, key: &str, algorithm: HashAlgorithm) -> Result<String, ErrorCode> {
    if text.is_empty() {
        return Err(ErrorCode::TextEmpty);
    }
    let (key, data) = (key.as_bytes(), text.as_bytes());
    match algorithm {
        HashAlgorithm::Md5 => hmac_hex::<Md5>(key, data),
        HashAlgorithm::Sha1 => hmac_hex::<Sha1>(key, data),
        HashAlgorithm::Sha256 => hmac_hex::<Sha256>(key, data),
        HashAlgorithm::Sha384 => hmac_hex::<Sha384>(key, data),
        HashAlgorithm::Sha512 => hmac_hex::<Sha512>(key, data),
    }
}

/// `hash.compute`: plain or keyed digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hasher;

impl Tool for Hasher {
    const NAME: &'static str = "hash.compute";
    type Request = HashRequest;
    type Response = HashResponse;

    fn run(&self, request: HashRequest) -> Result<HashResponse, ErrorCode> {
        let digest = match request.key.as_deref() {
            Some(key) if !key.is_empty() => hmac_text(&request.text, key, request.algorithm)?,
            _ => hash_text(&request.text, request.algorithm)?,
        };
        Ok(HashResponse { digest })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[test]
    fn md5_known_vector() {
        assert_eq!(
            hash_text("test-text", HashAlgorithm::Md5).unwrap(),
            "cf0feea200efdea7d8580c7d4ef57ced"
        );
    }

    #[test]
    fn sha_family_known_vectors() {
        assert_eq!(
            hash_text("abc", HashAlgorithm::Sha1).unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            hash_text("abc", HashAlgorithm::Sha256).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            hash_text("abc", HashAlgorithm::Sha384).unwrap(),
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
             8086072ba1e7cc2358baeca134c825a7"
        );
        assert_eq!(
            hash_text("abc", HashAlgorithm::Sha512).unwrap(),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn output_length_is_two_hex_chars_per_byte() {
        for (alg, bytes) in [
            (HashAlgorithm::Md5, 16),
            (HashAlgorithm::Sha1, 20),
            (HashAlgorithm::Sha256, 32),
            (HashAlgorithm::Sha384, 48),
            (HashAlgorithm::Sha512, 64),
        ] {
            let hex = hash_text("ünïcödé", alg).unwrap();
            assert_eq!(hex.len(), bytes * 2);
            assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn empty_text_is_rejected() {
        assert_eq!(hash_text("", HashAlgorithm::Sha256), Err(ErrorCode::TextEmpty));
        assert_eq!(hmac_text("", "k", HashAlgorithm::Sha256), Err(ErrorCode::TextEmpty));
    }

    #[test]
    fn hmac_known_vectors() {
        assert_eq!(
            hmac_text(FOX, "key", HashAlgorithm::Md5).unwrap(),
            "80070713463e7749b90c2dc24911e275"
        );
        assert_eq!(
            hmac_text(FOX, "key", HashAlgorithm::Sha1).unwrap(),
            "de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9"
        );
        assert_eq!(
            hmac_text(FOX, "key", HashAlgorithm::Sha256).unwrap(),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn tool_uses_hmac_only_with_non_empty_key() {
        let plain = Hasher.execute(HashRequest::new(FOX, HashAlgorithm::Sha256));
        let blank_key = Hasher.execute(HashRequest::new(FOX, HashAlgorithm::Sha256).with_key(""));
        let keyed = Hasher.execute(HashRequest::new(FOX, HashAlgorithm::Sha256).with_key("key"));
        assert_eq!(plain.payload(), blank_key.payload());
        assert_ne!(plain.payload(), keyed.payload());
        assert!(keyed.payload().digest.starts_with("f7bc83f4"));
    }

    #[test]
    fn tool_reports_text_empty() {
        let result = Hasher.execute(HashRequest::new("", HashAlgorithm::Md5));
        assert_eq!(result.errors(), &[ErrorCode::TextEmpty]);
        assert!(result.payload().digest.is_empty());
    }
}
