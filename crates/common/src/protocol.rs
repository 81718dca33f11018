//! Request and response value objects for every engine operation.
//!
//! These types are serialised as JSON by the tool registry and by any adapter
//! (HTTP, CLI, MCP) that sits in front of the engine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;
use uuid::Uuid;

/// Largest `count` accepted by the batch generators. Larger requests fail
/// with `InputNotValid` before anything is allocated.
pub const MAX_BATCH: u32 = 10_000;

fn default_count() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// UUID generation
// ---------------------------------------------------------------------------

/// Identifier scheme for [`GenerateUuidRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UuidVersion {
    /// All-zero identifier.
    Nil,
    /// Name-based, MD5.
    V3,
    /// Random.
    V4,
    /// Name-based, SHA-1.
    V5,
    /// Unix-millisecond time-ordered.
    V7,
    /// All-one identifier.
    Max,
}

/// Request body for `uuid.generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateUuidRequest {
    /// Which scheme to generate.
    pub version: UuidVersion,
    /// Number of identifiers. Values below 1 are treated as 1; values above
    /// [`MAX_BATCH`] are rejected.
    #[serde(default = "default_count")]
    pub count: u32,
    /// Namespace for V3/V5. Required by those schemes.
    #[serde(default)]
    pub namespace: Option<Uuid>,
    /// Name for V3/V5. Absent is the same as empty.
    #[serde(default)]
    pub name: Option<String>,
    /// Timestamp for V7. Defaults to the current time.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Layout of the rendered identifiers.
    #[serde(default)]
    pub style: UuidStyle,
    /// Render hex digits in uppercase.
    #[serde(default)]
    pub uppercase: bool,
}

impl GenerateUuidRequest {
    /// A request for one identifier of the given scheme.
    pub fn new(version: UuidVersion) -> Self {
        Self {
            version,
            count: 1,
            namespace: None,
            name: None,
            timestamp: None,
            style: UuidStyle::default(),
            uppercase: false,
        }
    }

    /// Set the batch size.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Set the namespace and name used by V3/V5.
    pub fn with_name(mut self, namespace: Uuid, name: impl Into<String>) -> Self {
        self.namespace = Some(namespace);
        self.name = Some(name.into());
        self
    }

    /// Pin the V7 timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Choose how [`GenerateUuidResponse::formatted`] renders each id.
    pub fn with_style(mut self, style: UuidStyle, uppercase: bool) -> Self {
        self.style = style;
        self.uppercase = uppercase;
        self
    }
}

/// Textual layout of a UUID.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UuidStyle {
    /// `67e55044-10b1-426f-9247-bb680e5fe0c8`
    #[default]
    Hyphenated,
    /// `67e5504410b1426f9247bb680e5fe0c8`
    Simple,
    /// `{67e55044-10b1-426f-9247-bb680e5fe0c8}`
    Braced,
    /// `urn:uuid:67e55044-10b1-426f-9247-bb680e5fe0c8`
    Urn,
}

/// Successful response body for `uuid.generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateUuidResponse {
    /// Generated identifiers, one per requested slot, in slot order.
    pub ids: Vec<Uuid>,
    /// `ids` rendered in the requested style, same order.
    pub formatted: Vec<String>,
}

// ---------------------------------------------------------------------------
// ULID generation
// ---------------------------------------------------------------------------

/// Scheme for [`GenerateUlidRequest`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UlidKind {
    /// Time-prefixed, monotonic within a batch.
    #[default]
    Random,
    /// All-zero ULID.
    Min,
    /// All-one ULID.
    Max,
}

/// Request body for `ulid.generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateUlidRequest {
    /// Which scheme to generate.
    #[serde(default)]
    pub kind: UlidKind,
    /// Number of identifiers. Values below 1 are treated as 1; values above
    /// [`MAX_BATCH`] are rejected.
    #[serde(default = "default_count")]
    pub count: u32,
}

impl GenerateUlidRequest {
    /// A request for `count` identifiers of `kind`.
    pub fn new(kind: UlidKind, count: u32) -> Self {
        Self { kind, count }
    }
}

/// Successful response body for `ulid.generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateUlidResponse {
    /// Generated identifiers in slot order.
    pub ids: Vec<Ulid>,
}

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Digest selector for [`HashRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

/// Request body for `hash.compute`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashRequest {
    /// Text to hash, as UTF-8.
    pub text: String,
    pub algorithm: HashAlgorithm,
    /// Optional HMAC key. Absent or empty computes a plain digest.
    #[serde(default)]
    pub key: Option<String>,
}

impl HashRequest {
    /// A plain (unkeyed) digest request.
    pub fn new(text: impl Into<String>, algorithm: HashAlgorithm) -> Self {
        Self {
            text: text.into(),
            algorithm,
            key: None,
        }
    }

    /// Compute an HMAC with `key` instead of a plain digest.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl fmt::Debug for HashRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRequest")
            .field("text_len", &self.text.len())
            .field("algorithm", &self.algorithm)
            .field("keyed", &self.key.as_deref().is_some_and(|k| !k.is_empty()))
            .finish()
    }
}

/// Successful response body for `hash.compute`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashResponse {
    /// Lowercase hexadecimal digest.
    pub digest: String,
}

// ---------------------------------------------------------------------------
// Base conversion
// ---------------------------------------------------------------------------

/// Request body for `base.convert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertBaseRequest {
    /// Number written in `from_base`.
    pub value: String,
    /// Base of `value`, `1..=64`.
    pub from_base: u32,
    /// Base to re-encode into, `1..=64`.
    pub to_base: u32,
}

impl ConvertBaseRequest {
    pub fn new(value: impl Into<String>, from_base: u32, to_base: u32) -> Self {
        Self {
            value: value.into(),
            from_base,
            to_base,
        }
    }
}

/// Successful response body for `base.convert`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertBaseResponse {
    /// Number written in `base`.
    pub value: String,
    pub base: u32,
}

// ---------------------------------------------------------------------------
// Symmetric encryption
// ---------------------------------------------------------------------------

/// Cipher selector for [`EncryptRequest`] / [`DecryptRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CipherAlgorithm {
    #[serde(rename = "aes-128-cbc")]
    Aes128Cbc,
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    #[serde(rename = "3des-cbc")]
    TripleDesCbc,
    #[serde(rename = "rc4")]
    Rc4,
}

/// External text encoding of a cipher frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[default]
    Base64,
    /// Lowercase hexadecimal.
    Hex,
}

/// Request body for `cipher.encrypt`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptRequest {
    /// Plaintext, encrypted as UTF-8.
    pub text: String,
    /// Passphrase; reduced to key bytes with SHA-256.
    pub key: String,
    pub algorithm: CipherAlgorithm,
    /// Encoding of the produced frame.
    #[serde(default)]
    pub encoding: TextEncoding,
}

impl EncryptRequest {
    pub fn new(text: impl Into<String>, key: impl Into<String>, algorithm: CipherAlgorithm) -> Self {
        Self {
            text: text.into(),
            key: key.into(),
            algorithm,
            encoding: TextEncoding::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl fmt::Debug for EncryptRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptRequest")
            .field("text_len", &self.text.len())
            .field("key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// Successful response body for `cipher.encrypt`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptResponse {
    /// Encoded cipher frame.
    pub cipher_text: String,
}

/// Request body for `cipher.decrypt`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptRequest {
    /// Encoded cipher frame as produced by `cipher.encrypt`.
    pub cipher_text: String,
    pub key: String,
    pub algorithm: CipherAlgorithm,
    /// Encoding of `cipher_text`.
    #[serde(default)]
    pub encoding: TextEncoding,
}

impl DecryptRequest {
    pub fn new(
        cipher_text: impl Into<String>,
        key: impl Into<String>,
        algorithm: CipherAlgorithm,
    ) -> Self {
        Self {
            cipher_text: cipher_text.into(),
            key: key.into(),
            algorithm,
            encoding: TextEncoding::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl fmt::Debug for DecryptRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptRequest")
            .field("cipher_text_len", &self.cipher_text.len())
            .field("key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// Successful response body for `cipher.decrypt`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uuid_request_defaults() {
        let req: GenerateUuidRequest = serde_json::from_value(json!({"version": "v4"})).unwrap();
        assert_eq!(req.version, UuidVersion::V4);
        assert_eq!(req.count, 1);
        assert!(req.namespace.is_none());
        assert!(req.timestamp.is_none());
        assert_eq!(req.style, UuidStyle::Hyphenated);
        assert!(!req.uppercase);
    }

    #[test]
    fn uuid_style_names() {
        let req: GenerateUuidRequest = serde_json::from_value(json!({
            "version": "v4",
            "style": "braced",
            "uppercase": true
        }))
        .unwrap();
        assert_eq!(
            req,
            GenerateUuidRequest::new(UuidVersion::V4).with_style(UuidStyle::Braced, true)
        );
    }

    #[test]
    fn uuid_request_with_namespace() {
        let req: GenerateUuidRequest = serde_json::from_value(json!({
            "version": "v5",
            "count": 3,
            "namespace": "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
            "name": "example.com"
        }))
        .unwrap();
        assert_eq!(req.count, 3);
        assert_eq!(req.namespace, Some(Uuid::NAMESPACE_DNS));
    }

    #[test]
    fn ulid_request_defaults_to_random() {
        let req: GenerateUlidRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req, GenerateUlidRequest::new(UlidKind::Random, 1));
    }

    #[test]
    fn cipher_algorithm_names() {
        let alg: CipherAlgorithm = serde_json::from_value(json!("3des-cbc")).unwrap();
        assert_eq!(alg, CipherAlgorithm::TripleDesCbc);
        assert_eq!(
            serde_json::to_value(CipherAlgorithm::Aes256Gcm).unwrap(),
            json!("aes-256-gcm")
        );
    }

    #[test]
    fn encrypt_request_defaults_to_base64() {
        let req: EncryptRequest = serde_json::from_value(json!({
            "text": "hello",
            "key": "k",
            "algorithm": "rc4"
        }))
        .unwrap();
        assert_eq!(req.encoding, TextEncoding::Base64);
    }

    #[test]
    fn debug_never_prints_key_material() {
        let req = EncryptRequest::new("attack at dawn", "hunter2", CipherAlgorithm::Aes128Cbc);
        let dbg = format!("{req:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(!dbg.contains("attack at dawn"));

        let hash = HashRequest::new("x", HashAlgorithm::Sha256).with_key("hunter2");
        assert!(!format!("{hash:?}").contains("hunter2"));
    }
}
