//! UUID generation.
//!
//! # Bit layout
//!
//! Name-based identifiers hash `namespace bytes ‖ UTF-8 name`, keep the first
//! 16 bytes, then set the version nibble (high nibble of byte 6) and the
//! RFC 4122 variant (`10` in the two high bits of byte 8).
//!
//! Time-ordered identifiers carry the 48-bit big-endian millisecond timestamp
//! in bytes 0..6 and random bytes after it. Only the version nibble is forced
//! to 7; the variant bits stay random.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::protocol::{GenerateUuidRequest, GenerateUuidResponse, UuidStyle, UuidVersion};
use common::{ErrorCode, Tool};
use md5::Md5;
use rand::RngCore;
use sha1::Sha1;
use sha2::digest::Digest;
use tracing::debug;
use uuid::Uuid;

use crate::pool::WorkerPool;

/// The all-ones UUID `ffffffff-ffff-ffff-ffff-ffffffffffff`.
pub const MAX: Uuid = Uuid::from_bytes([0xFF; 16]);

/// Largest timestamp that fits the 48-bit v7 field.
const MAX_UNIX_MS: i64 = (1 << 48) - 1;

fn name_based<D: Digest>(namespace: &Uuid, name: &str, version: u8) -> Uuid {
    let hash = D::new()
        .chain_update(namespace.as_bytes())
        .chain_update(name.as_bytes())
        .finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);
    bytes[6] = (bytes[6] & 0x0F) | (version << 4);
    bytes[8] = (bytes[8] & 0x3F) | 0x80;
    Uuid::from_bytes(bytes)
}

/// Version 3 (MD5) name-based UUID.
pub fn v3(namespace: &Uuid, name: &str) -> Uuid {
    name_based::<Md5>(namespace, name, 3)
}

/// Version 5 (SHA-1) name-based UUID.
pub fn v5(namespace: &Uuid, name: &str) -> Uuid {
    name_based::<Sha1>(namespace, name, 5)
}

/// Version 7 UUID for `unix_ms`, with the tail drawn from `rng`.
pub fn v7<R: RngCore + ?Sized>(unix_ms: u64, rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    bytes[..6].copy_from_slice(&unix_ms.to_be_bytes()[2..]);
    rng.fill_bytes(&mut bytes[6..]);
    bytes[6] = (bytes[6] & 0x0F) | 0x70;
    Uuid::from_bytes(bytes)
}

fn unix_millis(timestamp: Option<DateTime<Utc>>) -> Result<u64, ErrorCode> {
    let ms = timestamp.unwrap_or_else(Utc::now).timestamp_millis();
    if !(0..=MAX_UNIX_MS).contains(&ms) {
        return Err(ErrorCode::InputNotValid);
    }
    Ok(ms as u64)
}

/// `uuid.generate`: batch UUID generation.
///
/// Random and time-ordered batches are spread over the [`WorkerPool`]; every
/// worker draws from its own thread-local generator.
#[derive(Debug, Clone)]
pub struct UuidGenerator {
    pool: Arc<WorkerPool>,
}

impl UuidGenerator {
    pub fn new(pool: Arc<WorkerPool>) -> Self {
        Self { pool }
    }
}

impl Tool for UuidGenerator {
    const NAME: &'static str = "uuid.generate";
    type Request = GenerateUuidRequest;
    type Response = GenerateUuidResponse;

    fn run(&self, request: GenerateUuidRequest) -> Result<GenerateUuidResponse, ErrorCode> {
        let count = super::batch_size(request.count)?;
        debug!(version = ?request.version, count, "generating uuids");

        let ids = match request.version {
            UuidVersion::Nil => vec![Uuid::nil(); count],
            UuidVersion::Max => vec![MAX; count],
            UuidVersion::V4 => self.pool.map_indexed(count, |_| Ok(Uuid::new_v4()))?,
            UuidVersion::V3 | UuidVersion::V5 => {
                let namespace = request
                    .namespace
                    .filter(|ns| !ns.is_nil())
                    .ok_or(ErrorCode::NamespaceEmpty)?;
                let name = request.name.unwrap_or_default();
                let id = if request.version == UuidVersion::V3 {
                    v3(&namespace, &name)
                } else {
                    v5(&namespace, &name)
                };
                vec![id; count]
            }
            UuidVersion::V7 => {
                let ms = unix_millis(request.timestamp)?;
                self.pool
                    .map_indexed(count, |_| Ok(v7(ms, &mut rand::thread_rng())))?
            }
        };

        let formatted = ids
            .iter()
            .map(|id| format_uuid(id, request.style, request.uppercase))
            .collect();
        Ok(GenerateUuidResponse { ids, formatted })
    }
}

/// Render `id` in `style`, with upper- or lowercase hex digits.
pub fn format_uuid(id: &Uuid, style: UuidStyle, uppercase: bool) -> String {
    let mut buf = Uuid::encode_buffer();
    let text = match (style, uppercase) {
        (UuidStyle::Hyphenated, false) => id.hyphenated().encode_lower(&mut buf),
        (UuidStyle::Hyphenated, true) => id.hyphenated().encode_upper(&mut buf),
        (UuidStyle::Simple, false) => id.simple().encode_lower(&mut buf),
        (UuidStyle::Simple, true) => id.simple().encode_upper(&mut buf),
        (UuidStyle::Braced, false) => id.braced().encode_lower(&mut buf),
        (UuidStyle::Braced, true) => id.braced().encode_upper(&mut buf),
        (UuidStyle::Urn, false) => id.urn().encode_lower(&mut buf),
        (UuidStyle::Urn, true) => id.urn().encode_upper(&mut buf),
    };
    text.to_owned()
}
