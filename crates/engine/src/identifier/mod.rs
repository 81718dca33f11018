//! 128-bit identifier generation.
//!
//! - [`uuids`]: RFC 4122 style UUIDs: sentinel (nil / max), random (v4),
//!   name-based (v3 MD5, v5 SHA-1) and Unix-millisecond time-ordered (v7).
//! - [`ulids`]: lexicographically sortable ULIDs (random, min, max).

use common::protocol::MAX_BATCH;
use common::ErrorCode;

pub mod ulids;
pub mod uuids;

pub use ulids::UlidGenerator;
pub use uuids::{format_uuid, UuidGenerator};

/// Clamp a requested batch size to at least one and reject anything above
/// [`MAX_BATCH`].
fn batch_size(count: u32) -> Result<usize, ErrorCode> {
    if count > MAX_BATCH {
        return Err(ErrorCode::InputNotValid);
    }
    Ok(count.max(1) as usize)
}
