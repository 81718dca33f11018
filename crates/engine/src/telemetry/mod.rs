//! Structured logging setup for hosts embedding the engine.
//!
//! # Telemetry invariants
//!
//! - **No key material or plaintext** may appear in any span attribute or log
//!   field. Requests carrying secrets redact them in their `Debug` output.
//! - Log level is configurable via `ENGINE_LOG_LEVEL` (default: `info`) and
//!   can be overridden with `RUST_LOG`.

pub mod init;

pub use init::init_tracing;
