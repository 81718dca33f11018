//! `devkit` engine: identifier generation, digests, integer base conversion
//! and symmetric text encryption behind a uniform [`Tool`] contract.
//!
//! Every operation is a pure function of its request: no I/O, no state
//! carried between calls. Hosts build a [`Toolbox`] once (optionally from
//! `ENGINE_*` environment variables) and either call tools directly or go
//! through the JSON [`registry`].

pub mod config;
pub mod crypto;
pub mod digest;
pub mod identifier;
pub mod pool;
pub mod radix;
pub mod registry;
pub mod telemetry;
pub mod toolbox;

pub use common::{protocol, ErrorCode, Tool, ToolResult};
pub use config::EngineConfig;
pub use registry::{RegistryError, ToolDescriptor};
pub use toolbox::Toolbox;
