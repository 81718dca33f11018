//! Tool contract, request/response value objects, and error codes shared by
//! every `devkit` engine.

pub mod contract;
pub mod error;
pub mod protocol;

pub use contract::{InvalidEnvelope, Tool, ToolResult};
pub use error::ErrorCode;
