//! Error codes shared across every engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed taxonomy of failure codes surfaced through a [`ToolResult`].
///
/// Domain validation failures carry a specific code; anything unexpected is
/// reported as [`ErrorCode::Unknown`] by the [`Tool::execute`] boundary.
///
/// [`ToolResult`]: crate::ToolResult
/// [`Tool::execute`]: crate::Tool::execute
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// An unexpected failure inside the engine.
    #[error("unexpected internal failure")]
    Unknown,

    /// The text to process was empty.
    #[error("text must not be empty")]
    TextEmpty,

    /// The input value is missing, malformed, or out of range.
    #[error("input is not valid")]
    InputNotValid,

    /// A numeral base outside `1..=64` was requested.
    #[error("base must be between 1 and 64")]
    WrongBase,

    /// The external encoding (base64 / hex) could not be decoded.
    #[error("input is not in the expected format")]
    WrongFormat,

    /// A name-based identifier was requested without a namespace.
    #[error("namespace must be provided")]
    NamespaceEmpty,

    /// Cipher text decoded but could not be decrypted or authenticated.
    #[error("failed to decrypt")]
    FailedToDecrypt,
}

impl ErrorCode {
    /// Returns the stable symbolic name of this code (e.g. `"WrongBase"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "Unknown",
            ErrorCode::TextEmpty => "TextEmpty",
            ErrorCode::InputNotValid => "InputNotValid",
            ErrorCode::WrongBase => "WrongBase",
            ErrorCode::WrongFormat => "WrongFormat",
            ErrorCode::NamespaceEmpty => "NamespaceEmpty",
            ErrorCode::FailedToDecrypt => "FailedToDecrypt",
        }
    }
}
