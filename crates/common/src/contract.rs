//! The uniform request → result contract every engine operation implements.
//!
//! # Invariant
//!
//! A [`ToolResult`] is either fully successful (no error codes, payload
//! populated) or fully failed (at least one error code, payload left at its
//! `Default`). The two constructors are the only way to build one in code, and
//! deserialisation checks the same rule, so partial success cannot be
//! represented.

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::error::ErrorCode;

/// Result envelope returned by [`Tool::execute`].
///
/// Deserialisation rejects envelopes whose `failed` flag disagrees with
/// their error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawToolResult<T>")]
pub struct ToolResult<T> {
    payload: T,
    failed: bool,
    errors: Vec<ErrorCode>,
}

/// Wire shape of a [`ToolResult`] before the invariant is checked.
#[derive(Deserialize)]
struct RawToolResult<T> {
    payload: T,
    failed: bool,
    #[serde(default)]
    errors: Vec<ErrorCode>,
}

/// A serialised envelope that is neither fully successful nor fully failed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("envelope `failed` flag ({failed}) disagrees with {errors} error code(s)")]
pub struct InvalidEnvelope {
    pub failed: bool,
    pub errors: usize,
}

impl<T> TryFrom<RawToolResult<T>> for ToolResult<T> {
    type Error = InvalidEnvelope;

    fn try_from(raw: RawToolResult<T>) -> Result<Self, Self::Error> {
        if raw.failed == raw.errors.is_empty() {
            return Err(InvalidEnvelope {
                failed: raw.failed,
                errors: raw.errors.len(),
            });
        }
        Ok(Self {
            payload: raw.payload,
            failed: raw.failed,
            errors: raw.errors,
        })
    }
}

impl<T> ToolResult<T> {
    /// A successful result carrying `payload`.
    pub fn success(payload: T) -> Self {
        Self {
            payload,
            failed: false,
            errors: Vec::new(),
        }
    }

    /// Returns the payload. For a failed result this is the default value.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the envelope and return the payload.
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// `true` when the operation failed.
    pub fn is_failure(&self) -> bool {
        self.failed
    }

    /// `true` when the operation succeeded.
    pub fn is_success(&self) -> bool {
        !self.failed
    }

    /// All error codes, canonical code first. Empty on success.
    pub fn errors(&self) -> &[ErrorCode] {
        &self.errors
    }

    /// The canonical error code, if the operation failed.
    pub fn error(&self) -> Option<ErrorCode> {
        self.errors.first().copied()
    }

    /// Convert into a plain `Result`, dropping the default payload on failure.
    pub fn into_result(self) -> Result<T, ErrorCode> {
        match self.errors.first() {
            Some(code) => Err(*code),
            None => Ok(self.payload),
        }
    }
}

impl<T: Default> ToolResult<T> {
    /// A failed result carrying `code` and the default payload.
    pub fn failure(code: ErrorCode) -> Self {
        Self {
            payload: T::default(),
            failed: true,
            errors: vec![code],
        }
    }
}

impl<T: Default> From<Result<T, ErrorCode>> for ToolResult<T> {
    fn from(result: Result<T, ErrorCode>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(code) => Self::failure(code),
        }
    }
}

/// A single engine operation.
///
/// Implementors put their domain logic in [`Tool::run`] and return typed
/// failures as `Err(ErrorCode)`. Callers use [`Tool::execute`], which converts
/// the outcome into a [`ToolResult`] and turns any panic raised inside `run`
/// into [`ErrorCode::Unknown`].
pub trait Tool: Send + Sync {
    /// Stable registry name, e.g. `"hash.compute"`.
    const NAME: &'static str;

    /// Request value object.
    type Request;

    /// Response value object. `Default` is the payload of a failed result.
    type Response: Default;

    /// Perform the operation.
    fn run(&self, request: Self::Request) -> Result<Self::Response, ErrorCode>;

    /// Perform the operation behind the contract boundary.
    fn execute(&self, request: Self::Request) -> ToolResult<Self::Response> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.run(request))) {
            Ok(Ok(response)) => {
                debug!(tool = Self::NAME, "tool succeeded");
                ToolResult::success(response)
            }
            Ok(Err(code)) => {
                warn!(tool = Self::NAME, code = code.as_str(), "tool failed");
                ToolResult::failure(code)
            }
            Err(cause) => {
                let reason = cause
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| cause.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".into());
                error!(tool = Self::NAME, reason = %reason, "tool panicked");
                ToolResult::failure(ErrorCode::Unknown)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Tool for Echo {
        const NAME: &'static str = "test.echo";
        type Request = &'static str;
        type Response = String;

        fn run(&self, request: &'static str) -> Result<String, ErrorCode> {
            match request {
                "" => Err(ErrorCode::TextEmpty),
                "boom" => panic!("exploded"),
                other => Ok(other.to_uppercase()),
            }
        }
    }

    #[test]
    fn success_has_payload_and_no_errors() {
        let result = Echo.execute("hi");
        assert!(result.is_success());
        assert!(result.errors().is_empty());
        assert_eq!(result.payload(), "HI");
    }

    #[test]
    fn domain_failure_surfaces_code_verbatim() {
        let result = Echo.execute("");
        assert!(result.is_failure());
        assert_eq!(result.error(), Some(ErrorCode::TextEmpty));
        assert_eq!(result.payload(), "");
    }

    #[test]
    fn panic_becomes_unknown() {
        let result = Echo.execute("boom");
        assert!(result.is_failure());
        assert_eq!(result.errors(), &[ErrorCode::Unknown]);
    }

    #[test]
    fn into_result_round_trips() {
        assert_eq!(Echo.execute("ok").into_result(), Ok("OK".to_string()));
        assert_eq!(Echo.execute("").into_result(), Err(ErrorCode::TextEmpty));
    }

    #[test]
    fn envelope_serialises_code_names() {
        let failed: ToolResult<String> = ToolResult::failure(ErrorCode::WrongBase);
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["failed"], true);
        assert_eq!(json["errors"][0], "WrongBase");
        assert_eq!(json["payload"], "");
    }

    #[test]
    fn envelope_round_trips_through_json() {
        let ok = Echo.execute("hi");
        let json = serde_json::to_string(&ok).unwrap();
        assert_eq!(serde_json::from_str::<ToolResult<String>>(&json).unwrap(), ok);

        let failed = Echo.execute("");
        let json = serde_json::to_string(&failed).unwrap();
        assert_eq!(serde_json::from_str::<ToolResult<String>>(&json).unwrap(), failed);
    }

    #[test]
    fn inconsistent_envelopes_are_rejected() {
        let failed_without_codes = r#"{"payload":"leak","failed":true,"errors":[]}"#;
        assert!(serde_json::from_str::<ToolResult<String>>(failed_without_codes).is_err());

        let success_with_codes = r#"{"payload":"x","failed":false,"errors":["WrongBase"]}"#;
        assert!(serde_json::from_str::<ToolResult<String>>(success_with_codes).is_err());
    }

    #[test]
    fn missing_errors_means_success() {
        let result: ToolResult<String> =
            serde_json::from_str(r#"{"payload":"x","failed":false}"#).unwrap();
        assert_eq!(result.into_result(), Ok("x".to_string()));
    }
}
