//! Integer re-encoding between numeral bases `1..=64`.
//!
//! Bases 2, 8, 10 and 16 use native integer parsing and formatting over a
//! signed 64-bit value (2/8/16 read and write the two's-complement bit
//! pattern). Base 64 frames the value as 8 little-endian bytes in standard
//! base64. Every other base is positional over [`ALPHABET`].

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::protocol::{ConvertBaseRequest, ConvertBaseResponse};
use common::{ErrorCode, Tool};

/// Digit alphabet for custom bases. The digit value is the symbol's index.
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Smallest accepted base.
pub const MIN_BASE: u32 = 1;
/// Largest accepted base.
pub const MAX_BASE: u32 = 64;

/// How a base is read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Radix {
    /// 2, 8, 10 or 16.
    Native(u32),
    /// 8-byte little-endian base64 framing.
    Base64,
    /// Positional over [`ALPHABET`].
    Custom(u32),
}

impl Radix {
    fn classify(base: u32) -> Result<Self, ErrorCode> {
        match base {
            2 | 8 | 10 | 16 => Ok(Radix::Native(base)),
            64 => Ok(Radix::Base64),
            MIN_BASE..=MAX_BASE => Ok(Radix::Custom(base)),
            _ => Err(ErrorCode::WrongBase),
        }
    }

    fn parse(self, value: &str) -> Result<i64, ErrorCode> {
        match self {
            Radix::Native(10) => value.parse::<i64>().map_err(|_| ErrorCode::InputNotValid),
            Radix::Native(base) => u64::from_str_radix(value, base)
                .map(|bits| bits as i64)
                .map_err(|_| ErrorCode::InputNotValid),
            Radix::Base64 => {
                let bytes = STANDARD
                    .decode(value)
                    .map_err(|_| ErrorCode::InputNotValid)?;
                let bytes: [u8; 8] = bytes
                    .try_into()
                    .map_err(|_| ErrorCode::InputNotValid)?;
                Ok(i64::from_le_bytes(bytes))
            }
            Radix::Custom(base) => decode_custom(value, base),
        }
    }

    fn format(self, n: i64) -> Result<String, ErrorCode> {
        match self {
            Radix::Native(2) => Ok(format!("{n:b}")),
            Radix::Native(8) => Ok(format!("{n:o}")),
            Radix::Native(16) => Ok(format!("{n:x}")),
            Radix::Native(_) => Ok(n.to_string()),
            Radix::Base64 => Ok(STANDARD.encode(n.to_le_bytes())),
            Radix::Custom(base) => encode_custom(n, base),
        }
    }
}

fn digit_value(symbol: u8) -> Option<u32> {
    match symbol {
        b'A'..=b'Z' => Some(u32::from(symbol - b'A')),
        b'a'..=b'z' => Some(u32::from(symbol - b'a') + 26),
        b'0'..=b'9' => Some(u32::from(symbol - b'0') + 52),
        b'-' => Some(62),
        b'_' => Some(63),
        _ => None,
    }
}

fn decode_custom(value: &str, base: u32) -> Result<i64, ErrorCode> {
    let radix = i64::from(base);
    value.bytes().try_fold(0i64, |acc, symbol| {
        let digit = digit_value(symbol)
            .filter(|d| *d < base)
            .ok_or(ErrorCode::InputNotValid)?;
        acc.checked_mul(radix)
            .and_then(|v| v.checked_add(i64::from(digit)))
            .ok_or(ErrorCode::InputNotValid)
    })
}

fn encode_custom(n: i64, base: u32) -> Result<String, ErrorCode> {
    if n < 0 {
        return Err(ErrorCode::InputNotValid);
    }
    if n == 0 {
        return Ok(char::from(ALPHABET[0]).to_string());
    }
    // Base 1 only has the zero digit.
    if base == 1 {
        return Err(ErrorCode::InputNotValid);
    }

    let radix = i64::from(base);
    let mut rest = n;
    let mut digits = Vec::new();
    while rest > 0 {
        digits.push(ALPHABET[(rest % radix) as usize]);
        rest /= radix;
    }
    Ok(digits.iter().rev().map(|&d| char::from(d)).collect())
}

/// Re-encode `value` from `from_base` into `to_base`.
///
/// # Errors
///
/// - [`ErrorCode::WrongBase`] if either base is outside `1..=64`.
/// - [`ErrorCode::InputNotValid`] if `value` is empty, contains a symbol that
///   is not a digit of `from_base`, overflows 64 bits, or cannot be written in
///   `to_base`.
pub fn convert(value: &str, from_base: u32, to_base: u32) -> Result<String, ErrorCode> {
    let source = Radix::classify(from_base)?;
    let target = Radix::classify(to_base)?;
    if value.is_empty() {
        return Err(ErrorCode::InputNotValid);
    }
    if from_base == to_base {
        return Ok(value.to_owned());
    }
    target.format(source.parse(value)?)
}

/// `base.convert`: integer base conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseConverter;

impl Tool for BaseConverter {
    const NAME: &'static str = "base.convert";
    type Request = ConvertBaseRequest;
    type Response = ConvertBaseResponse;

    fn run(&self, request: ConvertBaseRequest) -> Result<ConvertBaseResponse, ErrorCode> {
        let value = convert(&request.value, request.from_base, request.to_base)?;
        Ok(ConvertBaseResponse {
            value,
            base: request.to_base,
        })
    }
}
