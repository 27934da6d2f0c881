//! Leaf decoders for primitive JSON values.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use crate::deserialize::token::parse_number;
use crate::error::DeserializeError;
use crate::types::{ByteBuffer, TpmYesNo};

/// Duplicates a JSON string into an owned `String`.
pub fn deserialize_string(jso: &Value) -> Result<String, DeserializeError> {
    match jso {
        Value::String(s) => Ok(s.clone()),
        other => Err(DeserializeError::malformed(format!(
            "expected a string, got {other}"
        ))),
    }
}

fn integer_value(jso: &Value) -> Result<i64, DeserializeError> {
    match jso {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| DeserializeError::malformed(format!("{n} is not an integer"))),
        Value::String(s) => parse_number(s)
            .ok_or_else(|| DeserializeError::malformed(format!("\"{s}\" is not a number"))),
        other => Err(DeserializeError::malformed(format!(
            "expected a number, got {other}"
        ))),
    }
}

/// Decodes a `u32` from a number or a decimal/hex string.
pub fn deserialize_u32(jso: &Value) -> Result<u32, DeserializeError> {
    let num = integer_value(jso)?;
    u32::try_from(num)
        .map_err(|_| DeserializeError::malformed(format!("{num} does not fit in 32 bits")))
}

/// Decodes a `u16`; out-of-range values are an error, never truncated.
pub fn deserialize_u16(jso: &Value) -> Result<u16, DeserializeError> {
    let num = integer_value(jso)?;
    u16::try_from(num)
        .map_err(|_| DeserializeError::malformed(format!("{num} does not fit in 16 bits")))
}

/// Decodes a `u8`; out-of-range values are an error, never truncated.
pub fn deserialize_u8(jso: &Value) -> Result<u8, DeserializeError> {
    let num = integer_value(jso)?;
    u8::try_from(num)
        .map_err(|_| DeserializeError::malformed(format!("{num} does not fit in 8 bits")))
}

/// Decodes a yes/no flag from its symbolic tokens, booleans, or 0/1.
pub fn deserialize_yes_no(jso: &Value) -> Result<TpmYesNo, DeserializeError> {
    match jso {
        Value::String(s) if s.eq_ignore_ascii_case("yes") => Ok(TpmYesNo::Yes),
        Value::String(s) if s.eq_ignore_ascii_case("no") => Ok(TpmYesNo::No),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(TpmYesNo::Yes),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(TpmYesNo::No),
        Value::Bool(true) => Ok(TpmYesNo::Yes),
        Value::Bool(false) => Ok(TpmYesNo::No),
        Value::Number(n) if n.as_u64() == Some(1) => Ok(TpmYesNo::Yes),
        Value::Number(n) if n.as_u64() == Some(0) => Ok(TpmYesNo::No),
        other => Err(DeserializeError::malformed(format!(
            "expected yes/no, got {other}"
        ))),
    }
}

fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.len() % 2 == 0 && s.bytes().all(|c| hex_nibble(c).is_some())
}

fn hex_decode(s: &str) -> Result<ByteBuffer, DeserializeError> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    out.try_reserve_exact(bytes.len() / 2)
        .map_err(|_| DeserializeError::OutOfMemory)?;
    for pair in bytes.chunks_exact(2) {
        // is_hex() ran first, both nibbles are valid
        let hi = hex_nibble(pair[0]).unwrap_or(0);
        let lo = hex_nibble(pair[1]).unwrap_or(0);
        out.push(hi << 4 | lo);
    }
    Ok(ByteBuffer::from_vec(out))
}

/// Decodes an owned byte buffer.
///
/// A string is decoded as hex when it looks like hex (even length, hex
/// digits only), otherwise as standard base64. An array of numbers is taken
/// as raw byte values. The empty string yields an empty buffer.
pub fn deserialize_byte_buffer(jso: &Value) -> Result<ByteBuffer, DeserializeError> {
    match jso {
        Value::String(s) if s.is_empty() => Ok(ByteBuffer::empty()),
        Value::String(s) if is_hex(s) => hex_decode(s),
        Value::String(s) => match STANDARD.decode(s) {
            Ok(bytes) => Ok(ByteBuffer::from_vec(bytes)),
            Err(err) => Err(DeserializeError::malformed(format!(
                "neither hex nor base64: {err}"
            ))),
        },
        Value::Array(items) => {
            let mut out = Vec::new();
            out.try_reserve_exact(items.len())
                .map_err(|_| DeserializeError::OutOfMemory)?;
            for item in items {
                out.push(deserialize_u8(item)?);
            }
            Ok(ByteBuffer::from_vec(out))
        }
        other => Err(DeserializeError::malformed(format!(
            "expected a byte buffer, got {other}"
        ))),
    }
}
