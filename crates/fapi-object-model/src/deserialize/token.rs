//! Numeric-or-symbolic constant resolution.
//!
//! A constant token is first tried as a number (`0x` prefix selects hex).
//! Only when the whole token parses is the numeric interpretation taken; a
//! partial parse ("26x") rejects the token rather than truncating it. The
//! symbolic fallback strips one known prefix, then scans a name table
//! case-insensitively over the shorter of the two lengths, first match wins.

use serde_json::Value;

use crate::constants::TSS_CONST_PREFIXES;
use crate::error::DeserializeError;

/// Parses a decimal or `0x`-prefixed hex literal; `None` unless the entire
/// token is consumed.
pub fn parse_number(token: &str) -> Option<i64> {
    match token.strip_prefix("0x") {
        Some(rest) => i64::from_str_radix(rest, 16).ok(),
        None => token.parse::<i64>().ok(),
    }
}

/// Byte index after the first matching known prefix, 0 when none matches.
pub fn token_start_index(token: &str) -> usize {
    let token = token.as_bytes();
    for prefix in TSS_CONST_PREFIXES {
        let prefix = prefix.as_bytes();
        if token.len() >= prefix.len() && token[..prefix.len()].eq_ignore_ascii_case(prefix) {
            return prefix.len();
        }
    }
    0
}

/// Resolves a symbolic token against a name table.
///
/// The comparison covers the shorter of the stripped token and the table
/// name, so an unambiguous truncated token resolves to the first entry it
/// prefixes.
pub fn lookup_symbol(token: &str, table: &[(u32, &str)]) -> Option<u32> {
    let rest = &token.as_bytes()[token_start_index(token)..];
    if rest.is_empty() {
        return None;
    }
    for &(value, name) in table {
        let name = name.as_bytes();
        let len = rest.len().min(name.len());
        if rest[..len].eq_ignore_ascii_case(&name[..len]) {
            return Some(value);
        }
    }
    None
}

/// The token text of a leaf node: a string as-is, a number as its decimal
/// rendering.
pub fn token_text(jso: &Value) -> Result<String, DeserializeError> {
    match jso {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(DeserializeError::malformed(format!(
            "expected a constant token, got {other}"
        ))),
    }
}

fn resolve(jso: &Value, table: &[(u32, &str)]) -> Result<i64, DeserializeError> {
    let token = token_text(jso)?;
    if let Some(num) = parse_number(&token) {
        return Ok(num);
    }
    match lookup_symbol(&token, table) {
        Some(value) => Ok(i64::from(value)),
        None => Err(DeserializeError::malformed(format!(
            "undefined constant \"{token}\""
        ))),
    }
}

/// Decodes a constant into a `u32`-wide value.
pub fn deserialize_constant_u32(
    jso: &Value,
    table: &[(u32, &str)],
) -> Result<u32, DeserializeError> {
    let num = resolve(jso, table)?;
    u32::try_from(num)
        .map_err(|_| DeserializeError::malformed(format!("constant {num} out of range")))
}

/// Decodes a constant into a `u16`-wide value.
///
/// The numeric parse may succeed and the value still be rejected here when
/// it does not fit the target width.
pub fn deserialize_constant_u16(
    jso: &Value,
    table: &[(u32, &str)],
) -> Result<u16, DeserializeError> {
    let num = resolve(jso, table)?;
    u16::try_from(num)
        .map_err(|_| DeserializeError::malformed(format!("constant {num} out of range")))
}
