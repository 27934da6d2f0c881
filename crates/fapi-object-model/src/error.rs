//! Deserializer error type.

use thiserror::Error;
use tpm_mu::MuError;

/// Errors produced while decoding a JSON document into an object-model
/// record.
///
/// `UnknownVariant` is only returned for the closed `objectType`
/// discriminator; any value outside that set indicates a schema mismatch
/// rather than ordinary malformed input, so callers should treat it as an
/// internal failure. All other variants classify rejected input, except
/// `OutOfMemory` which reports allocator exhaustion.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("field \"{0}\" not found")]
    MissingField(&'static str),
    #[error("bad value{}: {reason}", field_suffix(.field))]
    MalformedValue {
        field: Option<&'static str>,
        reason: String,
    },
    #[error("out of memory")]
    OutOfMemory,
    #[error("invalid binary data: {0}")]
    InvalidBinaryPayload(#[from] MuError),
    #[error("invalid object type {0:#x}")]
    UnknownVariant(u32),
}

fn field_suffix(field: &Option<&'static str>) -> String {
    match field {
        Some(name) => format!(" for field \"{name}\""),
        None => String::new(),
    }
}

impl DeserializeError {
    /// A malformed-value error not yet attributed to a field.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedValue {
            field: None,
            reason: reason.into(),
        }
    }

    /// Attributes a leaf malformed-value error to the field being decoded.
    ///
    /// Errors that already carry a field name (from a nested composite) pass
    /// through unchanged, so the innermost attribution wins.
    pub fn for_field(self, field: &'static str) -> Self {
        match self {
            Self::MalformedValue {
                field: None,
                reason,
            } => Self::MalformedValue {
                field: Some(field),
                reason,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_attribution_is_innermost() {
        let err = DeserializeError::malformed("not a number").for_field("pcr");
        assert_eq!(
            err.to_string(),
            "bad value for field \"pcr\": not a number"
        );
        let err = err.for_field("outer");
        assert_eq!(
            err.to_string(),
            "bad value for field \"pcr\": not a number"
        );
    }

    #[test]
    fn missing_field_names_the_field() {
        let err = DeserializeError::MissingField("public");
        assert_eq!(err.to_string(), "field \"public\" not found");
    }
}
