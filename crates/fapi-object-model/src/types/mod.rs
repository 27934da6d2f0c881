//! Object-model record types.

pub mod event;
pub mod object;
pub mod policy;

pub use event::*;
pub use object::*;
pub use policy::*;

use crate::error::DeserializeError;

/// A yes/no flag as the TPM encodes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TpmYesNo {
    Yes,
    #[default]
    No,
}

impl TpmYesNo {
    pub fn is_yes(self) -> bool {
        matches!(self, TpmYesNo::Yes)
    }

    /// The inverse flag.
    pub fn inverted(self) -> Self {
        match self {
            TpmYesNo::Yes => TpmYesNo::No,
            TpmYesNo::No => TpmYesNo::Yes,
        }
    }
}

/// An owned binary payload decoded from a hex/base64 string field.
///
/// Allocation goes through `try_reserve_exact`, so allocator exhaustion
/// surfaces as [`DeserializeError::OutOfMemory`] instead of aborting the
/// process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer(Vec<u8>);

impl ByteBuffer {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, DeserializeError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(bytes.len())
            .map_err(|_| DeserializeError::OutOfMemory)?;
        buf.extend_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Wraps an already-owned payload without copying.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_no_default_and_inverse() {
        assert_eq!(TpmYesNo::default(), TpmYesNo::No);
        assert!(TpmYesNo::Yes.is_yes());
        assert_eq!(TpmYesNo::Yes.inverted(), TpmYesNo::No);
        assert_eq!(TpmYesNo::No.inverted(), TpmYesNo::Yes);
    }

    #[test]
    fn byte_buffer_default_is_empty() {
        let buf = ByteBuffer::default();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.as_slice(), &[] as &[u8]);
    }
}
