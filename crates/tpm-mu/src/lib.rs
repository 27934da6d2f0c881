//! Fixed-format (un)marshalling for hardware-defined TPM structures.
//!
//! Every structure reads and writes the TPM wire layout: big-endian
//! integers, `TPM2B_*` payloads behind a `u16` size prefix. Unmarshal
//! functions take a buffer and a running offset and leave the offset just
//! past the bytes they consumed, so callers can chain reads over one blob.

pub mod alg;
pub mod reader;
pub mod types;

pub use reader::Reader;
pub use types::*;

use thiserror::Error;

/// Errors produced while unmarshalling a wire-format structure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MuError {
    #[error("buffer truncated: need {need} bytes at offset {offset}, have {have}")]
    Truncated {
        need: usize,
        offset: usize,
        have: usize,
    },
    #[error("size field {size} exceeds remaining buffer {remaining}")]
    SizeExceedsBuffer { size: usize, remaining: usize },
    #[error("bad structure tag {0:#06x}")]
    BadTag(u16),
}
