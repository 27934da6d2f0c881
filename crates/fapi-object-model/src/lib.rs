//! Typed object-model records and their JSON deserializer.
//!
//! The object store keeps keys, NV indexes, hierarchies, duplication blobs,
//! policies and PCR events as JSON documents. This crate decodes those
//! documents into strongly typed records: per-record decoding rules,
//! optional-field defaulting, allow-list detection of unknown keys, and
//! discriminated-union dispatch keyed on tag values read from the same
//! document.
//!
//! Decoding never mutates the input tree and carries no shared mutable
//! state; the only globals are immutable lookup tables. There is no
//! encoder here, and no recursion-depth limit: callers feeding untrusted
//! documents must bound nesting upstream.

pub mod constants;
pub mod deserialize;
pub mod error;
pub mod types;

pub use deserialize::{deserialize_event, deserialize_import_key, deserialize_object};
pub use error::DeserializeError;
pub use types::{
    ByteBuffer, EventPayload, FapiDuplicate, FapiEvent, FapiExtPubKey, FapiHierarchy, FapiKey,
    FapiNvIndex, FapiObject, FapiObjectBody, FapiQuoteInfo, ImaEvent, ObjectType, Policy,
    TpmYesNo, TssEvent,
};
