//! Recursive, schema-driven JSON deserialization.
//!
//! Every decoder is a pure function of an input [`serde_json::Value`] node:
//! it pulls required and optional named fields, applies per-field defaults,
//! and recursively invokes child decoders. Failures propagate immediately
//! with `?`; a failed decode returns nothing, so callers never observe a
//! partially populated record.

pub mod event;
pub mod fields;
pub mod object;
pub mod policy;
pub mod scalar;
pub mod token;
pub mod tpm;

pub use event::{
    deserialize_event, deserialize_event_payload, deserialize_event_type, deserialize_ima_event,
    deserialize_tss_event,
};
pub use fields::{check_json_object_fields, get_sub_object};
pub use object::{
    deserialize_duplicate, deserialize_ext_pub_key, deserialize_hierarchy, deserialize_import_key,
    deserialize_key, deserialize_nv_index, deserialize_object, deserialize_object_type,
    deserialize_quote_info,
};
pub use policy::deserialize_policy;
