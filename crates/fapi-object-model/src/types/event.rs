//! PCR event records.

use tpm_mu::{Tpm2bDigest, Tpm2bEvent, TpmlDigestValues};

use crate::constants::{IFAPI_IMA_EVENT_TAG, IFAPI_TSS_EVENT_TAG};

/// An event produced through the feature API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TssEvent {
    pub data: Tpm2bEvent,
    /// Arbitrary caller-supplied JSON, kept as its verbatim text because the
    /// object model never looks inside it.
    pub event: Option<String>,
}

/// A legacy IMA measurement event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImaEvent {
    pub event_data: Tpm2bDigest,
    pub event_name: String,
}

/// Kind-specific payload of an event record. The tag space is open: values
/// outside the known set are ordinary malformed input, not internal errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    Tss(TssEvent),
    Ima(ImaEvent),
}

impl EventPayload {
    pub fn tag(&self) -> u32 {
        match self {
            EventPayload::Tss(_) => IFAPI_TSS_EVENT_TAG,
            EventPayload::Ima(_) => IFAPI_IMA_EVENT_TAG,
        }
    }
}

/// One record of the event log: PCR bookkeeping plus a kind-tagged payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FapiEvent {
    pub recnum: u32,
    pub pcr: u32,
    pub digests: TpmlDigestValues,
    /// The raw tag as decoded; always consistent with `payload`.
    pub event_type: u32,
    pub payload: EventPayload,
}
