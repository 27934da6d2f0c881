//! Event record decoders and the event-kind dispatcher.

use serde_json::Value;
use tracing::{error, trace};

use crate::constants::{EVENT_TYPE_TABLE, IFAPI_IMA_EVENT_TAG, IFAPI_TSS_EVENT_TAG};
use crate::deserialize::fields::{bad_value, check_json_object_fields, get_sub_object, required};
use crate::deserialize::scalar::{deserialize_string, deserialize_u32};
use crate::deserialize::token::deserialize_constant_u32;
use crate::deserialize::tpm::{
    deserialize_tpm2b_digest, deserialize_tpm2b_event, deserialize_tpml_digest_values,
};
use crate::error::DeserializeError;
use crate::types::{EventPayload, FapiEvent, ImaEvent, TssEvent};

/// Decodes an event-kind tag, numeric or by symbolic name ("tss2",
/// "ima-legacy").
pub fn deserialize_event_type(jso: &Value) -> Result<u32, DeserializeError> {
    trace!("call");
    deserialize_constant_u32(jso, &EVENT_TYPE_TABLE)
}

static TSS_EVENT_FIELDS: [&str; 3] = ["data", "event", "$schema"];

/// Decodes a feature-API event.
pub fn deserialize_tss_event(jso: &Value) -> Result<TssEvent, DeserializeError> {
    trace!("call");
    check_json_object_fields(jso, &TSS_EVENT_FIELDS);

    let data = deserialize_tpm2b_event(required(jso, "data")?).map_err(bad_value("data"))?;
    // "event" can be an arbitrary JSON value. Its internals are never
    // accessed, so only the text representation is kept.
    let event = match get_sub_object(jso, "event") {
        Some(jso2) => Some(
            serde_json::to_string_pretty(jso2)
                .map_err(|err| DeserializeError::malformed(err.to_string()).for_field("event"))?,
        ),
        None => None,
    };

    trace!("true");
    Ok(TssEvent { data, event })
}

static IMA_EVENT_FIELDS: [&str; 5] = [
    "eventData",
    "eventdata",
    "eventName",
    "eventname",
    "$schema",
];

/// Decodes a legacy IMA event.
pub fn deserialize_ima_event(jso: &Value) -> Result<ImaEvent, DeserializeError> {
    trace!("call");
    check_json_object_fields(jso, &IMA_EVENT_FIELDS);

    let event_data =
        deserialize_tpm2b_digest(required(jso, "eventData")?).map_err(bad_value("eventData"))?;
    let event_name =
        deserialize_string(required(jso, "eventName")?).map_err(bad_value("eventName"))?;

    trace!("true");
    Ok(ImaEvent {
        event_data,
        event_name,
    })
}

/// Dispatches on an already-decoded event-kind tag.
///
/// The tag space is open: an unlisted value is ordinary malformed input,
/// unlike the closed object-type discriminator.
pub fn deserialize_event_payload(
    selector: u32,
    jso: &Value,
) -> Result<EventPayload, DeserializeError> {
    trace!("call");
    match selector {
        IFAPI_TSS_EVENT_TAG => Ok(EventPayload::Tss(deserialize_tss_event(jso)?)),
        IFAPI_IMA_EVENT_TAG => Ok(EventPayload::Ima(deserialize_ima_event(jso)?)),
        other => {
            error!("Undefined event type {other}.");
            Err(DeserializeError::malformed(format!(
                "undefined event type {other}"
            ))
            .for_field("type"))
        }
    }
}

static EVENT_FIELDS: [&str; 6] = ["recnum", "pcr", "digests", "type", "sub_event", "$schema"];

/// Decodes one event log record.
pub fn deserialize_event(jso: &Value) -> Result<FapiEvent, DeserializeError> {
    trace!("call");
    check_json_object_fields(jso, &EVENT_FIELDS);

    let recnum = deserialize_u32(required(jso, "recnum")?).map_err(bad_value("recnum"))?;
    let pcr = deserialize_u32(required(jso, "pcr")?).map_err(bad_value("pcr"))?;
    let digests =
        deserialize_tpml_digest_values(required(jso, "digests")?).map_err(bad_value("digests"))?;
    let event_type =
        deserialize_event_type(required(jso, "type")?).map_err(bad_value("type"))?;
    let payload = deserialize_event_payload(event_type, required(jso, "sub_event")?)
        .map_err(bad_value("sub_event"))?;

    trace!("true");
    Ok(FapiEvent {
        recnum,
        pcr,
        digests,
        event_type,
        payload,
    })
}
