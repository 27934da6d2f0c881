use fapi_object_model::deserialize::deserialize_event;
use fapi_object_model::{DeserializeError, EventPayload};
use serde_json::{json, Value};
use tpm_mu::alg::TPM2_ALG_SHA256;

fn tss_event_document() -> Value {
    json!({
        "recnum": 1,
        "pcr": 16,
        "digests": [
            { "hashAlg": "SHA256", "digest": "aa".repeat(32) },
        ],
        "type": "tss2",
        "sub_event": {
            "data": "6576656e74",
            "event": { "free": "form", "nested": [1, 2] },
        },
    })
}

#[test]
fn symbolic_type_selects_the_structured_payload() {
    let event = deserialize_event(&tss_event_document()).unwrap();
    assert_eq!(event.recnum, 1);
    assert_eq!(event.pcr, 16);
    assert_eq!(event.digests.digests[0].hash_alg, TPM2_ALG_SHA256);
    assert_eq!(event.event_type, 2);

    let EventPayload::Tss(tss) = &event.payload else {
        panic!("expected tss payload");
    };
    assert_eq!(tss.data.0, b"event");
    // The free-form sub-object is kept as verbatim JSON text.
    let back: Value = serde_json::from_str(tss.event.as_ref().unwrap()).unwrap();
    assert_eq!(back, json!({ "free": "form", "nested": [1, 2] }));
}

#[test]
fn prefixed_symbolic_type_is_accepted() {
    let mut doc = tss_event_document();
    doc["type"] = json!("TPM2_tss2");
    let event = deserialize_event(&doc).unwrap();
    assert_eq!(event.event_type, 2);
}

#[test]
fn numeric_type_selects_the_ima_payload() {
    let event = deserialize_event(&json!({
        "recnum": 7,
        "pcr": 10,
        "digests": [],
        "type": 1,
        "sub_event": {
            "eventData": "bb".repeat(20),
            "eventName": "boot_aggregate",
        },
    }))
    .unwrap();
    assert_eq!(event.event_type, 1);
    let EventPayload::Ima(ima) = &event.payload else {
        panic!("expected ima payload");
    };
    assert_eq!(ima.event_data.len(), 20);
    assert_eq!(ima.event_name, "boot_aggregate");
}

#[test]
fn tss_event_without_free_form_payload() {
    let mut doc = tss_event_document();
    doc["sub_event"].as_object_mut().unwrap().remove("event");
    let event = deserialize_event(&doc).unwrap();
    let EventPayload::Tss(tss) = &event.payload else {
        panic!("expected tss payload");
    };
    assert!(tss.event.is_none());
}

#[test]
fn unresolvable_symbolic_type_is_malformed() {
    let mut doc = tss_event_document();
    doc["type"] = json!("no-such-kind");
    assert!(matches!(
        deserialize_event(&doc),
        Err(DeserializeError::MalformedValue { .. })
    ));
}

#[test]
fn unknown_numeric_type_is_malformed_even_with_valid_payload() {
    let mut doc = tss_event_document();
    doc["type"] = json!(400);
    match deserialize_event(&doc) {
        Err(DeserializeError::MalformedValue { field, reason }) => {
            assert_eq!(field, Some("type"));
            assert!(reason.contains("400"), "reason was: {reason}");
        }
        other => panic!("expected MalformedValue, got {other:?}"),
    }
}

#[test]
fn missing_required_fields_are_named() {
    for field in ["recnum", "pcr", "digests", "type", "sub_event"] {
        let mut doc = tss_event_document();
        doc.as_object_mut().unwrap().remove(field);
        match deserialize_event(&doc) {
            Err(DeserializeError::MissingField(name)) => assert_eq!(name, field),
            other => panic!("expected MissingField({field}), got {other:?}"),
        }
    }
}
