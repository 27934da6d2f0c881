use fapi_object_model::deserialize::{
    deserialize_key, deserialize_object, deserialize_quote_info,
};
use fapi_object_model::{DeserializeError, FapiObjectBody, ObjectType, TpmYesNo};
use serde_json::{json, Value};
use tpm_mu::alg::{TPM2_ALG_KEYEDHASH, TPM2_ALG_RSA, TPM2_ALG_RSASSA, TPM2_ALG_SHA256};

fn key_document() -> Value {
    json!({
        "objectType": 1,
        "persistent_handle": "0x81000001",
        "public": {
            "size": 0,
            "publicArea": {
                "type": "TPM2_ALG_RSA",
                "nameAlg": "SHA256",
                "objectAttributes": 262258,
                "authPolicy": "",
                "unique": "c0ffee",
            },
        },
        "serialization": "0a0b0c",
        "policyInstance": "",
        "description": "signing key",
        "certificate": "",
        "signing_scheme": {
            "scheme": "RSASSA",
            "details": { "hashAlg": "SHA256" },
        },
        "name": "000b112233",
    })
}

#[test]
fn key_decode_applies_documented_defaults() {
    let key = deserialize_key(&key_document()).unwrap();
    assert_eq!(key.persistent_handle, 0x8100_0001);
    assert_eq!(key.public.public_area.type_, TPM2_ALG_RSA);
    assert_eq!(key.public.public_area.name_alg, TPM2_ALG_SHA256);
    assert_eq!(key.public.public_area.unique, vec![0xc0, 0xff, 0xee]);
    assert_eq!(key.signing_scheme.scheme, TPM2_ALG_RSASSA);
    assert_eq!(key.description, "signing key");

    // Absent optionals take their documented defaults.
    assert_eq!(key.with_auth, TpmYesNo::No);
    assert!(key.private.is_empty());
    assert!(key.app_data.is_empty());
    assert!(key.creation_data.is_empty());
    assert!(key.creation_hash.is_empty());
    assert_eq!(key.creation_ticket.tag, 0);
    assert_eq!(key.reset_count, 0);
    assert_eq!(key.delete_prohibited, TpmYesNo::No);
}

#[test]
fn key_decode_names_the_missing_field() {
    for field in [
        "persistent_handle",
        "public",
        "serialization",
        "policyInstance",
        "description",
        "certificate",
        "signing_scheme",
        "name",
    ] {
        let mut doc = key_document();
        doc.as_object_mut().unwrap().remove(field);
        match deserialize_key(&doc) {
            Err(DeserializeError::MissingField(name)) => assert_eq!(name, field),
            other => panic!("expected MissingField({field}), got {other:?}"),
        }
    }
}

#[test]
fn keyed_hash_key_skips_signing_scheme_entirely() {
    let mut doc = key_document();
    doc["public"]["publicArea"]["type"] = json!("KEYEDHASH");
    doc.as_object_mut().unwrap().remove("signing_scheme");
    let key = deserialize_key(&doc).unwrap();
    assert_eq!(key.public.public_area.type_, TPM2_ALG_KEYEDHASH);
    assert_eq!(key.signing_scheme.scheme, 0);
}

#[test]
fn wrapper_dispatches_key_and_layers_common_fields() {
    let mut doc = key_document();
    doc["system"] = json!("yes");
    doc["policy"] = json!({
        "description": "attached",
        "policy": [ { "type": "POLICYAUTHVALUE" } ],
    });
    let object = deserialize_object(&doc).unwrap();
    assert_eq!(object.object_type(), ObjectType::Key);
    assert_eq!(object.system, TpmYesNo::Yes);
    let policy = object.policy.expect("policy sub-record");
    assert_eq!(policy.description, "attached");
    assert!(matches!(object.body, FapiObjectBody::Key(_)));
}

#[test]
fn wrapper_defaults_system_and_policy() {
    let object = deserialize_object(&key_document()).unwrap();
    assert_eq!(object.system, TpmYesNo::No);
    assert!(object.policy.is_none());
}

#[test]
fn wrapper_rejects_unknown_tag_as_internal() {
    let mut doc = key_document();
    doc["objectType"] = json!(99);
    match deserialize_object(&doc) {
        Err(DeserializeError::UnknownVariant(99)) => {}
        other => panic!("expected UnknownVariant, got {other:?}"),
    }
    // A non-numeric tag is malformed input, not an unknown variant.
    doc["objectType"] = json!("keyish");
    assert!(matches!(
        deserialize_object(&doc),
        Err(DeserializeError::MalformedValue { .. })
    ));
}

#[test]
fn hierarchy_variant_derives_a_name() {
    let object = deserialize_object(&json!({
        "objectType": 4,
        "authPolicy": "",
        "description": "owner hierarchy",
    }))
    .unwrap();
    let FapiObjectBody::Hierarchy(hierarchy) = &object.body else {
        panic!("expected hierarchy body");
    };
    // esysHandle defaults to the owner hierarchy; its name is the TPM
    // owner handle marshalled big-endian.
    assert_eq!(hierarchy.esys_handle, 0x101);
    assert_eq!(hierarchy.name.0, vec![0x40, 0x00, 0x00, 0x01]);
    assert_eq!(hierarchy.with_auth, TpmYesNo::No);
}

#[test]
fn nv_index_decode_matrix() {
    let doc = json!({
        "objectType": 2,
        "public": {
            "size": 0,
            "nvPublic": {
                "nvIndex": "0x1000000",
                "nameAlg": "SHA256",
                "attributes": 66052,
                "dataSize": 64,
            },
        },
        "serialization": "",
        "hierarchy": 0x101,
        "policyInstance": "",
        "description": "counter",
    });
    let object = deserialize_object(&doc).unwrap();
    let FapiObjectBody::NvIndex(nv) = &object.body else {
        panic!("expected NV body");
    };
    assert_eq!(nv.public.nv_public.nv_index, 0x0100_0000);
    assert_eq!(nv.public.nv_public.data_size, 64);
    assert_eq!(nv.with_auth, TpmYesNo::No);
    assert!(nv.app_data.is_empty());
    assert!(nv.event_log.is_none());
}

#[test]
fn duplicate_decode_allocates_policy_only_if_present() {
    let mut doc = json!({
        "objectType": 5,
        "duplicate": "0001",
        "encrypted_seed": "0203",
        "public": {
            "publicArea": { "type": "RSA", "nameAlg": "SHA256" },
        },
        "public_parent": {
            "publicArea": { "type": "RSA", "nameAlg": "SHA256" },
        },
    });
    let object = deserialize_object(&doc).unwrap();
    let FapiObjectBody::Duplicate(blob) = &object.body else {
        panic!("expected duplicate body");
    };
    assert!(blob.certificate.is_none());
    assert!(blob.policy.is_none());

    doc["policy"] = json!({
        "description": "dup policy",
        "policy": [],
    });
    let object = deserialize_object(&doc).unwrap();
    let FapiObjectBody::Duplicate(blob) = &object.body else {
        panic!("expected duplicate body");
    };
    assert_eq!(blob.policy.as_ref().unwrap().description, "dup policy");
}

#[test]
fn ext_pub_key_decode_matrix() {
    let object = deserialize_object(&json!({
        "objectType": 3,
        "pem_ext_public": "-----BEGIN PUBLIC KEY-----",
    }))
    .unwrap();
    let FapiObjectBody::ExtPubKey(key) = &object.body else {
        panic!("expected external key body");
    };
    assert!(key.certificate.is_none());
    assert_eq!(key.public.public_area.type_, 0);
}

#[test]
fn quote_info_decode_matrix() {
    let info = deserialize_quote_info(&json!({
        "sig_scheme": {
            "scheme": "RSASSA",
            "details": { "hashAlg": "SHA256" },
        },
        "attest": "ff54434780180022",
    }))
    .unwrap();
    assert_eq!(info.sig_scheme.scheme, TPM2_ALG_RSASSA);
    assert_eq!(info.attest.len(), 8);

    assert!(matches!(
        deserialize_quote_info(&json!({ "attest": "" })),
        Err(DeserializeError::MissingField("sig_scheme"))
    ));
}

#[test]
fn decode_is_idempotent() {
    let doc = key_document();
    let first = deserialize_object(&doc).unwrap();
    let second = deserialize_object(&doc).unwrap();
    assert_eq!(first, second);
}
