use fapi_object_model::deserialize::deserialize_import_key;
use fapi_object_model::{DeserializeError, TpmYesNo};
use serde_json::json;
use tpm_mu::alg::{TPM2_ALG_RSA, TPM2_ALG_SHA256};
use tpm_mu::{Tpm2bDigest, Tpm2bPrivate, Tpm2bPublic, TpmtPublic};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn public_blob() -> (Tpm2bPublic, String) {
    let public = Tpm2bPublic::from_public_area(TpmtPublic {
        type_: TPM2_ALG_RSA,
        name_alg: TPM2_ALG_SHA256,
        object_attributes: 0x0004_0072,
        auth_policy: Tpm2bDigest(vec![0x11; 32]),
        unique: vec![0xaa, 0xbb],
    });
    let mut blob = Vec::new();
    public.marshal(&mut blob);
    (public, hex(&blob))
}

#[test]
fn import_reparses_the_public_blob() {
    let (public, blob) = public_blob();
    let key = deserialize_import_key(&json!({ "public": blob })).unwrap();
    assert_eq!(key.public, public);
    // Absent noauth means the key is auth-protected.
    assert_eq!(key.with_auth, TpmYesNo::Yes);
    assert!(key.private.is_empty());
}

#[test]
fn import_inverts_the_noauth_flag() {
    let (_, blob) = public_blob();
    let key = deserialize_import_key(&json!({ "noauth": "yes", "public": blob })).unwrap();
    assert_eq!(key.with_auth, TpmYesNo::No);
    let key = deserialize_import_key(&json!({ "noauth": "no", "public": blob })).unwrap();
    assert_eq!(key.with_auth, TpmYesNo::Yes);
}

#[test]
fn import_extracts_the_inner_private_payload() {
    let (_, blob) = public_blob();
    let mut private_blob = Vec::new();
    Tpm2bPrivate(vec![0xde, 0xad, 0xbe, 0xef]).marshal(&mut private_blob);
    let key = deserialize_import_key(&json!({
        "public": blob,
        "private": hex(&private_blob),
    }))
    .unwrap();
    assert_eq!(key.private.as_slice(), &[0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn import_guarantees_owned_empty_strings() {
    let (_, blob) = public_blob();
    let key = deserialize_import_key(&json!({ "public": blob })).unwrap();
    assert_eq!(key.policy_instance, "");
    assert_eq!(key.description, "");
    assert_eq!(key.certificate, "");
}

#[test]
fn import_classifies_binary_failures() {
    assert!(matches!(
        deserialize_import_key(&json!({ "public": "0001" })),
        Err(DeserializeError::InvalidBinaryPayload(_))
    ));
    assert!(matches!(
        deserialize_import_key(&json!({})),
        Err(DeserializeError::MissingField("public"))
    ));

    let (_, blob) = public_blob();
    // A one-byte private blob cannot hold its own size prefix.
    assert!(matches!(
        deserialize_import_key(&json!({ "public": blob.clone(), "private": "00" })),
        Err(DeserializeError::InvalidBinaryPayload(_))
    ));
    assert!(matches!(
        deserialize_import_key(&json!({ "public": blob, "private": "!!" })),
        Err(DeserializeError::MalformedValue { .. })
    ));
}
