//! JSON decoders for the hardware-defined structures of `tpm-mu`.

use serde_json::Value;
use tpm_mu::alg::{hash_size, TPM2_ALG_NULL};
use tpm_mu::{
    Tpm2bAttest, Tpm2bCreationData, Tpm2bDigest, Tpm2bEncryptedSecret, Tpm2bEvent, Tpm2bName,
    Tpm2bNvPublic, Tpm2bPrivate, Tpm2bPublic, TpmlDigestValues, TpmsNvPublic, TpmtHa, TpmtPublic,
    TpmtSigScheme, TpmtTkCreation,
};

use crate::constants::{ALG_TABLE, RH_TABLE, TPM2_NUM_PCR_BANKS};
use crate::deserialize::fields::{bad_value, get_sub_object, required};
use crate::deserialize::scalar::{deserialize_byte_buffer, deserialize_u16, deserialize_u32};
use crate::deserialize::token::{deserialize_constant_u16, deserialize_constant_u32};
use crate::error::DeserializeError;

fn sized_bytes(jso: &Value) -> Result<Vec<u8>, DeserializeError> {
    Ok(deserialize_byte_buffer(jso)?.as_slice().to_vec())
}

pub fn deserialize_tpm2b_digest(jso: &Value) -> Result<Tpm2bDigest, DeserializeError> {
    Ok(Tpm2bDigest(sized_bytes(jso)?))
}

pub fn deserialize_tpm2b_name(jso: &Value) -> Result<Tpm2bName, DeserializeError> {
    Ok(Tpm2bName(sized_bytes(jso)?))
}

pub fn deserialize_tpm2b_private(jso: &Value) -> Result<Tpm2bPrivate, DeserializeError> {
    Ok(Tpm2bPrivate(sized_bytes(jso)?))
}

pub fn deserialize_tpm2b_encrypted_secret(
    jso: &Value,
) -> Result<Tpm2bEncryptedSecret, DeserializeError> {
    Ok(Tpm2bEncryptedSecret(sized_bytes(jso)?))
}

pub fn deserialize_tpm2b_creation_data(jso: &Value) -> Result<Tpm2bCreationData, DeserializeError> {
    Ok(Tpm2bCreationData(sized_bytes(jso)?))
}

pub fn deserialize_tpm2b_event(jso: &Value) -> Result<Tpm2bEvent, DeserializeError> {
    Ok(Tpm2bEvent(sized_bytes(jso)?))
}

pub fn deserialize_tpm2b_attest(jso: &Value) -> Result<Tpm2bAttest, DeserializeError> {
    Ok(Tpm2bAttest(sized_bytes(jso)?))
}

/// Decodes a public area from its structured JSON form.
pub fn deserialize_tpmt_public(jso: &Value) -> Result<TpmtPublic, DeserializeError> {
    let type_ =
        deserialize_constant_u16(required(jso, "type")?, &ALG_TABLE).map_err(bad_value("type"))?;
    let name_alg = deserialize_constant_u16(required(jso, "nameAlg")?, &ALG_TABLE)
        .map_err(bad_value("nameAlg"))?;
    let object_attributes = match get_sub_object(jso, "objectAttributes") {
        Some(jso2) => deserialize_u32(jso2).map_err(bad_value("objectAttributes"))?,
        None => 0,
    };
    let auth_policy = match get_sub_object(jso, "authPolicy") {
        Some(jso2) => deserialize_tpm2b_digest(jso2).map_err(bad_value("authPolicy"))?,
        None => Tpm2bDigest::default(),
    };
    let unique = match get_sub_object(jso, "unique") {
        Some(jso2) => sized_bytes(jso2).map_err(bad_value("unique"))?,
        None => Vec::new(),
    };
    Ok(TpmtPublic {
        type_,
        name_alg,
        object_attributes,
        auth_policy,
        unique,
    })
}

/// Decodes a size-prefixed public area: `{"size": .., "publicArea": {..}}`.
pub fn deserialize_tpm2b_public(jso: &Value) -> Result<Tpm2bPublic, DeserializeError> {
    let size = match get_sub_object(jso, "size") {
        Some(jso2) => deserialize_u16(jso2).map_err(bad_value("size"))?,
        None => 0,
    };
    let public_area =
        deserialize_tpmt_public(required(jso, "publicArea")?).map_err(bad_value("publicArea"))?;
    Ok(Tpm2bPublic { size, public_area })
}

/// Decodes an NV public area from its structured JSON form.
pub fn deserialize_tpms_nv_public(jso: &Value) -> Result<TpmsNvPublic, DeserializeError> {
    let nv_index =
        deserialize_u32(required(jso, "nvIndex")?).map_err(bad_value("nvIndex"))?;
    let name_alg = deserialize_constant_u16(required(jso, "nameAlg")?, &ALG_TABLE)
        .map_err(bad_value("nameAlg"))?;
    let attributes = match get_sub_object(jso, "attributes") {
        Some(jso2) => deserialize_u32(jso2).map_err(bad_value("attributes"))?,
        None => 0,
    };
    let auth_policy = match get_sub_object(jso, "authPolicy") {
        Some(jso2) => deserialize_tpm2b_digest(jso2).map_err(bad_value("authPolicy"))?,
        None => Tpm2bDigest::default(),
    };
    let data_size =
        deserialize_u16(required(jso, "dataSize")?).map_err(bad_value("dataSize"))?;
    Ok(TpmsNvPublic {
        nv_index,
        name_alg,
        attributes,
        auth_policy,
        data_size,
    })
}

/// Decodes a size-prefixed NV public area: `{"size": .., "nvPublic": {..}}`.
pub fn deserialize_tpm2b_nv_public(jso: &Value) -> Result<Tpm2bNvPublic, DeserializeError> {
    let size = match get_sub_object(jso, "size") {
        Some(jso2) => deserialize_u16(jso2).map_err(bad_value("size"))?,
        None => 0,
    };
    let nv_public =
        deserialize_tpms_nv_public(required(jso, "nvPublic")?).map_err(bad_value("nvPublic"))?;
    Ok(Tpm2bNvPublic { size, nv_public })
}

/// Decodes a signature scheme: `{"scheme": .., "details": {"hashAlg": ..}}`.
///
/// A null scheme carries no details; any other scheme requires them.
pub fn deserialize_tpmt_sig_scheme(jso: &Value) -> Result<TpmtSigScheme, DeserializeError> {
    let scheme = deserialize_constant_u16(required(jso, "scheme")?, &ALG_TABLE)
        .map_err(bad_value("scheme"))?;
    if scheme == TPM2_ALG_NULL {
        return Ok(TpmtSigScheme { scheme, hash_alg: 0 });
    }
    let details = required(jso, "details")?;
    let hash_alg = deserialize_constant_u16(required(details, "hashAlg")?, &ALG_TABLE)
        .map_err(bad_value("hashAlg"))?;
    Ok(TpmtSigScheme { scheme, hash_alg })
}

/// Decodes a creation ticket: `{"tag": .., "hierarchy": .., "digest": ..}`.
pub fn deserialize_tpmt_tk_creation(jso: &Value) -> Result<TpmtTkCreation, DeserializeError> {
    let tag = deserialize_u16(required(jso, "tag")?).map_err(bad_value("tag"))?;
    let hierarchy = deserialize_constant_u32(required(jso, "hierarchy")?, &RH_TABLE)
        .map_err(bad_value("hierarchy"))?;
    let digest =
        deserialize_tpm2b_digest(required(jso, "digest")?).map_err(bad_value("digest"))?;
    Ok(TpmtTkCreation {
        tag,
        hierarchy,
        digest,
    })
}

fn deserialize_tpmt_ha(jso: &Value) -> Result<TpmtHa, DeserializeError> {
    let hash_alg = deserialize_constant_u16(required(jso, "hashAlg")?, &ALG_TABLE)
        .map_err(bad_value("hashAlg"))?;
    let digest = sized_bytes(required(jso, "digest")?).map_err(bad_value("digest"))?;
    match hash_size(hash_alg) {
        Some(expected) if expected == digest.len() => Ok(TpmtHa { hash_alg, digest }),
        Some(expected) => Err(DeserializeError::malformed(format!(
            "digest is {} bytes, {expected} expected",
            digest.len()
        ))),
        None => Err(DeserializeError::malformed(format!(
            "{hash_alg:#06x} is not a hash algorithm"
        ))),
    }
}

/// Decodes a digest list: a JSON array of `{"hashAlg": .., "digest": ..}`.
pub fn deserialize_tpml_digest_values(jso: &Value) -> Result<TpmlDigestValues, DeserializeError> {
    let items = jso
        .as_array()
        .ok_or_else(|| DeserializeError::malformed(format!("expected an array, got {jso}")))?;
    if items.len() > TPM2_NUM_PCR_BANKS {
        return Err(DeserializeError::malformed(format!(
            "{} digests exceed the {TPM2_NUM_PCR_BANKS} bank limit",
            items.len()
        )));
    }
    let mut digests = Vec::with_capacity(items.len());
    for item in items {
        digests.push(deserialize_tpmt_ha(item)?);
    }
    Ok(TpmlDigestValues { digests })
}
