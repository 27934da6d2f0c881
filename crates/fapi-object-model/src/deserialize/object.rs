//! Composite decoders for the object store records and the tagged wrapper
//! around them.

use serde_json::Value;
use tpm_mu::alg::TPM2_ALG_KEYEDHASH;
use tpm_mu::{Tpm2bCreationData, Tpm2bDigest, Tpm2bPublic, Tpm2bPrivate, TpmtSigScheme, TpmtTkCreation};
use tracing::trace;

use crate::constants::ESYS_TR_RH_OWNER;
use crate::deserialize::fields::{bad_value, check_json_object_fields, get_sub_object, required};
use crate::deserialize::policy::deserialize_policy;
use crate::deserialize::scalar::{
    deserialize_byte_buffer, deserialize_string, deserialize_u32, deserialize_yes_no,
};
use crate::deserialize::token::{parse_number, token_text};
use crate::deserialize::tpm::{
    deserialize_tpm2b_creation_data, deserialize_tpm2b_digest, deserialize_tpm2b_encrypted_secret,
    deserialize_tpm2b_name, deserialize_tpm2b_nv_public, deserialize_tpm2b_private,
    deserialize_tpm2b_public, deserialize_tpm2b_attest, deserialize_tpmt_sig_scheme,
    deserialize_tpmt_tk_creation,
};
use crate::error::DeserializeError;
use crate::types::{
    ByteBuffer, FapiDuplicate, FapiExtPubKey, FapiHierarchy, FapiKey, FapiNvIndex, FapiObject,
    FapiObjectBody, FapiQuoteInfo, ObjectType, Policy, TpmYesNo,
};

/// Decodes a key object.
pub fn deserialize_key(jso: &Value) -> Result<FapiKey, DeserializeError> {
    trace!("call");

    let persistent_handle =
        deserialize_u32(required(jso, "persistent_handle")?).map_err(bad_value("persistent_handle"))?;
    let with_auth = match get_sub_object(jso, "with_auth") {
        Some(jso2) => deserialize_yes_no(jso2).map_err(bad_value("with_auth"))?,
        None => TpmYesNo::No,
    };
    let public = deserialize_tpm2b_public(required(jso, "public")?).map_err(bad_value("public"))?;
    let serialization =
        deserialize_byte_buffer(required(jso, "serialization")?).map_err(bad_value("serialization"))?;
    let private = match get_sub_object(jso, "private") {
        Some(jso2) => deserialize_byte_buffer(jso2).map_err(bad_value("private"))?,
        None => ByteBuffer::empty(),
    };
    let app_data = match get_sub_object(jso, "appData") {
        Some(jso2) => deserialize_byte_buffer(jso2).map_err(bad_value("appData"))?,
        None => ByteBuffer::empty(),
    };
    let policy_instance =
        deserialize_string(required(jso, "policyInstance")?).map_err(bad_value("policyInstance"))?;
    let creation_data = match get_sub_object(jso, "creationData") {
        Some(jso2) => deserialize_tpm2b_creation_data(jso2).map_err(bad_value("creationData"))?,
        None => Tpm2bCreationData::default(),
    };
    let creation_hash = match get_sub_object(jso, "creationHash") {
        Some(jso2) => deserialize_tpm2b_digest(jso2).map_err(bad_value("creationHash"))?,
        None => Tpm2bDigest::default(),
    };
    let creation_ticket = match get_sub_object(jso, "creationTicket") {
        Some(jso2) => deserialize_tpmt_tk_creation(jso2).map_err(bad_value("creationTicket"))?,
        None => TpmtTkCreation::default(),
    };
    let description =
        deserialize_string(required(jso, "description")?).map_err(bad_value("description"))?;
    let certificate =
        deserialize_string(required(jso, "certificate")?).map_err(bad_value("certificate"))?;

    // Keyed hash objects do not need a signing scheme.
    let signing_scheme = if public.public_area.type_ != TPM2_ALG_KEYEDHASH {
        deserialize_tpmt_sig_scheme(required(jso, "signing_scheme")?)
            .map_err(bad_value("signing_scheme"))?
    } else {
        TpmtSigScheme::default()
    };

    let name = deserialize_tpm2b_name(required(jso, "name")?).map_err(bad_value("name"))?;
    let reset_count = match get_sub_object(jso, "reset_count") {
        Some(jso2) => deserialize_u32(jso2).map_err(bad_value("reset_count"))?,
        None => 0,
    };
    let delete_prohibited = match get_sub_object(jso, "delete_prohibited") {
        Some(jso2) => deserialize_yes_no(jso2).map_err(bad_value("delete_prohibited"))?,
        None => TpmYesNo::No,
    };

    trace!("true");
    Ok(FapiKey {
        persistent_handle,
        with_auth,
        public,
        serialization,
        private,
        app_data,
        policy_instance,
        creation_data,
        creation_hash,
        creation_ticket,
        description,
        certificate,
        signing_scheme,
        name,
        reset_count,
        delete_prohibited,
    })
}

static IMPORT_KEY_FIELDS: [&str; 4] = ["noauth", "public", "private", "$schema"];

/// Decodes import data into a key object.
///
/// The `public` and `private` fields arrive as generic byte blobs and are
/// re-parsed through the wire-format unmarshaler; the intermediate buffers
/// are dropped once the structured copies exist.
pub fn deserialize_import_key(jso: &Value) -> Result<FapiKey, DeserializeError> {
    trace!("call");
    check_json_object_fields(jso, &IMPORT_KEY_FIELDS);

    let mut out = FapiKey::default();
    out.with_auth = match get_sub_object(jso, "noauth") {
        Some(jso2) => deserialize_yes_no(jso2)
            .map_err(bad_value("noauth"))?
            .inverted(),
        None => TpmYesNo::Yes,
    };

    let public_blob =
        deserialize_byte_buffer(required(jso, "public")?).map_err(bad_value("public"))?;
    let mut offset = 0;
    out.public = Tpm2bPublic::unmarshal(public_blob.as_slice(), &mut offset)?;
    drop(public_blob);

    if let Some(jso2) = get_sub_object(jso, "private") {
        let private_blob = deserialize_byte_buffer(jso2).map_err(bad_value("private"))?;
        let mut offset = 0;
        let private = Tpm2bPrivate::unmarshal(private_blob.as_slice(), &mut offset)?;
        out.private = ByteBuffer::from_slice(&private.0)?;
    }

    // Import data carries none of these; the record guarantees owned,
    // non-absent strings.
    out.policy_instance = String::new();
    out.description = String::new();
    out.certificate = String::new();

    trace!("true");
    Ok(out)
}

/// Decodes an external public key object.
pub fn deserialize_ext_pub_key(jso: &Value) -> Result<FapiExtPubKey, DeserializeError> {
    trace!("call");

    let pem_ext_public =
        deserialize_string(required(jso, "pem_ext_public")?).map_err(bad_value("pem_ext_public"))?;
    let certificate = match get_sub_object(jso, "certificate") {
        Some(jso2) => Some(deserialize_string(jso2).map_err(bad_value("certificate"))?),
        None => None,
    };
    let public = match get_sub_object(jso, "public") {
        Some(jso2) => deserialize_tpm2b_public(jso2).map_err(bad_value("public"))?,
        None => Tpm2bPublic::default(),
    };

    trace!("true");
    Ok(FapiExtPubKey {
        pem_ext_public,
        certificate,
        public,
    })
}

/// Decodes an NV index object.
pub fn deserialize_nv_index(jso: &Value) -> Result<FapiNvIndex, DeserializeError> {
    trace!("call");

    let app_data = match get_sub_object(jso, "appData") {
        Some(jso2) => deserialize_byte_buffer(jso2).map_err(bad_value("appData"))?,
        None => ByteBuffer::empty(),
    };
    let with_auth = match get_sub_object(jso, "with_auth") {
        Some(jso2) => deserialize_yes_no(jso2).map_err(bad_value("with_auth"))?,
        None => TpmYesNo::No,
    };
    let public =
        deserialize_tpm2b_nv_public(required(jso, "public")?).map_err(bad_value("public"))?;
    let serialization =
        deserialize_byte_buffer(required(jso, "serialization")?).map_err(bad_value("serialization"))?;
    let hierarchy =
        deserialize_u32(required(jso, "hierarchy")?).map_err(bad_value("hierarchy"))?;
    let policy_instance =
        deserialize_string(required(jso, "policyInstance")?).map_err(bad_value("policyInstance"))?;
    let description =
        deserialize_string(required(jso, "description")?).map_err(bad_value("description"))?;
    let event_log = match get_sub_object(jso, "event_log") {
        Some(jso2) => Some(deserialize_string(jso2).map_err(bad_value("event_log"))?),
        None => None,
    };

    trace!("true");
    Ok(FapiNvIndex {
        with_auth,
        public,
        serialization,
        app_data,
        policy_instance,
        description,
        hierarchy,
        event_log,
    })
}

/// Decodes a hierarchy object.
pub fn deserialize_hierarchy(jso: &Value) -> Result<FapiHierarchy, DeserializeError> {
    trace!("call");

    let with_auth = match get_sub_object(jso, "with_auth") {
        Some(jso2) => deserialize_yes_no(jso2).map_err(bad_value("with_auth"))?,
        None => TpmYesNo::No,
    };
    let auth_policy =
        deserialize_tpm2b_digest(required(jso, "authPolicy")?).map_err(bad_value("authPolicy"))?;
    let description =
        deserialize_string(required(jso, "description")?).map_err(bad_value("description"))?;
    let esys_handle = match get_sub_object(jso, "esysHandle") {
        Some(jso2) => deserialize_u32(jso2).map_err(bad_value("esysHandle"))?,
        None => ESYS_TR_RH_OWNER,
    };

    trace!("true");
    Ok(FapiHierarchy {
        with_auth,
        auth_policy,
        description,
        esys_handle,
        name: Default::default(),
    })
}

static QUOTE_INFO_FIELDS: [&str; 3] = ["sig_scheme", "attest", "$schema"];

/// Decodes signed quote metadata.
pub fn deserialize_quote_info(jso: &Value) -> Result<FapiQuoteInfo, DeserializeError> {
    trace!("call");
    check_json_object_fields(jso, &QUOTE_INFO_FIELDS);

    let sig_scheme =
        deserialize_tpmt_sig_scheme(required(jso, "sig_scheme")?).map_err(bad_value("sig_scheme"))?;
    let attest =
        deserialize_tpm2b_attest(required(jso, "attest")?).map_err(bad_value("attest"))?;

    trace!("true");
    Ok(FapiQuoteInfo { sig_scheme, attest })
}

/// Decodes a key duplication blob.
pub fn deserialize_duplicate(jso: &Value) -> Result<FapiDuplicate, DeserializeError> {
    trace!("call");

    let duplicate =
        deserialize_tpm2b_private(required(jso, "duplicate")?).map_err(bad_value("duplicate"))?;
    let encrypted_seed = deserialize_tpm2b_encrypted_secret(required(jso, "encrypted_seed")?)
        .map_err(bad_value("encrypted_seed"))?;
    let certificate = match get_sub_object(jso, "certificate") {
        Some(jso2) => Some(deserialize_string(jso2).map_err(bad_value("certificate"))?),
        None => None,
    };
    let public = deserialize_tpm2b_public(required(jso, "public")?).map_err(bad_value("public"))?;
    let public_parent = deserialize_tpm2b_public(required(jso, "public_parent")?)
        .map_err(bad_value("public_parent"))?;
    // The policy sub-record is allocated only when present.
    let policy = deserialize_attached_policy(jso)?;

    Ok(FapiDuplicate {
        duplicate,
        encrypted_seed,
        certificate,
        public,
        public_parent,
        policy,
    })
}

/// Decodes the tag of the generic object wrapper. The tag is numeric only;
/// the set of valid values is closed.
pub fn deserialize_object_type(jso: &Value) -> Result<ObjectType, DeserializeError> {
    trace!("call");
    let token = token_text(jso)?;
    let num = parse_number(&token)
        .ok_or_else(|| DeserializeError::malformed(format!("\"{token}\" is not a number")))?;
    let tag = u32::try_from(num)
        .map_err(|_| DeserializeError::malformed(format!("{num} does not fit in 32 bits")))?;
    ObjectType::try_from(tag)
}

fn deserialize_attached_policy(jso: &Value) -> Result<Option<Box<Policy>>, DeserializeError> {
    match get_sub_object(jso, "policy") {
        Some(jso2) => {
            let policy = deserialize_policy(jso2).map_err(bad_value("policy"))?;
            Ok(Some(Box::new(policy)))
        }
        None => Ok(None),
    }
}

/// Decodes the generic object wrapper.
///
/// The `objectType` tag selects the variant decoder; the hierarchy variant
/// additionally derives the hierarchy's TPM name. The cross-cutting
/// `system` flag and attached policy are layered on after the variant body.
pub fn deserialize_object(jso: &Value) -> Result<FapiObject, DeserializeError> {
    trace!("call");

    let object_type =
        deserialize_object_type(required(jso, "objectType")?).map_err(bad_value("objectType"))?;

    let body = match object_type {
        ObjectType::NvIndex => FapiObjectBody::NvIndex(deserialize_nv_index(jso)?),
        ObjectType::Duplicate => FapiObjectBody::Duplicate(deserialize_duplicate(jso)?),
        ObjectType::ExtPubKey => FapiObjectBody::ExtPubKey(deserialize_ext_pub_key(jso)?),
        ObjectType::Hierarchy => {
            let mut hierarchy = deserialize_hierarchy(jso)?;
            hierarchy.derive_name();
            FapiObjectBody::Hierarchy(hierarchy)
        }
        ObjectType::Key => FapiObjectBody::Key(deserialize_key(jso)?),
    };

    let system = match get_sub_object(jso, "system") {
        Some(jso2) => deserialize_yes_no(jso2).map_err(bad_value("system"))?,
        None => TpmYesNo::No,
    };
    let policy = deserialize_attached_policy(jso)?;

    Ok(FapiObject {
        body,
        system,
        policy,
    })
}
