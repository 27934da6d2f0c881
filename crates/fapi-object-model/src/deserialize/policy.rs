//! Policy record decoder.

use serde_json::Value;
use tpm_mu::TpmlDigestValues;
use tracing::trace;

use crate::deserialize::fields::{bad_value, check_json_object_fields, get_sub_object, required};
use crate::deserialize::scalar::deserialize_string;
use crate::deserialize::tpm::deserialize_tpml_digest_values;
use crate::error::DeserializeError;
use crate::types::Policy;

static POLICY_FIELDS: [&str; 4] = ["description", "policyDigests", "policy", "$schema"];

/// Decodes a policy harness.
///
/// The policy element array is not interpreted; its verbatim JSON text is
/// kept for the policy engine.
pub fn deserialize_policy(jso: &Value) -> Result<Policy, DeserializeError> {
    trace!("call");
    check_json_object_fields(jso, &POLICY_FIELDS);

    let description =
        deserialize_string(required(jso, "description")?).map_err(bad_value("description"))?;
    let policy_digests = match get_sub_object(jso, "policyDigests") {
        Some(jso2) => deserialize_tpml_digest_values(jso2).map_err(bad_value("policyDigests"))?,
        None => TpmlDigestValues::default(),
    };
    let elements = required(jso, "policy")?;
    if !elements.is_array() {
        return Err(DeserializeError::malformed(format!(
            "expected an array of policy elements, got {elements}"
        ))
        .for_field("policy"));
    }
    let policy = serde_json::to_string_pretty(elements)
        .map_err(|err| DeserializeError::malformed(err.to_string()).for_field("policy"))?;

    Ok(Policy {
        description,
        policy_digests,
        policy,
    })
}
