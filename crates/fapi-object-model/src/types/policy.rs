//! Policy records attached to objects.

use tpm_mu::TpmlDigestValues;

/// A policy harness: description, digests computed so far, and the policy
/// element list.
///
/// The policy element language itself is not interpreted here; the `policy`
/// field keeps the verbatim JSON text of the element array so the policy
/// engine can re-parse it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    pub description: String,
    pub policy_digests: TpmlDigestValues,
    pub policy: String,
}
