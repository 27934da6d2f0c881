//! Fixed lookup tables and handle constants.
//!
//! All tables are immutable process-wide data. Symbolic lookups are
//! case-insensitive and scanned linearly in table order, so entries that
//! share a prefix (`rsassa` vs `rsa`) are ordered longest first.

use tpm_mu::alg::*;

/// Known constant-name prefixes, checked in order; the first match is
/// stripped before symbolic table lookup.
pub const TSS_CONST_PREFIXES: [&str; 5] = ["TPM2_ALG_", "TPM2_", "TPM_", "TPMA_", "POLICY"];

/// Object-type tag values of the generic object wrapper (closed set).
pub const IFAPI_KEY_OBJ: u32 = 1;
pub const IFAPI_NV_OBJ: u32 = 2;
pub const IFAPI_EXT_PUB_KEY_OBJ: u32 = 3;
pub const IFAPI_HIERARCHY_OBJ: u32 = 4;
pub const IFAPI_DUPLICATE_OBJ: u32 = 5;

/// Event-kind tag values (open set).
pub const IFAPI_IMA_EVENT_TAG: u32 = 1;
pub const IFAPI_TSS_EVENT_TAG: u32 = 2;

/// Symbolic names of the event-kind tags.
pub const EVENT_TYPE_TABLE: [(u32, &str); 2] = [
    (IFAPI_IMA_EVENT_TAG, "ima-legacy"),
    (IFAPI_TSS_EVENT_TAG, "tss2"),
];

/// Symbolic names of algorithm identifiers.
pub const ALG_TABLE: [(u32, &str); 18] = [
    (TPM2_ALG_RSASSA as u32, "rsassa"),
    (TPM2_ALG_RSAPSS as u32, "rsapss"),
    (TPM2_ALG_RSAES as u32, "rsaes"),
    (TPM2_ALG_RSA as u32, "rsa"),
    (TPM2_ALG_OAEP as u32, "oaep"),
    (TPM2_ALG_ECDSA as u32, "ecdsa"),
    (TPM2_ALG_ECDAA as u32, "ecdaa"),
    (TPM2_ALG_ECC as u32, "ecc"),
    (TPM2_ALG_KEYEDHASH as u32, "keyedhash"),
    (TPM2_ALG_SYMCIPHER as u32, "symcipher"),
    (TPM2_ALG_HMAC as u32, "hmac"),
    (TPM2_ALG_AES as u32, "aes"),
    (TPM2_ALG_XOR as u32, "xor"),
    (TPM2_ALG_SHA256 as u32, "sha256"),
    (TPM2_ALG_SHA384 as u32, "sha384"),
    (TPM2_ALG_SHA512 as u32, "sha512"),
    (TPM2_ALG_SM3_256 as u32, "sm3_256"),
    (TPM2_ALG_SHA1 as u32, "sha1"),
];

/// Permanent TPM hierarchy handles.
pub const TPM2_RH_OWNER: u32 = 0x4000_0001;
pub const TPM2_RH_NULL: u32 = 0x4000_0007;
pub const TPM2_RH_LOCKOUT: u32 = 0x4000_000a;
pub const TPM2_RH_ENDORSEMENT: u32 = 0x4000_000b;
pub const TPM2_RH_PLATFORM: u32 = 0x4000_000c;

/// Symbolic names of permanent hierarchy handles.
pub const RH_TABLE: [(u32, &str); 5] = [
    (TPM2_RH_OWNER, "rh_owner"),
    (TPM2_RH_NULL, "rh_null"),
    (TPM2_RH_LOCKOUT, "rh_lockout"),
    (TPM2_RH_ENDORSEMENT, "rh_endorsement"),
    (TPM2_RH_PLATFORM, "rh_platform"),
];

/// ESYS resource handles of the permanent hierarchies.
pub const ESYS_TR_RH_OWNER: u32 = 0x101;
pub const ESYS_TR_RH_NULL: u32 = 0x107;
pub const ESYS_TR_RH_LOCKOUT: u32 = 0x10a;
pub const ESYS_TR_RH_ENDORSEMENT: u32 = 0x10b;
pub const ESYS_TR_RH_PLATFORM: u32 = 0x10c;

/// Maps an ESYS hierarchy handle to the TPM handle it names.
pub fn esys_to_tpm_handle(esys_handle: u32) -> Option<u32> {
    match esys_handle {
        ESYS_TR_RH_OWNER => Some(TPM2_RH_OWNER),
        ESYS_TR_RH_NULL => Some(TPM2_RH_NULL),
        ESYS_TR_RH_LOCKOUT => Some(TPM2_RH_LOCKOUT),
        ESYS_TR_RH_ENDORSEMENT => Some(TPM2_RH_ENDORSEMENT),
        ESYS_TR_RH_PLATFORM => Some(TPM2_RH_PLATFORM),
        _ => None,
    }
}

/// Largest number of PCR banks a digest list may carry.
pub const TPM2_NUM_PCR_BANKS: usize = 16;
