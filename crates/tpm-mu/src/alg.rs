//! TPM algorithm identifiers.

pub const TPM2_ALG_ERROR: u16 = 0x0000;
pub const TPM2_ALG_RSA: u16 = 0x0001;
pub const TPM2_ALG_SHA1: u16 = 0x0004;
pub const TPM2_ALG_HMAC: u16 = 0x0005;
pub const TPM2_ALG_AES: u16 = 0x0006;
pub const TPM2_ALG_KEYEDHASH: u16 = 0x0008;
pub const TPM2_ALG_XOR: u16 = 0x000a;
pub const TPM2_ALG_SHA256: u16 = 0x000b;
pub const TPM2_ALG_SHA384: u16 = 0x000c;
pub const TPM2_ALG_SHA512: u16 = 0x000d;
pub const TPM2_ALG_NULL: u16 = 0x0010;
pub const TPM2_ALG_SM3_256: u16 = 0x0012;
pub const TPM2_ALG_RSASSA: u16 = 0x0014;
pub const TPM2_ALG_RSAES: u16 = 0x0015;
pub const TPM2_ALG_RSAPSS: u16 = 0x0016;
pub const TPM2_ALG_OAEP: u16 = 0x0017;
pub const TPM2_ALG_ECDSA: u16 = 0x0018;
pub const TPM2_ALG_ECDAA: u16 = 0x001a;
pub const TPM2_ALG_ECC: u16 = 0x0023;
pub const TPM2_ALG_SYMCIPHER: u16 = 0x0025;

/// Digest length in bytes for a hash algorithm, `None` for non-hash ids.
pub fn hash_size(alg: u16) -> Option<usize> {
    match alg {
        TPM2_ALG_SHA1 => Some(20),
        TPM2_ALG_SHA256 | TPM2_ALG_SM3_256 => Some(32),
        TPM2_ALG_SHA384 => Some(48),
        TPM2_ALG_SHA512 => Some(64),
        _ => None,
    }
}
