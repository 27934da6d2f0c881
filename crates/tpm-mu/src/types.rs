//! Wire-format TPM structures used by the FAPI object model.

use crate::alg;
use crate::reader::Reader;
use crate::MuError;

/// Structure tag of a creation ticket (`TPM2_ST_CREATION`).
pub const TPM2_ST_CREATION: u16 = 0x8021;

fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn push_sized(out: &mut Vec<u8>, payload: &[u8]) {
    push_u16(out, payload.len() as u16);
    out.extend_from_slice(payload);
}

/// Declares a `TPM2B_*` structure: a byte payload behind a `u16` size prefix.
macro_rules! sized_buffer {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name(pub Vec<u8>);

        impl $name {
            pub fn unmarshal(buf: &[u8], offset: &mut usize) -> Result<Self, MuError> {
                let mut r = Reader::new(buf, offset);
                Ok(Self(r.sized()?.to_vec()))
            }

            pub fn marshal(&self, out: &mut Vec<u8>) {
                push_sized(out, &self.0);
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }
        }
    };
}

sized_buffer!(
    /// A digest-sized byte payload.
    Tpm2bDigest
);
sized_buffer!(
    /// The name of an entity (hash-prefixed or handle-derived).
    Tpm2bName
);
sized_buffer!(
    /// An encrypted private area.
    Tpm2bPrivate
);
sized_buffer!(
    /// A protection seed encrypted to a parent key.
    Tpm2bEncryptedSecret
);
sized_buffer!(
    /// Marshalled creation data.
    Tpm2bCreationData
);
sized_buffer!(
    /// Event data extended into a PCR.
    Tpm2bEvent
);
sized_buffer!(
    /// A marshalled attestation structure.
    Tpm2bAttest
);

/// Public area of a key object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TpmtPublic {
    pub type_: u16,
    pub name_alg: u16,
    pub object_attributes: u32,
    pub auth_policy: Tpm2bDigest,
    pub unique: Vec<u8>,
}

impl TpmtPublic {
    pub fn unmarshal(buf: &[u8], offset: &mut usize) -> Result<Self, MuError> {
        let mut r = Reader::new(buf, offset);
        let type_ = r.u16()?;
        let name_alg = r.u16()?;
        let object_attributes = r.u32()?;
        let auth_policy = Tpm2bDigest(r.sized()?.to_vec());
        let unique = r.sized()?.to_vec();
        Ok(Self {
            type_,
            name_alg,
            object_attributes,
            auth_policy,
            unique,
        })
    }

    pub fn marshal(&self, out: &mut Vec<u8>) {
        push_u16(out, self.type_);
        push_u16(out, self.name_alg);
        push_u32(out, self.object_attributes);
        self.auth_policy.marshal(out);
        push_sized(out, &self.unique);
    }
}

/// Size-prefixed public area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tpm2bPublic {
    pub size: u16,
    pub public_area: TpmtPublic,
}

impl Tpm2bPublic {
    /// Unmarshals the size prefix and the public area it frames.
    pub fn unmarshal(buf: &[u8], offset: &mut usize) -> Result<Self, MuError> {
        let start = *offset;
        let size = {
            let mut r = Reader::new(buf, offset);
            r.u16()?
        };
        let public_area = TpmtPublic::unmarshal(buf, offset)?;
        let consumed = *offset - start - 2;
        if consumed != size as usize {
            *offset = start;
            return Err(MuError::SizeExceedsBuffer {
                size: size as usize,
                remaining: consumed,
            });
        }
        Ok(Self { size, public_area })
    }

    pub fn marshal(&self, out: &mut Vec<u8>) {
        let mut area = Vec::new();
        self.public_area.marshal(&mut area);
        push_sized(out, &area);
    }

    /// Builds the size-prefixed form around a public area.
    pub fn from_public_area(public_area: TpmtPublic) -> Self {
        let mut area = Vec::new();
        public_area.marshal(&mut area);
        Self {
            size: area.len() as u16,
            public_area,
        }
    }
}

/// Public area of an NV index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TpmsNvPublic {
    pub nv_index: u32,
    pub name_alg: u16,
    pub attributes: u32,
    pub auth_policy: Tpm2bDigest,
    pub data_size: u16,
}

/// Size-prefixed NV public area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tpm2bNvPublic {
    pub size: u16,
    pub nv_public: TpmsNvPublic,
}

/// Signature scheme selector plus its hash algorithm.
///
/// `hash_alg` is meaningful only when `scheme` is not `TPM2_ALG_NULL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TpmtSigScheme {
    pub scheme: u16,
    pub hash_alg: u16,
}

impl TpmtSigScheme {
    pub fn unmarshal(buf: &[u8], offset: &mut usize) -> Result<Self, MuError> {
        let mut r = Reader::new(buf, offset);
        let scheme = r.u16()?;
        let hash_alg = if scheme == alg::TPM2_ALG_NULL {
            0
        } else {
            r.u16()?
        };
        Ok(Self { scheme, hash_alg })
    }

    pub fn marshal(&self, out: &mut Vec<u8>) {
        push_u16(out, self.scheme);
        if self.scheme != alg::TPM2_ALG_NULL {
            push_u16(out, self.hash_alg);
        }
    }
}

/// Ticket proving a TPM-created object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TpmtTkCreation {
    pub tag: u16,
    pub hierarchy: u32,
    pub digest: Tpm2bDigest,
}

impl TpmtTkCreation {
    pub fn unmarshal(buf: &[u8], offset: &mut usize) -> Result<Self, MuError> {
        let start = *offset;
        let mut r = Reader::new(buf, offset);
        let tag = r.u16()?;
        if tag != TPM2_ST_CREATION {
            *offset = start;
            return Err(MuError::BadTag(tag));
        }
        let hierarchy = r.u32()?;
        let digest = Tpm2bDigest(r.sized()?.to_vec());
        Ok(Self {
            tag,
            hierarchy,
            digest,
        })
    }

    pub fn marshal(&self, out: &mut Vec<u8>) {
        push_u16(out, self.tag);
        push_u32(out, self.hierarchy);
        self.digest.marshal(out);
    }
}

/// One digest in a PCR bank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TpmtHa {
    pub hash_alg: u16,
    pub digest: Vec<u8>,
}

/// Digests over all banks of one PCR event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TpmlDigestValues {
    pub digests: Vec<TpmtHa>,
}
