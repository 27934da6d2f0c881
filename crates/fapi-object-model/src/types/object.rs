//! Key, NV-index, hierarchy and duplication-blob records, and the tagged
//! wrapper that holds one of them.

use tpm_mu::{
    Tpm2bCreationData, Tpm2bDigest, Tpm2bEncryptedSecret, Tpm2bName, Tpm2bNvPublic, Tpm2bPrivate,
    Tpm2bPublic, TpmtSigScheme, TpmtTkCreation,
};

use crate::constants::{
    esys_to_tpm_handle, IFAPI_DUPLICATE_OBJ, IFAPI_EXT_PUB_KEY_OBJ, IFAPI_HIERARCHY_OBJ,
    IFAPI_KEY_OBJ, IFAPI_NV_OBJ,
};
use crate::error::DeserializeError;
use crate::types::{ByteBuffer, Policy, TpmYesNo};

/// A key stored in the object store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FapiKey {
    pub persistent_handle: u32,
    pub with_auth: TpmYesNo,
    pub public: Tpm2bPublic,
    pub serialization: ByteBuffer,
    pub private: ByteBuffer,
    pub app_data: ByteBuffer,
    pub policy_instance: String,
    pub creation_data: Tpm2bCreationData,
    pub creation_hash: Tpm2bDigest,
    pub creation_ticket: TpmtTkCreation,
    pub description: String,
    pub certificate: String,
    pub signing_scheme: TpmtSigScheme,
    pub name: Tpm2bName,
    pub reset_count: u32,
    pub delete_prohibited: TpmYesNo,
}

/// An NV index stored in the object store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FapiNvIndex {
    pub with_auth: TpmYesNo,
    pub public: Tpm2bNvPublic,
    pub serialization: ByteBuffer,
    pub app_data: ByteBuffer,
    pub policy_instance: String,
    pub description: String,
    pub hierarchy: u32,
    pub event_log: Option<String>,
}

/// A public key imported from outside the TPM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FapiExtPubKey {
    pub pem_ext_public: String,
    pub certificate: Option<String>,
    pub public: Tpm2bPublic,
}

/// One of the permanent hierarchies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FapiHierarchy {
    pub with_auth: TpmYesNo,
    pub auth_policy: Tpm2bDigest,
    pub description: String,
    pub esys_handle: u32,
    /// Derived from `esys_handle` after decode, not read from the document.
    pub name: Tpm2bName,
}

impl FapiHierarchy {
    /// Derives the hierarchy's TPM name from its ESYS handle.
    ///
    /// The name of a permanent handle is the handle itself, marshalled
    /// big-endian. Unmapped handles leave the name empty.
    pub fn derive_name(&mut self) {
        if let Some(handle) = esys_to_tpm_handle(self.esys_handle) {
            self.name = Tpm2bName(handle.to_be_bytes().to_vec());
        }
    }
}

/// A key duplication blob together with its protection data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FapiDuplicate {
    pub duplicate: Tpm2bPrivate,
    pub encrypted_seed: Tpm2bEncryptedSecret,
    pub certificate: Option<String>,
    pub public: Tpm2bPublic,
    pub public_parent: Tpm2bPublic,
    pub policy: Option<Box<Policy>>,
}

/// Signed quote metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FapiQuoteInfo {
    pub sig_scheme: TpmtSigScheme,
    pub attest: tpm_mu::Tpm2bAttest,
}

/// Object-type tag of the generic wrapper. The set is closed; decoding an
/// unlisted tag is an [`DeserializeError::UnknownVariant`] failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Key,
    NvIndex,
    ExtPubKey,
    Hierarchy,
    Duplicate,
}

impl ObjectType {
    pub fn tag(self) -> u32 {
        match self {
            ObjectType::Key => IFAPI_KEY_OBJ,
            ObjectType::NvIndex => IFAPI_NV_OBJ,
            ObjectType::ExtPubKey => IFAPI_EXT_PUB_KEY_OBJ,
            ObjectType::Hierarchy => IFAPI_HIERARCHY_OBJ,
            ObjectType::Duplicate => IFAPI_DUPLICATE_OBJ,
        }
    }
}

impl TryFrom<u32> for ObjectType {
    type Error = DeserializeError;

    fn try_from(tag: u32) -> Result<Self, DeserializeError> {
        match tag {
            IFAPI_KEY_OBJ => Ok(ObjectType::Key),
            IFAPI_NV_OBJ => Ok(ObjectType::NvIndex),
            IFAPI_EXT_PUB_KEY_OBJ => Ok(ObjectType::ExtPubKey),
            IFAPI_HIERARCHY_OBJ => Ok(ObjectType::Hierarchy),
            IFAPI_DUPLICATE_OBJ => Ok(ObjectType::Duplicate),
            other => Err(DeserializeError::UnknownVariant(other)),
        }
    }
}

/// Variant-specific payload of the generic object wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FapiObjectBody {
    Key(FapiKey),
    NvIndex(FapiNvIndex),
    ExtPubKey(FapiExtPubKey),
    Hierarchy(FapiHierarchy),
    Duplicate(FapiDuplicate),
}

impl FapiObjectBody {
    pub fn object_type(&self) -> ObjectType {
        match self {
            FapiObjectBody::Key(_) => ObjectType::Key,
            FapiObjectBody::NvIndex(_) => ObjectType::NvIndex,
            FapiObjectBody::ExtPubKey(_) => ObjectType::ExtPubKey,
            FapiObjectBody::Hierarchy(_) => ObjectType::Hierarchy,
            FapiObjectBody::Duplicate(_) => ObjectType::Duplicate,
        }
    }
}

/// The generic object wrapper: a variant body plus cross-cutting fields
/// present on every variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FapiObject {
    pub body: FapiObjectBody,
    pub system: TpmYesNo,
    pub policy: Option<Box<Policy>>,
}

impl FapiObject {
    pub fn object_type(&self) -> ObjectType {
        self.body.object_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ESYS_TR_RH_ENDORSEMENT, ESYS_TR_RH_OWNER};

    #[test]
    fn object_type_tags_roundtrip() {
        for ty in [
            ObjectType::Key,
            ObjectType::NvIndex,
            ObjectType::ExtPubKey,
            ObjectType::Hierarchy,
            ObjectType::Duplicate,
        ] {
            assert_eq!(ObjectType::try_from(ty.tag()).unwrap(), ty);
        }
        assert!(matches!(
            ObjectType::try_from(77),
            Err(DeserializeError::UnknownVariant(77))
        ));
    }

    #[test]
    fn hierarchy_name_derivation() {
        let mut hierarchy = FapiHierarchy {
            esys_handle: ESYS_TR_RH_OWNER,
            ..Default::default()
        };
        hierarchy.derive_name();
        assert_eq!(hierarchy.name.0, vec![0x40, 0x00, 0x00, 0x01]);

        let mut hierarchy = FapiHierarchy {
            esys_handle: ESYS_TR_RH_ENDORSEMENT,
            ..Default::default()
        };
        hierarchy.derive_name();
        assert_eq!(hierarchy.name.0, vec![0x40, 0x00, 0x00, 0x0b]);

        let mut hierarchy = FapiHierarchy {
            esys_handle: 0xdead,
            ..Default::default()
        };
        hierarchy.derive_name();
        assert!(hierarchy.name.is_empty());
    }
}
