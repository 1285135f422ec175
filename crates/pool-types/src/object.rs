use serde::{Deserialize, Serialize};

use crate::GAS_COIN_TYPE;

/// Opaque, stable identifier for an on-chain object.
///
/// Two objects with the same id are the same object across mutations; the
/// [`digest`](PoolObject::digest) and [`version`](PoolObject::version) are
/// what change.
pub type ObjectId = String;

/// An object owned by a pool's signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolObject {
    pub object_id: ObjectId,
    /// Opaque content fingerprint; changes with every mutation.
    pub digest:    String,
    /// Monotonic version identifier.
    pub version:   u64,
    /// Fully-qualified type tag. Empty string if the backend omitted it.
    #[serde(rename = "type", default)]
    pub type_:     String
}

impl PoolObject {
    pub fn new(object_id: impl Into<ObjectId>, digest: impl Into<String>, version: u64, type_: impl Into<String>) -> Self {
        Self { object_id: object_id.into(), digest: digest.into(), version, type_: type_.into() }
    }

    /// Whether this object's type tag matches the gas-coin type.
    pub fn is_gas_coin(&self) -> bool {
        self.type_ == GAS_COIN_TYPE
    }

    pub fn as_reference(&self) -> ObjectReference {
        ObjectReference {
            object_id: self.object_id.clone(),
            digest:    self.digest.clone(),
            version:   self.version
        }
    }
}

/// The subset of a [`PoolObject`] used for gas payment and transaction
/// inputs: no type tag, since the transaction-block builder and the RPC
/// client only need the id/digest/version triple to reference an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub object_id: ObjectId,
    pub digest:    String,
    pub version:   u64
}

impl From<&PoolObject> for ObjectReference {
    fn from(obj: &PoolObject) -> Self {
        obj.as_reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_coin_detection_is_exact_type_match() {
        let coin = PoolObject::new("0x1", "d1", 1, GAS_COIN_TYPE);
        let other = PoolObject::new("0x2", "d2", 1, "0x2::sui::SUI");
        assert!(coin.is_gas_coin());
        assert!(!other.is_gas_coin());
    }

    #[test]
    fn missing_type_defaults_to_empty_string() {
        let json = r#"{"objectId":"0x1","digest":"d1","version":1}"#;
        let obj: PoolObject = serde_json::from_str(json).unwrap();
        assert_eq!(obj.type_, "");
    }
}
