use serde::{Deserialize, Serialize};

/// The owner of an on-chain object, as reported by the RPC client.
///
/// Only [`Owner::Address`] participates in ownership checks against a
/// pool's signer; [`Owner::Immutable`] is the other sentinel a
/// [`Pool::check_ownership`](https://docs.rs/owned-pool) call treats as
/// automatically satisfied. [`Owner::Shared`] objects are neither owned nor
/// immutable and always fail an ownership check — the core has no notion of
/// shared-object consensus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Owner {
    AddressOwner { address: String },
    Immutable,
    Shared { initial_shared_version: u64 }
}

impl Owner {
    pub fn address(address: impl Into<String>) -> Self {
        Owner::AddressOwner { address: address.into() }
    }

    pub fn is_immutable(&self) -> bool {
        matches!(self, Owner::Immutable)
    }

    /// `Some(address)` if this is an address-owned object.
    pub fn owned_by(&self) -> Option<&str> {
        match self {
            Owner::AddressOwner { address } => Some(address.as_str()),
            _ => None
        }
    }
}
