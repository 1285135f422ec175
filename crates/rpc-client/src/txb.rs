use pool_types::{ObjectId, ObjectReference};

use crate::{client::RpcClient, error::RpcError};

/// Whether a transaction input references an owned/immutable object (and so
/// must pass [`Pool::check_ownership`](https://docs.rs/owned-pool)) or is a
/// pure value that carries no ownership obligation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxInput {
    OwnedOrImmutableObject(ObjectId),
    Pure
}

/// A mutable, not-yet-serialized transaction.
///
/// The core never constructs one of these itself — it is handed a populated
/// builder, stamps the sender and gas payment onto it, and hands it to the
/// RPC client to serialize. Kept as a trait rather than a concrete type so
/// callers can plug in whatever transaction-block representation their
/// chain's SDK provides.
#[async_trait::async_trait]
pub trait TransactionBlockBuilder: Send + Sync {
    fn set_sender(&mut self, sender: &str);

    fn set_gas_payment(&mut self, coins: Vec<ObjectReference>);

    /// Enumerates this transaction's inputs, distinguishing owned/immutable
    /// object inputs (which [`checkOwnership`](https://docs.rs/owned-pool)
    /// must validate) from pure values.
    fn inputs(&self) -> Vec<TxInput>;

    /// Serializes this transaction to bytes, consulting `rpc` for whatever
    /// chain metadata the builder needs (reference gas price, protocol
    /// config, …).
    async fn build(&self, rpc: &(dyn RpcClient + 'static)) -> Result<Vec<u8>, RpcError>;
}
