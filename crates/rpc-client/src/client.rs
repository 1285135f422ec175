use pool_types::{ObjectId, Owner, TxEffects};
use serde::{Deserialize, Serialize};

use crate::error::RpcError;

/// One entry of a [`listOwnedObjects`](RpcClient::list_owned_objects) page.
///
/// `data` is `None` when the backend reports the id but could not resolve
/// its current object data (an "error cell" in Sui's
/// `SuiObjectResponse` terms) — [`object-feed`](https://docs.rs/object-feed)
/// treats that as a hard [`BackendObjectError`](https://docs.rs/object-feed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedObject {
    pub object_id: ObjectId,
    pub data:      Option<ListedObjectData>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedObjectData {
    pub digest: String,
    pub version: u64,
    #[serde(rename = "type", default)]
    pub type_: String,
    pub owner_info: Owner
}

/// One page of a paginated owned-objects listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPage {
    pub data: Vec<ListedObject>,
    pub next_cursor: Option<String>,
    pub has_next_page: bool
}

/// How the backend should broadcast a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    WaitForEffectsCert,
    WaitForLocalExecution
}

/// Request passed to [`sign_and_execute_transaction`](RpcClient::sign_and_execute_transaction).
#[derive(Debug, Clone)]
pub struct SignAndExecuteRequest {
    pub tx_bytes:     Vec<u8>,
    pub signer:       String,
    pub show_effects: bool,
    pub request_type: RequestType
}

/// Result of a single-object owner lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectOwnerInfo {
    pub owner: Owner
}

/// The subset of a blockchain RPC client this crate needs: paginated object
/// listing, single-object owner lookup, dry-run and sign-and-execute
/// submission.
///
/// This crate never implements a transport itself — the core depends only
/// on this trait, the way [`order-pool`](https://docs.rs/order-pool)
/// depends on [`OrderPool`](https://docs.rs/order-pool) rather than a
/// concrete mempool.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait RpcClient: Send + Sync {
    /// Lists objects owned by `owner`, one page at a time. `page_size` is a
    /// hint; backends may ignore it or clamp it to their own maximum.
    async fn list_owned_objects(
        &self,
        owner: &str,
        cursor: Option<String>,
        page_size: Option<u32>
    ) -> Result<ObjectPage, RpcError>;

    /// Looks up the current owner of a single object, used by
    /// [`Pool::check_ownership`](https://docs.rs/owned-pool) to certify
    /// immutable inputs that are not in the pool's own registry.
    async fn get_object_owner(&self, object_id: &str) -> Result<ObjectOwnerInfo, RpcError>;

    /// Dry-runs a serialized transaction without committing it.
    async fn dry_run_transaction(&self, tx_bytes: &[u8]) -> Result<TxEffects, RpcError>;

    /// Submits a transaction for signing and execution, requesting effect
    /// visibility per `request.show_effects`.
    async fn sign_and_execute_transaction(
        &self,
        request: SignAndExecuteRequest
    ) -> Result<TxEffects, RpcError>;
}
