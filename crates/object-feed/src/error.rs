use pool_types::ObjectId;
use rpc_client::RpcError;

/// Errors raised while draining an [`ObjectFeed`](crate::ObjectFeed).
///
/// Both variants are surfaced to callers as the distilled spec's
/// `FetchError` — [`owned-pool`](https://docs.rs/owned-pool) folds them
/// into its own `PoolError::Fetch` without distinguishing the two, since
/// both mean "the next page could not be trusted".
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("rpc error while listing owned objects: {0}")]
    Rpc(#[from] RpcError),
    #[error("object {0} has no data in the listing response")]
    BackendObjectError(ObjectId),
    #[error("owner has no objects; initial fetch produced nothing")]
    Empty
}
