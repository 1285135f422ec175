use object_feed::FeedError;
use pool_types::ObjectId;
use rpc_client::RpcError;

/// Errors a [`Pool`](crate::Pool) can raise.
///
/// [`executor`](https://docs.rs/executor) treats every one of these the
/// same way: any `Err` out of `sign_and_execute` merges the worker back
/// into the main pool and consumes one retry, regardless of variant —
/// `OwnershipViolation` and `DryRunFailed` included. See
/// `executor::ExecutorService::execute` and DESIGN.md's resolution of the
/// corresponding Open Question.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("failed to fetch objects: {0}")]
    Fetch(#[from] FeedError),
    #[error("split could not produce the strategy's minimal contents before the feed ran out")]
    SplitExhausted,
    #[error("split strategy's post-condition was never satisfied before the feed ran out")]
    SplitStrategyUnsatisfied,
    #[error("transaction input {0} is neither owned by this pool nor immutable")]
    OwnershipViolation(ObjectId),
    #[error("pool has no gas coin available to pay for this transaction")]
    NoGasCoin,
    #[error("dry run rejected the transaction: {0}")]
    DryRunFailed(String),
    #[error("transaction execution failed: {0}")]
    ExecutionError(String),
    #[error("merge found overlapping object ids between pools that should have been disjoint: {0:?}")]
    MergeCollision(Vec<ObjectId>),
    #[error("rpc call failed: {0}")]
    Rpc(#[from] RpcError)
}
