use owned_pool::PoolError;

/// Errors surfaced by [`ExecutorService::execute`](crate::ExecutorService::execute).
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    /// No worker became `available` within the acquisition timeout. On its
    /// own this is transient — `execute` treats it as a signal to grow the
    /// pool, consuming one retry.
    #[error("no worker became available within the acquisition timeout")]
    NoWorkerAvailable,
    /// A worker's pool raised an error, either while being split off the
    /// main pool or while executing a transaction.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// A transaction's effects reported `status != success` after a
    /// submission that otherwise succeeded.
    #[error("transaction executed but effects reported failure: {0:?}")]
    NonSuccessEffects(Option<String>),
    /// Internal consistency error: a worker handle referred to a slot the
    /// worker list no longer has.
    #[error("worker {0} not found in the worker list")]
    WorkerNotFound(String),
    /// Final error once the retry budget is depleted.
    #[error("retries exhausted after {attempts} attempt(s)")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<ExecutorError>
    },
    /// An [`ExecutorHandle`](crate::ExecutorHandle) call could not reach
    /// its backing [`ExecutorService`](crate::ExecutorService) task —
    /// the task has panicked or been dropped. Not part of the distilled
    /// spec's error set; only reachable through the handle façade.
    #[error("executor service task is no longer running")]
    ServiceUnavailable
}
