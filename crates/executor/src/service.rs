use std::sync::Arc;

use owned_pool::{ObjectFeedConfig, Pool, Signer, SplitStrategy};
use pool_types::TxEffects;
use rpc_client::{RpcClient, TransactionBlockBuilder};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::ExecutorConfig,
    error::ExecutorError,
    strategy::{default_strategy_factory, StrategyFactory},
    worker::{Worker, WorkerList}
};

/// Per-call overrides for [`ExecutorService::execute`]. Anything left
/// `None` falls back to the service's [`ExecutorConfig`].
#[derive(Default, Clone)]
pub struct ExecuteOptions {
    pub retries:        Option<u32>,
    pub split_strategy: Option<StrategyFactory>
}

impl ExecuteOptions {
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    pub fn with_split_strategy(mut self, factory: StrategyFactory) -> Self {
        self.split_strategy = Some(factory);
        self
    }
}

/// Worker-pool lifecycle manager and transaction dispatcher.
///
/// Owns one main pool (the reservoir) and a set of worker pools tagged
/// `available`/`busy`. [`execute`](ExecutorService::execute) finds or
/// grows a worker, hands it one transaction at a time, and retries on
/// failure per §4.4 — safe to call concurrently from many callers, the
/// way `order-pool`'s manager is driven by many concurrent RPC requests.
pub struct ExecutorService<S, R> {
    main_pool: AsyncMutex<Pool<S, R>>,
    workers:   WorkerList<S, R>,
    config:    ExecutorConfig
}

impl<S, R> std::fmt::Debug for ExecutorService<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorService").field("workers", &self.workers.len()).field("config", &self.config).finish()
    }
}

impl<S, R> ExecutorService<S, R>
where
    S: Signer + Clone,
    R: RpcClient + 'static
{
    /// Builds the main pool via [`Pool::full`] and starts with zero
    /// workers; workers are grown lazily on the first `execute` call that
    /// finds none available.
    #[instrument(skip(signer, rpc, config), fields(owner = %signer.address()))]
    pub async fn initialize(signer: S, rpc: Arc<R>, config: ExecutorConfig) -> Result<Self, ExecutorError> {
        let main_pool = Pool::full(signer, rpc, ObjectFeedConfig::default()).await?;
        info!(objects = main_pool.objects().len(), gas_coins = main_pool.gas_coins().len(), "executor service initialized");
        Ok(Self { main_pool: AsyncMutex::new(main_pool), workers: WorkerList::new(), config })
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Number of worker pools currently split off the main pool, busy or
    /// available.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Splits a fresh worker off the main pool and appends it, available,
    /// to the worker list. Takes the main pool's exclusive lock for the
    /// duration of the split (§5: splits/merges hold an exclusive lock on
    /// shared mutable main-pool state).
    #[instrument(skip(self, strategy))]
    async fn add_worker(&self, strategy: Box<dyn SplitStrategy>) -> Result<Arc<Worker<S, R>>, ExecutorError> {
        let mut main = self.main_pool.lock().await;
        let child = main.split(strategy).await?;
        drop(main);
        let worker = self.workers.push(child);
        debug!(worker_id = %worker.id(), workers = self.workers.len(), "grew worker pool");
        Ok(worker)
    }

    /// Removes a worker from the list and merges its pool back into the
    /// main pool. `removeWorker` returns immediately once the merge
    /// completes (§5: merge is CPU-local, no RPC round trip).
    #[instrument(skip(self))]
    async fn remove_worker(&self, worker: &Arc<Worker<S, R>>) -> Result<(), ExecutorError> {
        let removed = self.workers.remove(worker.id()).ok_or_else(|| ExecutorError::WorkerNotFound(worker.id().to_string()))?;
        let pool = removed.pool().lock().await.take().expect("removed worker's pool taken exactly once");
        let mut main = self.main_pool.lock().await;
        main.merge(pool)?;
        debug!(worker_id = %worker.id(), workers = self.workers.len(), "merged worker back into main pool");
        Ok(())
    }

    /// Dispatches one transaction to an available worker, retrying on
    /// transient failure per §4.4's algorithm. Every exit path — success,
    /// a surfaced validation error, or exhausted retries — releases
    /// whatever worker it was holding; none leave a worker stuck `busy`
    /// (§5).
    #[instrument(skip(self, tx, options))]
    pub async fn execute<Txb>(&self, tx: &mut Txb, options: ExecuteOptions) -> Result<TxEffects, ExecutorError>
    where
        Txb: TransactionBlockBuilder
    {
        let retries = options.retries.unwrap_or(self.config.default_retries);
        let strategy_factory = options.split_strategy.unwrap_or_else(default_strategy_factory);

        let mut attempts_left = retries + 1;
        let mut last_err = ExecutorError::NoWorkerAvailable;

        while attempts_left > 0 {
            let worker = match self.workers.acquire(self.config.worker_acquire_timeout).await {
                Some(worker) => worker,
                None => {
                    match self.add_worker(strategy_factory()).await {
                        Ok(_) => {
                            last_err = ExecutorError::NoWorkerAvailable;
                            attempts_left -= 1;
                            continue;
                        }
                        // growing the pool failed outright (feed exhausted,
                        // strategy unsatisfiable); no amount of retrying
                        // fixes that, so surface it straight away.
                        Err(err) => return Err(err)
                    }
                }
            };

            let outcome = {
                let mut guard = worker.pool().lock().await;
                let pool = guard.as_mut().expect("acquired worker always holds its pool");
                pool.sign_and_execute(tx).await
            };

            match outcome {
                Ok(effects) if effects.is_success() => {
                    self.workers.release(&worker);
                    return Ok(effects);
                }
                Ok(effects) => {
                    // submission succeeded but effects reported failure:
                    // conservative removal, per the spec's decided Open
                    // Question (see DESIGN.md).
                    warn!(worker_id = %worker.id(), error = ?effects.error, "effects reported non-success status");
                    last_err = ExecutorError::NonSuccessEffects(effects.error.clone());
                    if let Err(err) = self.remove_worker(&worker).await {
                        return Err(err);
                    }
                    attempts_left -= 1;
                }
                Err(pool_err) => {
                    // Every `sign_and_execute` error — ownership, no gas
                    // coin, dry run, or post-submission execution failure
                    // — spends a retry and merges the worker back rather
                    // than surfacing immediately (see DESIGN.md's
                    // resolution of this Open Question): ownership and
                    // gas-coin failures are relative to *this* worker's
                    // partition, and a sibling worker may legitimately own
                    // the inputs the failed one didn't, so trying again
                    // after a regrouping is meaningful rather than futile.
                    warn!(worker_id = %worker.id(), error = %pool_err, "sign_and_execute failed, removing worker");
                    last_err = ExecutorError::Pool(pool_err);
                    if let Err(err) = self.remove_worker(&worker).await {
                        return Err(err);
                    }
                    attempts_left -= 1;
                }
            }
        }

        Err(ExecutorError::RetriesExhausted { attempts: retries + 1, source: Box::new(last_err) })
    }
}
