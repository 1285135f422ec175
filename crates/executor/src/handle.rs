use std::sync::Arc;

use owned_pool::Signer;
use pool_types::TxEffects;
use rpc_client::{RpcClient, TransactionBlockBuilder};
use tokio::sync::{mpsc, oneshot};

use crate::{error::ExecutorError, service::{ExecuteOptions, ExecutorService}};

enum Command {
    Execute {
        tx:         Box<dyn TransactionBlockBuilder>,
        options:    ExecuteOptions,
        respond_to: oneshot::Sender<Result<TxEffects, ExecutorError>>
    }
}

/// A cheaply-`Clone`able, channel-backed façade in front of an
/// [`ExecutorService`].
///
/// Mirrors the teacher's `ValidationClient`/`EthHandle` pattern: the
/// service itself runs as a background task owning the only reference to
/// the main pool and worker list, and callers send it work over an
/// unbounded channel rather than sharing the service directly. This is a
/// concurrency-ergonomics addition on top of §4.4, not new functionality —
/// [`ExecutorService::execute`] remains directly callable without going
/// through a handle at all, and every `execute` it dispatches still runs
/// concurrently on the service's own task set, since this handle spawns
/// each command rather than awaiting it inline.
#[derive(Clone, Debug)]
pub struct ExecutorHandle {
    tx: mpsc::UnboundedSender<Command>
}

impl ExecutorHandle {
    /// Spawns `service` onto the current tokio runtime and returns a handle
    /// to it. The service is dropped once every clone of the returned
    /// handle and every in-flight `execute` future have been dropped.
    pub fn spawn<S, R>(service: ExecutorService<S, R>) -> Self
    where
        S: Signer + Clone + Send + Sync + 'static,
        R: RpcClient + 'static
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = Arc::new(service);
        tokio::spawn(run(service, rx));
        Self { tx }
    }

    /// Dispatches one transaction through the backing service, awaiting
    /// its result. Each call runs as its own spawned task on the service
    /// side, so many callers can have an `execute` in flight at once, each
    /// landing on whatever worker becomes available to it (§5: no
    /// cross-pool ordering).
    pub async fn execute(&self, tx: Box<dyn TransactionBlockBuilder>, options: ExecuteOptions) -> Result<TxEffects, ExecutorError> {
        let (respond_to, rx) = oneshot::channel();
        self.tx
            .send(Command::Execute { tx, options, respond_to })
            .map_err(|_| ExecutorError::ServiceUnavailable)?;
        rx.await.map_err(|_| ExecutorError::ServiceUnavailable)?
    }
}

async fn run<S, R>(service: Arc<ExecutorService<S, R>>, mut rx: mpsc::UnboundedReceiver<Command>)
where
    S: Signer + Clone + Send + Sync + 'static,
    R: RpcClient + 'static
{
    while let Some(command) = rx.recv().await {
        match command {
            Command::Execute { mut tx, options, respond_to } => {
                let service = service.clone();
                tokio::spawn(async move {
                    let result = service.execute(tx.as_mut(), options).await;
                    let _ = respond_to.send(result);
                });
            }
        }
    }
}
