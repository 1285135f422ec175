use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc
    },
    time::Duration
};

use owned_pool::Pool;
use parking_lot::RwLock;
use tokio::{sync::Mutex as AsyncMutex, time::Instant};
use tracing::trace;

/// One worker pool managed by [`ExecutorService`](crate::ExecutorService).
///
/// `busy` is the atomic test-and-set flag called out in §5 of the spec:
/// acquisition is a lock-free CAS over the worker list rather than a lock
/// held for the scan, so concurrent `execute` callers racing for the same
/// worker never both win it.
pub(crate) struct Worker<S, R> {
    id:   String,
    busy: AtomicBool,
    /// `None` only in the brief window between `remove` taking this worker
    /// out of the list and the caller finishing the merge-back; no other
    /// code ever observes a removed worker, since the worker list no
    /// longer hands it out once it's gone.
    pool: AsyncMutex<Option<Pool<S, R>>>
}

impl<S, R> Worker<S, R> {
    fn new(pool: Pool<S, R>) -> Arc<Self> {
        let id = pool.id().to_string();
        Arc::new(Self { id, busy: AtomicBool::new(false), pool: AsyncMutex::new(Some(pool)) })
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn pool(&self) -> &AsyncMutex<Option<Pool<S, R>>> {
        &self.pool
    }

    fn try_claim(&self) -> bool {
        self.busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Relaxed).is_ok()
    }

    fn release(&self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// The set of worker pools an [`ExecutorService`](crate::ExecutorService)
/// dispatches to, plus the wait/notify mechanism
/// [`acquire`](WorkerList::acquire) uses instead of the source's busy spin.
///
/// Appends/removals take the exclusive `RwLock`; an acquiring caller only
/// ever takes the read lock to scan, so many callers can race for a worker
/// without serializing on each other — only the CAS on the loser's target
/// worker needs to retry.
pub(crate) struct WorkerList<S, R> {
    workers: RwLock<Vec<Arc<Worker<S, R>>>>,
    notify:  tokio::sync::Notify
}

impl<S, R> WorkerList<S, R> {
    pub(crate) fn new() -> Self {
        Self { workers: RwLock::new(Vec::new()), notify: tokio::sync::Notify::new() }
    }

    pub(crate) fn len(&self) -> usize {
        self.workers.read().len()
    }

    fn try_acquire(&self) -> Option<Arc<Worker<S, R>>> {
        let workers = self.workers.read();
        workers.iter().find(|w| w.try_claim()).cloned()
    }

    /// Polls for an available worker, claiming it atomically. Returns
    /// `None` once `timeout` elapses without success — per §4.4/§8, a zero
    /// timeout with no workers returns `None` immediately rather than
    /// attempting even one scan-and-wait cycle's worth of delay.
    pub(crate) async fn acquire(&self, timeout: Duration) -> Option<Arc<Worker<S, R>>> {
        let deadline = Instant::now() + timeout;
        loop {
            // `enable()` registers this waiter before the scan below so a
            // release that lands between the scan and the await is not
            // missed (Notify's documented lost-wakeup avoidance pattern).
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(worker) = self.try_acquire() {
                return Some(worker);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            if tokio::time::timeout(remaining, notified).await.is_err() {
                return None;
            }
        }
    }

    pub(crate) fn push(&self, pool: Pool<S, R>) -> Arc<Worker<S, R>> {
        let worker = Worker::new(pool);
        self.workers.write().push(worker.clone());
        self.notify.notify_waiters();
        trace!(worker_id = %worker.id(), "worker added");
        worker
    }

    /// Removes the named worker from the list, returning it so its pool can
    /// be merged back into the main pool outside of this lock.
    pub(crate) fn remove(&self, id: &str) -> Option<Arc<Worker<S, R>>> {
        let mut workers = self.workers.write();
        let idx = workers.iter().position(|w| w.id() == id)?;
        Some(workers.remove(idx))
    }

    pub(crate) fn release(&self, worker: &Worker<S, R>) {
        worker.release();
        self.notify.notify_waiters();
        trace!(worker_id = %worker.id(), "worker released");
    }
}
