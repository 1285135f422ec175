use std::{collections::HashMap, sync::Arc};

use pool_types::{ObjectId, PoolObject};
use rpc_client::RpcClient;
use tracing::trace;

use crate::error::FeedError;

/// One call to [`ObjectFeed::next`]: either a non-empty batch of newly
/// listed objects, or the terminal marker once the backing endpoint has no
/// further pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedBatch {
    Batch(HashMap<ObjectId, PoolObject>),
    Terminal
}

impl FeedBatch {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FeedBatch::Terminal)
    }
}

/// Tunables for an [`ObjectFeed`]'s underlying pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectFeedConfig {
    /// Hint passed through to `listOwnedObjects`; the backend may ignore or
    /// clamp it.
    pub page_size: Option<u32>
}

/// A restartable, paginated producer of `{objectId → PoolObject}` batches,
/// scoped to a single owner address.
///
/// Not thread-safe: a [`Pool`](https://docs.rs/owned-pool) serializes its
/// own calls to [`next`](ObjectFeed::next), the same way the distilled spec
/// requires.
pub struct ObjectFeed<R> {
    rpc:       Arc<R>,
    owner:     String,
    cursor:    Option<String>,
    exhausted: bool,
    config:    ObjectFeedConfig
}

impl<R> std::fmt::Debug for ObjectFeed<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectFeed")
            .field("owner", &self.owner)
            .field("cursor", &self.cursor)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

impl<R: RpcClient> ObjectFeed<R> {
    pub fn new(rpc: Arc<R>, owner: impl Into<String>, config: ObjectFeedConfig) -> Self {
        Self { rpc, owner: owner.into(), cursor: None, exhausted: false, config }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Pulls the next batch. Idempotently returns [`FeedBatch::Terminal`]
    /// once a prior call has observed `hasNextPage = false`. An empty-but-
    /// not-final page is skipped transparently so callers only ever see a
    /// non-empty batch or the terminal marker, per contract.
    pub async fn next(&mut self) -> Result<FeedBatch, FeedError> {
        loop {
            if self.exhausted {
                return Ok(FeedBatch::Terminal);
            }

            let page = self
                .rpc
                .list_owned_objects(&self.owner, self.cursor.clone(), self.config.page_size)
                .await?;

            let mut batch = HashMap::with_capacity(page.data.len());
            for entry in page.data {
                let data = entry.data.ok_or(FeedError::BackendObjectError(entry.object_id.clone()))?;
                batch.insert(
                    entry.object_id.clone(),
                    PoolObject::new(entry.object_id, data.digest, data.version, data.type_)
                );
            }

            self.cursor = page.next_cursor;
            if !page.has_next_page {
                self.exhausted = true;
            }

            if batch.is_empty() {
                trace!(owner = %self.owner, exhausted = self.exhausted, "feed page empty, continuing");
                continue;
            }

            trace!(owner = %self.owner, batch_size = batch.len(), exhausted = self.exhausted, "feed yielded batch");
            return Ok(FeedBatch::Batch(batch));
        }
    }
}
