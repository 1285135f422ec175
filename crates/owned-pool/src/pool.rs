use std::sync::Arc;

use object_feed::{FeedBatch, FeedError, ObjectFeed, ObjectFeedConfig};
use pool_types::{ObjectReference, PoolObject, TxEffects};
use rand::Rng;
use rpc_client::{RequestType, RpcClient, SignAndExecuteRequest, TransactionBlockBuilder, TxInput};
use tracing::{debug, instrument, trace, warn};

use crate::{error::PoolError, registry::ObjectRegistry, signer::Signer, strategy::{Decision, SplitStrategy}};

fn new_pool_id() -> String {
    format!("{:08x}", rand::thread_rng().gen::<u32>())
}

/// An ownership-disjoint partition of a signer's objects, plus the
/// single-flight sign-and-execute pipeline that keeps it that way.
///
/// A `Pool` is never shared between threads directly — [`executor`]'s
/// worker list wraps each one behind a busy/available slot so that at most
/// one [`sign_and_execute`](Pool::sign_and_execute) call touches a given
/// pool's objects at a time.
pub struct Pool<S, R> {
    id:           String,
    signer:       S,
    rpc:          Arc<R>,
    registry:     ObjectRegistry,
    gas_coins:    std::collections::HashMap<pool_types::ObjectId, PoolObject>,
    feed:         ObjectFeed<R>,
    feed_config:  ObjectFeedConfig
}

impl<S, R> std::fmt::Debug for Pool<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("id", &self.id)
            .field("objects", &self.registry.len())
            .field("gas_coins", &self.gas_coins.len())
            .finish()
    }
}

impl<S, R> Pool<S, R>
where
    S: Signer + Clone,
    R: RpcClient + 'static
{
    /// Creates a pool with an empty registry and immediately drains one
    /// feed batch, failing if the signer owns nothing at all.
    #[instrument(skip(signer, rpc), fields(owner = %signer.address()))]
    pub async fn full(signer: S, rpc: Arc<R>, feed_config: ObjectFeedConfig) -> Result<Self, PoolError> {
        let owner = signer.address().to_string();
        let mut feed = ObjectFeed::new(rpc.clone(), owner, feed_config);

        let mut registry = ObjectRegistry::default();
        match feed.next().await? {
            FeedBatch::Batch(batch) => {
                for (_, obj) in batch {
                    registry.insert(obj);
                }
            }
            FeedBatch::Terminal => return Err(PoolError::Fetch(FeedError::Empty))
        }

        let gas_coins = registry.gas_coins();
        let pool = Self { id: new_pool_id(), signer, rpc, registry, gas_coins, feed, feed_config };
        debug!(pool_id = %pool.id, objects = pool.registry.len(), gas_coins = pool.gas_coins.len(), "pool created via full fetch");
        Ok(pool)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    pub fn objects(&self) -> &std::collections::HashMap<pool_types::ObjectId, PoolObject> {
        self.registry.as_map()
    }

    pub fn gas_coins(&self) -> &std::collections::HashMap<pool_types::ObjectId, PoolObject> {
        &self.gas_coins
    }

    fn recompute_gas_coins(&mut self) {
        self.gas_coins = self.registry.gas_coins();
    }

    /// Pulls the next feed batch into the registry. Returns whether the
    /// fetch made progress (a non-empty batch was merged in).
    async fn fetch_more(&mut self) -> Result<bool, PoolError> {
        match self.feed.next().await? {
            FeedBatch::Batch(batch) => {
                let progressed = !batch.is_empty();
                for (_, obj) in batch {
                    self.registry.insert(obj);
                }
                self.recompute_gas_coins();
                Ok(progressed)
            }
            FeedBatch::Terminal => Ok(false)
        }
    }

    /// Produces a new pool receiving a strategy-chosen subset of this
    /// pool's objects. The new pool inherits this pool's signer and gets a
    /// fresh, independent feed continuation.
    #[instrument(skip(self, strategy), fields(pool_id = %self.id))]
    pub async fn split<St: SplitStrategy>(&mut self, mut strategy: St) -> Result<Self, PoolError> {
        if self.registry.is_empty() && !self.fetch_more().await? {
            return Err(PoolError::SplitExhausted);
        }

        let mut moved = ObjectRegistry::default();

        loop {
            let snapshot = self.registry.lifo_snapshot();
            for object_id in snapshot {
                let Some(obj) = self.registry.get(&object_id).cloned() else { continue };
                match strategy.decide(&obj) {
                    Decision::Move => {
                        self.registry.remove(&object_id);
                        moved.insert(obj);
                    }
                    Decision::Keep => {}
                    Decision::Stop => break
                }
            }

            if strategy.succeeded() {
                break;
            }

            if self.feed.is_exhausted() {
                return Err(PoolError::SplitStrategyUnsatisfied);
            }

            self.fetch_more().await?;
        }

        self.recompute_gas_coins();

        let owner = self.signer.address().to_string();
        let new_feed = ObjectFeed::new(self.rpc.clone(), owner, self.feed_config);
        let gas_coins = moved.gas_coins();
        let new_pool = Self {
            id: new_pool_id(),
            signer: self.signer.clone(),
            rpc: self.rpc.clone(),
            registry: moved,
            gas_coins,
            feed: new_feed,
            feed_config: self.feed_config
        };

        debug!(
            parent = %self.id, child = %new_pool.id,
            moved_objects = new_pool.registry.len(), moved_gas_coins = new_pool.gas_coins.len(),
            "split produced new pool"
        );
        Ok(new_pool)
    }

    /// Absorbs `other`'s objects into this pool. The two registries were
    /// disjoint by invariant; a detected collision means that invariant
    /// was broken elsewhere and is reported rather than silently resolved.
    #[instrument(skip(self, other), fields(pool_id = %self.id, other_id = %other.id))]
    pub fn merge(&mut self, mut other: Self) -> Result<(), PoolError> {
        let collisions: Vec<_> = other.registry.keys().filter(|id| self.registry.contains(id)).cloned().collect();
        if !collisions.is_empty() {
            warn!(pool_id = %self.id, ?collisions, "merge collision detected");
            return Err(PoolError::MergeCollision(collisions));
        }

        for id in other.registry.lifo_snapshot() {
            if let Some(obj) = other.registry.remove(&id) {
                self.registry.insert(obj);
            }
        }
        other.gas_coins.clear();

        self.recompute_gas_coins();
        trace!(pool_id = %self.id, objects = self.registry.len(), "merge complete");
        Ok(())
    }

    /// For each owned-or-immutable-object input, checks that this pool
    /// owns it outright or that the RPC client certifies it immutable.
    /// Every predicate is awaited in turn; none are fired off and then
    /// discarded.
    pub async fn check_ownership<Txb: TransactionBlockBuilder>(&self, tx: &Txb) -> Result<bool, PoolError> {
        match self.check_ownership_inner(tx).await {
            Ok(()) => Ok(true),
            Err(PoolError::OwnershipViolation(_)) => Ok(false),
            Err(other) => Err(other)
        }
    }

    async fn check_ownership_inner<Txb: TransactionBlockBuilder>(&self, tx: &Txb) -> Result<(), PoolError> {
        for input in tx.inputs() {
            let TxInput::OwnedOrImmutableObject(object_id) = input else { continue };

            if self.registry.contains(&object_id) {
                continue;
            }

            let owner = self.rpc.get_object_owner(&object_id).await?;
            if owner.owner.is_immutable() {
                continue;
            }

            return Err(PoolError::OwnershipViolation(object_id));
        }
        Ok(())
    }

    /// The central pipeline: stamp sender, verify ownership, pay with
    /// every gas coin this pool holds, dry-run, submit, and fold the
    /// resulting effects back into the registry.
    #[instrument(skip(self, tx), fields(pool_id = %self.id))]
    pub async fn sign_and_execute<Txb: TransactionBlockBuilder>(&mut self, tx: &mut Txb) -> Result<TxEffects, PoolError> {
        tx.set_sender(self.signer.address());

        self.check_ownership_inner(tx).await?;

        let coins: Vec<ObjectReference> = self.gas_coins.values().map(PoolObject::as_reference).collect();
        if coins.is_empty() {
            return Err(PoolError::NoGasCoin);
        }
        tx.set_gas_payment(coins);

        let tx_bytes = tx.build(self.rpc.as_ref()).await?;

        let dry_run = self.rpc.dry_run_transaction(&tx_bytes).await?;
        if !dry_run.is_success() {
            return Err(PoolError::DryRunFailed(
                dry_run.error.unwrap_or_else(|| "dry run reported failure with no error detail".to_string())
            ));
        }

        let request = SignAndExecuteRequest {
            tx_bytes,
            signer: self.signer.address().to_string(),
            show_effects: true,
            request_type: RequestType::WaitForEffectsCert
        };
        let effects = self
            .rpc
            .sign_and_execute_transaction(request)
            .await
            .map_err(|err| PoolError::ExecutionError(err.to_string()))?;

        self.apply_effects(&effects);

        debug!(
            pool_id = %self.id, status = ?effects.status,
            gas_coins_remaining = self.gas_coins.len(),
            "sign_and_execute complete"
        );
        Ok(effects)
    }

    fn apply_effects(&mut self, effects: &TxEffects) {
        let my_address = self.signer.address();

        for entry in effects.created.iter().chain(effects.unwrapped.iter()).chain(effects.mutated.iter()) {
            if entry.owner.owned_by() != Some(my_address) {
                continue;
            }
            let type_ = self.registry.get(&entry.reference.object_id).map(|obj| obj.type_.clone()).unwrap_or_default();
            self.registry.insert(PoolObject::new(
                entry.reference.object_id.clone(),
                entry.reference.digest.clone(),
                entry.reference.version,
                type_
            ));
        }

        for entry in effects.wrapped.iter().chain(effects.deleted.iter()) {
            self.registry.remove(&entry.reference.object_id);
        }

        self.recompute_gas_coins();
    }
}
