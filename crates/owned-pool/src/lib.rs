//! The ownership-partitioned object pool at the center of the executor.
//!
//! A [`Pool`] owns a disjoint slice of a signer's on-chain objects and gas
//! coins, a restartable [`object_feed::ObjectFeed`], and the
//! sign-and-execute pipeline that keeps its registry in sync with what it
//! actually owns on-chain. [`executor`](https://docs.rs/executor) is the
//! only intended caller of [`Pool::split`]/[`Pool::merge`] outside of
//! [`Pool::full`]'s initial construction.

#![warn(missing_debug_implementations, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]

mod error;
mod pool;
mod registry;
mod signer;
mod strategy;

pub use error::PoolError;
pub use object_feed::ObjectFeedConfig;
pub use pool::Pool;
pub use signer::{AddressSigner, Signer};
pub use strategy::{Decision, DefaultStrategy, IncludeAdminCapStrategy, SplitStrategy};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pool_types::{PoolObject, GAS_COIN_TYPE};
    use rpc_client::{MockRpcClient, MockTxBuilder, TxInput};

    use super::*;

    fn gas_coin(id: &str) -> PoolObject {
        PoolObject::new(id, "d", 1, GAS_COIN_TYPE)
    }

    fn generic_object(id: &str) -> PoolObject {
        PoolObject::new(id, "d", 1, "0x2::foo::Bar")
    }

    fn admin_cap(id: &str, package: &str) -> PoolObject {
        PoolObject::new(id, "d", 1, format!("{package}::admin::AdminCap"))
    }

    async fn full_pool_with(rpc: Arc<MockRpcClient>, owner: &str, objects: Vec<PoolObject>) -> Pool<AddressSigner, MockRpcClient> {
        rpc.seed_objects(owner, objects);
        Pool::full(AddressSigner::new(owner), rpc, ObjectFeedConfig::default()).await.unwrap()
    }

    #[tokio::test]
    async fn full_fails_when_signer_owns_nothing() {
        let rpc = Arc::new(MockRpcClient::new());
        let err = Pool::full(AddressSigner::new("0xempty"), rpc, ObjectFeedConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PoolError::Fetch(_)));
    }

    #[tokio::test]
    async fn split_then_merge_round_trips_the_registry() {
        let rpc = Arc::new(MockRpcClient::new());
        let objects = vec![gas_coin("c1"), gas_coin("c2"), generic_object("o1"), generic_object("o2")];
        let mut pool = full_pool_with(rpc, "0xsigner", objects).await;

        let before = pool.objects().clone();

        let child = pool.split(DefaultStrategy::new()).await.unwrap();
        assert_eq!(child.gas_coins().len(), 1);
        assert!(pool.objects().keys().collect::<std::collections::HashSet<_>>().is_disjoint(
            &child.objects().keys().collect::<std::collections::HashSet<_>>()
        ));

        pool.merge(child).unwrap();
        assert_eq!(*pool.objects(), before);
    }

    #[tokio::test]
    async fn split_on_empty_feed_yields_split_exhausted() {
        let rpc = Arc::new(MockRpcClient::new());
        // one object so `full` succeeds, but nothing left once it's moved.
        let mut pool = full_pool_with(rpc, "0xsigner", vec![gas_coin("c1")]).await;

        let child = pool.split(DefaultStrategy::new()).await.unwrap();
        assert_eq!(child.gas_coins().len(), 1);

        // pool is now empty and the feed was already exhausted by `full`.
        let err = pool.split(DefaultStrategy::new()).await.unwrap_err();
        assert_matches::assert_matches!(err, PoolError::SplitExhausted);
    }

    #[tokio::test]
    async fn include_admin_cap_strategy_moves_exactly_three_objects() {
        let rpc = Arc::new(MockRpcClient::new());
        let objects = vec![
            gas_coin("c1"),
            gas_coin("c2"),
            generic_object("o1"),
            generic_object("o2"),
            admin_cap("cap1", "0xpkg"),
        ];
        let mut pool = full_pool_with(rpc, "0xsigner", objects).await;

        let child = pool.split(IncludeAdminCapStrategy::new("0xpkg")).await.unwrap();

        assert_eq!(child.objects().len(), 3);
        assert_eq!(child.gas_coins().len(), 1);
        assert!(child.objects().contains_key("cap1"));
    }

    #[tokio::test]
    async fn sign_and_execute_moves_created_objects_in_and_deleted_objects_out() {
        let rpc = Arc::new(MockRpcClient::new());
        let mut pool = full_pool_with(rpc.clone(), "0xsigner", vec![gas_coin("c1"), generic_object("o1")]).await;

        let mut effects = pool_types::TxEffects::default();
        effects.status = Some(pool_types::TxStatus::Success);
        effects.created.push(pool_types::EffectEntry {
            owner:     pool_types::Owner::address("0xsigner"),
            reference: pool_types::ObjectReference { object_id: "new1".into(), digest: "d".into(), version: 1 }
        });
        effects.deleted.push(pool_types::EffectEntry {
            owner:     pool_types::Owner::address("0xsigner"),
            reference: pool_types::ObjectReference { object_id: "o1".into(), digest: "d".into(), version: 1 }
        });
        rpc.push_execute_result(Ok(effects));

        let mut tx = MockTxBuilder::new(vec![TxInput::OwnedOrImmutableObject("o1".into())]);
        let result = pool.sign_and_execute(&mut tx).await.unwrap();
        assert!(result.is_success());

        assert!(pool.objects().contains_key("new1"));
        assert!(!pool.objects().contains_key("o1"));
        // the gas coin paid for this transaction and wasn't touched by effects.
        assert!(pool.gas_coins().contains_key("c1"));
    }

    #[tokio::test]
    async fn sign_and_execute_fails_fast_on_unowned_non_immutable_input() {
        let rpc = Arc::new(MockRpcClient::new());
        rpc.set_owner("stranger-object", pool_types::Owner::address("0xsomeone-else"));
        let mut pool = full_pool_with(rpc.clone(), "0xsigner", vec![gas_coin("c1")]).await;

        let mut tx = MockTxBuilder::new(vec![TxInput::OwnedOrImmutableObject("stranger-object".into())]);
        let err = pool.sign_and_execute(&mut tx).await.unwrap_err();
        assert!(matches!(err, PoolError::OwnershipViolation(id) if id == "stranger-object"));
        // no dry run or submission should have happened.
        assert!(rpc.submitted().is_empty());
    }

    #[tokio::test]
    async fn check_ownership_passes_an_immutable_input_without_owning_it() {
        let rpc = Arc::new(MockRpcClient::new());
        rpc.set_owner("shared-immutable", pool_types::Owner::Immutable);
        let pool = full_pool_with(rpc, "0xsigner", vec![gas_coin("c1")]).await;

        let mut tx = MockTxBuilder::new(vec![TxInput::OwnedOrImmutableObject("shared-immutable".into())]);
        assert!(pool.check_ownership(&tx).await.unwrap());
        assert!(!pool.objects().contains_key("shared-immutable"));
    }

    #[tokio::test]
    async fn sign_and_execute_fails_without_a_gas_coin() {
        let rpc = Arc::new(MockRpcClient::new());
        let mut pool = full_pool_with(rpc, "0xsigner", vec![generic_object("o1")]).await;

        let mut tx = MockTxBuilder::new(vec![]);
        let err = pool.sign_and_execute(&mut tx).await.unwrap_err();
        assert!(matches!(err, PoolError::NoGasCoin));
    }

    #[tokio::test]
    async fn dry_run_failure_is_non_retryable_at_the_pool() {
        let rpc = Arc::new(MockRpcClient::new());
        rpc.push_dry_run_result(Ok({
            let mut effects = pool_types::TxEffects::default();
            effects.status = Some(pool_types::TxStatus::Failure);
            effects.error = Some("insufficient gas".into());
            effects
        }));
        let mut pool = full_pool_with(rpc, "0xsigner", vec![gas_coin("c1")]).await;

        let mut tx = MockTxBuilder::new(vec![]);
        let err = pool.sign_and_execute(&mut tx).await.unwrap_err();
        assert!(matches!(err, PoolError::DryRunFailed(msg) if msg == "insufficient gas"));
    }

    proptest::proptest! {
        /// For every pool a split can produce, `gas_coins` is a non-empty
        /// subset of `objects` — §8's first invariant.
        #[test]
        fn split_product_always_has_nonempty_gas_coins_subset(coin_count in 1usize..6, generic_count in 0usize..6) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let rpc = Arc::new(MockRpcClient::new());
                let mut objects = Vec::new();
                for i in 0..coin_count {
                    objects.push(gas_coin(&format!("c{i}")));
                }
                for i in 0..generic_count {
                    objects.push(generic_object(&format!("o{i}")));
                }
                let mut pool = full_pool_with(rpc, "0xsigner", objects).await;
                let child = pool.split(DefaultStrategy::new()).await.unwrap();

                assert!(!child.gas_coins().is_empty());
                for id in child.gas_coins().keys() {
                    assert!(child.objects().contains_key(id));
                }
                // parent and child remain disjoint after the split.
                for id in child.objects().keys() {
                    assert!(!pool.objects().contains_key(id));
                }
            });
        }
    }
}
