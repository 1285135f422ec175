//! Worker-pool lifecycle and dispatch on top of [`owned_pool::Pool`].
//!
//! [`ExecutorService`] owns one main pool and a set of worker pools,
//! dispatches transactions to whichever worker is available, retries
//! transient failures, and grows/shrinks the worker set by splitting and
//! merging against the main pool — the executor half of the spec, with
//! [`owned_pool`](https://docs.rs/owned-pool) providing the pool half.

#![warn(missing_debug_implementations, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]

mod config;
mod error;
mod handle;
mod service;
mod strategy;
mod worker;

pub use config::{ExecutorConfig, LogLevel};
pub use error::ExecutorError;
pub use handle::ExecutorHandle;
pub use service::{ExecuteOptions, ExecutorService};
pub use strategy::{default_strategy_factory, StrategyFactory};

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use owned_pool::{AddressSigner, IncludeAdminCapStrategy};
    use pool_types::{Owner, PoolObject, TxEffects, TxStatus, GAS_COIN_TYPE};
    use rpc_client::{MockRpcClient, MockTxBuilder, TxInput};

    use super::*;

    fn gas_coin(id: &str) -> PoolObject {
        PoolObject::new(id, "d", 1, GAS_COIN_TYPE)
    }

    fn generic_object(id: &str) -> PoolObject {
        PoolObject::new(id, "d", 1, "0x2::foo::Bar")
    }

    /// A short `worker_acquire_timeout` keeps every "grow from zero
    /// workers" test fast; the first `execute` call always has to wait out
    /// one timeout before it splits the first worker off the main pool.
    fn fast_config() -> ExecutorConfig {
        let mut config = ExecutorConfig::default();
        config.worker_acquire_timeout = Duration::from_millis(20);
        config
    }

    async fn service_with(rpc: Arc<MockRpcClient>, owner: &str, objects: Vec<PoolObject>) -> ExecutorService<AddressSigner, MockRpcClient> {
        rpc.seed_objects(owner, objects);
        ExecutorService::initialize(AddressSigner::new(owner), rpc, fast_config()).await.unwrap()
    }

    #[tokio::test]
    async fn execute_grows_a_worker_on_first_call_and_returns_it_to_the_pool() {
        let rpc = Arc::new(MockRpcClient::new());
        let objects = vec![gas_coin("c1"), gas_coin("c2"), generic_object("o1")];
        let service = service_with(rpc, "0xsigner", objects).await;

        assert_eq!(service.worker_count(), 0);
        let mut tx = MockTxBuilder::new(vec![]);
        let effects = service.execute(&mut tx, ExecuteOptions::default()).await.unwrap();
        assert!(effects.is_success());
        assert_eq!(service.worker_count(), 1);
    }

    #[tokio::test]
    async fn parallel_executes_each_land_on_their_own_worker() {
        let rpc = Arc::new(MockRpcClient::new());
        let objects = (0..10).map(|i| gas_coin(&format!("c{i}"))).collect();
        let service = Arc::new(service_with(rpc.clone(), "0xsigner", objects).await);

        let mut handles = Vec::new();
        for _ in 0..5 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let mut tx = MockTxBuilder::new(vec![]);
                service.execute(&mut tx, ExecuteOptions::default()).await
            }));
        }

        for handle in handles {
            let effects = handle.await.unwrap().unwrap();
            assert!(effects.is_success());
        }

        assert_eq!(rpc.submitted().len(), 5);
        // every call succeeded without any two colliding on a gas coin;
        // owned-pool's own property test covers split disjointness. How
        // many distinct workers that took (some callers may have reused a
        // worker a predecessor already released) is a scheduling detail,
        // not part of the contract.
        assert!(service.worker_count() >= 1 && service.worker_count() <= 5);
    }

    #[tokio::test]
    async fn zero_retries_with_no_workers_attempts_at_most_one_add_worker() {
        let rpc = Arc::new(MockRpcClient::new());
        let mut config = ExecutorConfig::default();
        config.worker_acquire_timeout = Duration::from_millis(10);
        rpc.seed_objects("0xsigner", vec![gas_coin("c1")]);
        let service = ExecutorService::initialize(AddressSigner::new("0xsigner"), rpc, config).await.unwrap();

        assert_eq!(service.worker_count(), 0);
        let mut tx = MockTxBuilder::new(vec![]);
        let err = service.execute(&mut tx, ExecuteOptions::default().with_retries(0)).await.unwrap_err();
        assert!(matches!(err, ExecutorError::RetriesExhausted { attempts: 1, .. }));
        // the single attempt grew exactly one worker even though it was
        // never used before the retry budget ran out.
        assert_eq!(service.worker_count(), 1);
    }

    #[tokio::test]
    async fn dry_run_failure_exhausts_retries_and_returns_objects_to_main_pool() {
        let rpc = Arc::new(MockRpcClient::new());
        for _ in 0..4 {
            rpc.push_dry_run_result(Ok({
                let mut effects = TxEffects::default();
                effects.status = Some(TxStatus::Failure);
                effects.error = Some("bad txb".into());
                effects
            }));
        }
        let service = service_with(rpc, "0xsigner", vec![gas_coin("c1"), gas_coin("c2")]).await;

        let mut tx = MockTxBuilder::new(vec![]);
        let err = service.execute(&mut tx, ExecuteOptions::default().with_retries(3)).await.unwrap_err();
        assert!(matches!(err, ExecutorError::RetriesExhausted { attempts: 4, .. }));
        // every failed worker was merged back rather than left stranded.
        assert_eq!(service.worker_count(), 0);
    }

    /// A transaction whose input is owned by neither this signer's main
    /// pool nor any of its (so-far nonexistent) siblings fails the same
    /// way on every worker the executor tries, since no partition of this
    /// signer's objects will ever contain it — so retries are exhausted
    /// the same way an unrecoverable execution failure would be (see
    /// DESIGN.md's resolution of this Open Question).
    #[tokio::test]
    async fn ownership_violation_is_retried_like_any_other_sign_and_execute_failure() {
        let rpc = Arc::new(MockRpcClient::new());
        rpc.set_owner("stranger", Owner::address("0xsomeone-else"));
        let service = service_with(rpc.clone(), "0xsigner", vec![gas_coin("c1")]).await;

        let mut tx = MockTxBuilder::new(vec![TxInput::OwnedOrImmutableObject("stranger".into())]);
        let err = service.execute(&mut tx, ExecuteOptions::default()).await.unwrap_err();
        assert!(matches!(
            err,
            ExecutorError::RetriesExhausted { source, .. }
            if matches!(*source, ExecutorError::Pool(owned_pool::PoolError::OwnershipViolation(id)) if id == "stranger")
        ));
        assert!(rpc.submitted().is_empty());
        assert_eq!(service.worker_count(), 0);
    }

    #[tokio::test]
    async fn acquire_worker_timeout_triggers_growth_and_completes_on_the_new_worker() {
        // a worker held busy by an artificially slow submission forces a
        // concurrent `execute` to time out acquiring it and grow a second
        // worker off the main pool instead of waiting forever (spec §8
        // scenario 6).
        let rpc = Arc::new(MockRpcClient::new());
        rpc.set_execute_delay(Duration::from_millis(300));
        let mut config = ExecutorConfig::default();
        config.worker_acquire_timeout = Duration::from_millis(100);
        rpc.seed_objects("0xsigner", vec![gas_coin("c1"), gas_coin("c2")]);
        let service = Arc::new(ExecutorService::initialize(AddressSigner::new("0xsigner"), rpc, config).await.unwrap());

        let service_clone = service.clone();
        let long_runner = tokio::spawn(async move {
            let mut tx = MockTxBuilder::new(vec![]);
            service_clone.execute(&mut tx, ExecuteOptions::default()).await
        });

        // give the long runner enough of a head start to grow and claim
        // the first (and only) worker before this caller starts waiting.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut tx2 = MockTxBuilder::new(vec![]);
        let effects = service.execute(&mut tx2, ExecuteOptions::default()).await.unwrap();
        assert!(effects.is_success());
        assert_eq!(service.worker_count(), 2);

        long_runner.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn execute_accepts_a_custom_split_strategy_factory() {
        let rpc = Arc::new(MockRpcClient::new());
        let objects = vec![gas_coin("c1"), generic_object("o1"), PoolObject::new("cap1", "d", 1, "0xpkg::admin::AdminCap")];
        let service = service_with(rpc, "0xsigner", objects).await;

        let factory: StrategyFactory = Arc::new(|| Box::new(IncludeAdminCapStrategy::new("0xpkg")));
        let mut tx = MockTxBuilder::new(vec![]);
        let effects = service
            .execute(&mut tx, ExecuteOptions::default().with_split_strategy(factory))
            .await
            .unwrap();
        assert!(effects.is_success());
        assert_eq!(service.worker_count(), 1);
    }
}
