//! Scripted end-to-end run of the executor against an in-memory mock RPC
//! client: seeds a signer with gas coins, fires off several concurrent
//! `execute` calls, and reports which worker each one landed on.
//!
//! This binary plays the role the teacher's `bin/angstrom` plays for the
//! order-pool/consensus stack: a thin, tracing-instrumented runner that
//! exercises the library crates end to end without a real chain backend.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use executor::{ExecuteOptions, ExecutorConfig, ExecutorService};
use owned_pool::AddressSigner;
use pool_types::{PoolObject, GAS_COIN_TYPE};
use rpc_client::{MockRpcClient, MockTxBuilder};
use tracing::info;

const SIGNER_ADDRESS: &str = "0xdemo-signer";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.into());

    let rpc = Arc::new(MockRpcClient::new());
    let coins: Vec<PoolObject> = (0..cli.gas_coins)
        .map(|i| PoolObject::new(format!("coin-{i}"), format!("digest-{i}"), 1, GAS_COIN_TYPE))
        .collect();
    rpc.seed_objects(SIGNER_ADDRESS, coins);

    let config = ExecutorConfig {
        worker_acquire_timeout: cli.worker_acquire_timeout(),
        default_retries: cli.retries,
        log_level: cli.log_level.into()
    };

    let service = Arc::new(
        ExecutorService::initialize(AddressSigner::new(SIGNER_ADDRESS), rpc.clone(), config)
            .await
            .context("failed to initialize the executor service from the seeded signer")?
    );

    info!(gas_coins = cli.gas_coins, concurrent_txs = cli.concurrent_txs, "seeded signer, dispatching transactions");

    let mut handles = Vec::new();
    for i in 0..cli.concurrent_txs {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let mut tx = MockTxBuilder::new(vec![]);
            let result = service.execute(&mut tx, ExecuteOptions::default()).await;
            (i, result)
        }));
    }

    let mut failures = 0usize;
    for handle in handles {
        let (i, result) = handle.await.context("demo transaction task panicked")?;
        match result {
            Ok(effects) => info!(tx = i, status = ?effects.status, "transaction settled"),
            Err(err) => {
                failures += 1;
                tracing::error!(tx = i, error = %err, "transaction failed");
            }
        }
    }

    info!(workers = service.worker_count(), submitted = rpc.submitted().len(), failures, "demo run complete");
    if failures > 0 {
        anyhow::bail!("{failures} of {} demo transactions failed", cli.concurrent_txs);
    }
    Ok(())
}

fn init_tracing(level: executor::LogLevel) {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.as_level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
