use std::time::Duration;

use clap::Parser;
use executor::LogLevel;

/// Scripted smoke-test of the executor against an in-memory mock RPC
/// client — not a production wallet CLI (CLI wrappers are out of scope
/// for this crate; see SPEC_FULL.md §1 Non-goals).
#[derive(Parser, Debug)]
#[clap(about = "Owned-object pool executor demo")]
pub struct Cli {
    /// Maximum time to wait for a free worker before growing the pool.
    #[clap(long, default_value_t = 10_000)]
    pub worker_acquire_timeout_ms: u64,

    /// Retries allocated per `execute` call, spanning both acquisition
    /// timeouts and execution failures.
    #[clap(long, default_value_t = 3)]
    pub retries: u32,

    /// Number of gas coins to seed the signer with before running.
    #[clap(long, default_value_t = 10)]
    pub gas_coins: u32,

    /// Number of concurrent `splitCoins`-style transactions to submit.
    #[clap(long, default_value_t = 5)]
    pub concurrent_txs: u32,

    #[clap(long, value_enum, default_value = "info")]
    pub log_level: CliLogLevel
}

impl Cli {
    pub fn worker_acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.worker_acquire_timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliLogLevel {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Silent
}

impl From<CliLogLevel> for LogLevel {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Fatal => LogLevel::Fatal,
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
            CliLogLevel::Silent => LogLevel::Silent
        }
    }
}
