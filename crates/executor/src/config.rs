use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Log verbosity recognized by [`ExecutorConfig`], mirroring the teacher's
/// `reth-tracing`-style verbosity knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Silent
}

impl LogLevel {
    pub fn as_level_filter(&self) -> tracing::level_filters::LevelFilter {
        use tracing::level_filters::LevelFilter;
        match self {
            LogLevel::Fatal | LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Silent => LevelFilter::OFF
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

/// Tunables for an [`ExecutorService`](crate::ExecutorService), matching
/// the defaults named in the external-interfaces section of the spec:
/// a 10 second worker-acquisition timeout and 3 retries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutorConfig {
    #[serde(with = "duration_millis")]
    pub worker_acquire_timeout: Duration,
    pub default_retries: u32,
    pub log_level: LogLevel
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { worker_acquire_timeout: Duration::from_millis(10_000), default_retries: 3, log_level: LogLevel::default() }
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
