use std::sync::Arc;

use owned_pool::{DefaultStrategy, SplitStrategy};

/// Produces a fresh [`SplitStrategy`] instance on demand.
///
/// Strategies are single-use and stateful (§4.3): a strategy that already
/// ran one split cannot run another. When [`ExecutorService::execute`]
/// needs to grow the worker set more than once in a single call, it asks
/// this factory for a brand new instance each time rather than reusing a
/// spent one.
pub type StrategyFactory = Arc<dyn Fn() -> Box<dyn SplitStrategy> + Send + Sync>;

/// The default factory: a fresh [`DefaultStrategy`] per call, matching
/// `addWorker`'s `strategy ?? DefaultStrategy` fallback.
pub fn default_strategy_factory() -> StrategyFactory {
    Arc::new(|| Box::new(DefaultStrategy::new()) as Box<dyn SplitStrategy>)
}
