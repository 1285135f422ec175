use pool_types::{PoolObject, ADMIN_CAP_MARKER};

/// What [`Pool::split`](crate::Pool::split) should do with one candidate
/// object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Move,
    Keep,
    Stop
}

/// Policy deciding which objects move into a new pool during
/// [`Pool::split`](crate::Pool::split).
///
/// Implementations are single-use and stateful — a splitter instantiates a
/// fresh one per call, the same way [`order-pool`'s limit-order
/// subpools](https://docs.rs/order-pool) are re-derived rather than reused
/// across blocks.
pub trait SplitStrategy: Send {
    fn decide(&mut self, obj: &PoolObject) -> Decision;

    /// Checked after exhausting one pass over the candidate snapshot; while
    /// `false`, `split` fetches another page and retries.
    fn succeeded(&self) -> bool;
}

impl<T: SplitStrategy + ?Sized> SplitStrategy for Box<T> {
    fn decide(&mut self, obj: &PoolObject) -> Decision {
        (**self).decide(obj)
    }

    fn succeeded(&self) -> bool {
        (**self).succeeded()
    }
}

/// Moves exactly one gas coin into the new pool and nothing else.
#[derive(Debug, Clone, Copy)]
pub struct DefaultStrategy {
    coin_quota: u32
}

impl DefaultStrategy {
    pub fn new() -> Self {
        Self { coin_quota: 1 }
    }
}

impl Default for DefaultStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitStrategy for DefaultStrategy {
    fn decide(&mut self, obj: &PoolObject) -> Decision {
        if self.coin_quota == 0 {
            return Decision::Stop;
        }
        if obj.is_gas_coin() {
            self.coin_quota -= 1;
            Decision::Move
        } else {
            Decision::Keep
        }
    }

    fn succeeded(&self) -> bool {
        self.coin_quota == 0
    }
}

/// Moves one gas coin, one non-coin object, and the single object whose
/// type tag names both `"AdminCap"` and `package_id`.
#[derive(Debug, Clone)]
pub struct IncludeAdminCapStrategy {
    package_id:     String,
    coin_quota:     u32,
    non_coin_quota: u32,
    admin_cap_seen: bool
}

impl IncludeAdminCapStrategy {
    pub fn new(package_id: impl Into<String>) -> Self {
        Self { package_id: package_id.into(), coin_quota: 1, non_coin_quota: 1, admin_cap_seen: false }
    }
}

impl SplitStrategy for IncludeAdminCapStrategy {
    fn decide(&mut self, obj: &PoolObject) -> Decision {
        if obj.type_.contains(ADMIN_CAP_MARKER) && obj.type_.contains(&self.package_id) {
            self.admin_cap_seen = true;
            return Decision::Move;
        }

        if self.coin_quota == 0 && self.non_coin_quota == 0 && self.admin_cap_seen {
            return Decision::Stop;
        }

        if obj.is_gas_coin() && self.coin_quota > 0 {
            self.coin_quota -= 1;
            return Decision::Move;
        }

        if !obj.is_gas_coin() && self.non_coin_quota > 0 {
            self.non_coin_quota -= 1;
            return Decision::Move;
        }

        Decision::Keep
    }

    fn succeeded(&self) -> bool {
        self.coin_quota == 0 && self.non_coin_quota == 0 && self.admin_cap_seen
    }
}
