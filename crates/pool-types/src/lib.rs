//! Shared data model for the owned-object pool executor.
//!
//! This crate has no async runtime and no RPC dependency: it only describes
//! the on-chain object shapes and the transaction effects that
//! [`owned-pool`](https://docs.rs/owned-pool) and
//! [`executor`](https://docs.rs/executor) operate on, so that the RPC client
//! crate, the pool crate and the executor crate can all depend on the same
//! vocabulary without depending on each other.

#![warn(missing_debug_implementations, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]

mod object;
mod owner;
mod effects;

pub use effects::{EffectEntry, GasUsed, TxEffects, TxStatus};
pub use object::{ObjectId, ObjectReference, PoolObject};
pub use owner::Owner;

/// Fully-qualified type tag used to recognize gas coins among a pool's
/// generic objects.
///
/// The default tag is the Sui gas-coin type; callers targeting a different
/// chain can override it when constructing a [`PoolObject`] registry (the
/// core only ever compares this string, it never parses it).
pub const GAS_COIN_TYPE: &str = "0x2::coin::Coin<0x2::sui::SUI>";

/// Substring any "admin capability" object type must contain for
/// [`owned-pool`](https://docs.rs/owned-pool)'s `IncludeAdminCapStrategy` to
/// recognize it.
pub const ADMIN_CAP_MARKER: &str = "AdminCap";
