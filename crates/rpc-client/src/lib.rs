//! The RPC surface the owned-object pool executor consumes.
//!
//! This crate describes, but does not implement, the blockchain RPC client
//! and transaction-block builder the core depends on — the same split
//! `order-pool` draws between [`OrderPool`](https://docs.rs/order-pool) (a
//! trait) and whatever mempool backs it in a given binary. No concrete
//! chain backend lives here; `test-utils` ships an in-memory mock for the
//! rest of the workspace's tests.

#![warn(missing_debug_implementations, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]

mod client;
mod error;
mod txb;

#[cfg(feature = "test-utils")]
mod mock;

pub use client::{ListedObject, ListedObjectData, ObjectOwnerInfo, ObjectPage, RequestType, RpcClient, SignAndExecuteRequest};
pub use error::RpcError;
pub use txb::{TransactionBlockBuilder, TxInput};

#[cfg(feature = "test-utils")]
pub use mock::{default_request_type, MockRpcClient, MockTxBuilder};
