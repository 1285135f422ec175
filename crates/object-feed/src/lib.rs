//! A restartable, paginated producer of owned-object batches.
//!
//! [`ObjectFeed`] wraps an [`rpc_client::RpcClient`]'s `listOwnedObjects`
//! endpoint into a cursor-driven iterator a [`Pool`](https://docs.rs/owned-pool)
//! can drain one page at a time, the way `order-pool`'s `order_storage`
//! module wraps raw validation events into something the pool can consume
//! incrementally.

#![warn(missing_debug_implementations, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]

mod error;
mod feed;

pub use error::FeedError;
pub use feed::{FeedBatch, ObjectFeed, ObjectFeedConfig};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pool_types::PoolObject;
    use rpc_client::MockRpcClient;

    use super::*;

    #[tokio::test]
    async fn terminal_after_single_exhausted_batch() {
        let rpc = Arc::new(MockRpcClient::new());
        rpc.seed_objects("0xsigner", vec![PoolObject::new("0x1", "d1", 1, "")]);
        let mut feed = ObjectFeed::new(rpc, "0xsigner", ObjectFeedConfig::default());

        let batch = feed.next().await.unwrap();
        assert!(matches!(batch, FeedBatch::Batch(b) if b.len() == 1));

        // idempotent terminal afterwards, with no further RPC calls needed.
        assert_eq!(feed.next().await.unwrap(), FeedBatch::Terminal);
        assert_eq!(feed.next().await.unwrap(), FeedBatch::Terminal);
    }

    #[tokio::test]
    async fn immediately_terminal_feed_yields_terminal_on_first_call() {
        let rpc = Arc::new(MockRpcClient::new());
        let mut feed = ObjectFeed::new(rpc, "0xsigner", ObjectFeedConfig::default());

        assert_eq!(feed.next().await.unwrap(), FeedBatch::Terminal);
    }

    #[tokio::test]
    async fn backend_object_error_cell_fails_the_batch() {
        let rpc = Arc::new(MockRpcClient::new());
        rpc.seed_error_cell("0xsigner", "0xbad");
        let mut feed = ObjectFeed::new(rpc, "0xsigner", ObjectFeedConfig::default());

        let err = feed.next().await.unwrap_err();
        assert!(matches!(err, FeedError::BackendObjectError(id) if id == "0xbad"));
    }
}
