use pool_types::ObjectId;

/// Errors surfaced by an [`RpcClient`](crate::RpcClient) implementation.
///
/// This crate does not implement a transport; it only describes the shape a
/// backend must answer to. Concrete backends (a Sui JSON-RPC client, a mock
/// for tests) map their own transport/decode failures into these variants.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),
    #[error("malformed response from backend: {0}")]
    Malformed(String)
}
