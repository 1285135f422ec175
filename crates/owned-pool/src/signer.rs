/// The keypair/address identity a [`Pool`](crate::Pool) signs and executes
/// transactions as.
///
/// The core never touches key material — actually producing a signature is
/// the RPC client's job once it receives this address as the `signer` on a
/// `signAndExecuteTransaction` call (§6). This trait exists purely so the
/// pool can stamp a sender address onto a transaction without depending on
/// any concrete keypair crate.
pub trait Signer: Send + Sync {
    fn address(&self) -> &str;
}

/// A [`Signer`] that is nothing more than an address.
///
/// Sufficient for the demo binary and for tests: it carries no key
/// material because the real signing step happens on the other side of
/// [`RpcClient::sign_and_execute_transaction`](rpc_client::RpcClient::sign_and_execute_transaction),
/// out of scope for this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSigner(String);

impl AddressSigner {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }
}

impl Signer for AddressSigner {
    fn address(&self) -> &str {
        &self.0
    }
}
