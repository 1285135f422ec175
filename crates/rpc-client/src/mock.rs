//! In-memory [`RpcClient`] and [`TransactionBlockBuilder`] for tests.
//!
//! Mirrors the role of `testing-tools`' mock handles in the teacher repo
//! (`MockOrderPoolHandle`, `MockValidator`): a hand-scripted backend that
//! lets a test assert on exactly what the core submitted, without any
//! network.

use std::{
    collections::{HashMap, VecDeque},
    time::Duration
};

use parking_lot::Mutex;
use pool_types::{ObjectId, ObjectReference, Owner, TxEffects};

use crate::{
    client::{ObjectOwnerInfo, ObjectPage, RequestType, RpcClient, SignAndExecuteRequest},
    error::RpcError,
    txb::{TransactionBlockBuilder, TxInput}
};

#[derive(Default)]
struct MockState {
    /// Queued pages per owner address, popped front-to-back by successive
    /// `list_owned_objects` calls.
    pages:           HashMap<String, VecDeque<ObjectPage>>,
    owners:          HashMap<ObjectId, Owner>,
    dry_run_script:  VecDeque<Result<TxEffects, RpcError>>,
    execute_script:  VecDeque<Result<TxEffects, RpcError>>,
    /// Every `tx_bytes` passed to `sign_and_execute_transaction`, in order,
    /// for tests to inspect gas payment overlap.
    submitted:       Vec<SignAndExecuteRequest>,
    /// Artificial latency before `sign_and_execute_transaction` resolves,
    /// for tests that need to hold a worker busy long enough to observe
    /// another caller's acquisition timeout.
    execute_delay:   Option<Duration>
}

/// A scripted, in-memory stand-in for a real blockchain RPC endpoint.
///
/// Pages, dry-run outcomes and execution outcomes are all queued ahead of
/// time with [`MockRpcClient::push_page`] / [`push_dry_run_result`] /
/// [`push_execute_result`]; once a queue is empty, calls default to a
/// single terminal empty page, or to a bare successful [`TxEffects`].
pub struct MockRpcClient {
    state: Mutex<MockState>
}

impl Default for MockRpcClient {
    fn default() -> Self {
        Self { state: Mutex::new(MockState::default()) }
    }
}

impl MockRpcClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one page of `listOwnedObjects` results for `owner`.
    pub fn push_page(&self, owner: impl Into<String>, page: ObjectPage) {
        self.state.lock().pages.entry(owner.into()).or_default().push_back(page);
    }

    /// Convenience: enqueues every object in `objects` (and their owner
    /// records) as a single terminal page for `owner`.
    pub fn seed_objects(&self, owner: impl Into<String>, objects: Vec<pool_types::PoolObject>) {
        let owner = owner.into();
        let mut state = self.state.lock();
        for obj in &objects {
            state.owners.insert(obj.object_id.clone(), Owner::address(owner.clone()));
        }
        let data = objects
            .into_iter()
            .map(|obj| crate::client::ListedObject {
                object_id: obj.object_id.clone(),
                data:      Some(crate::client::ListedObjectData {
                    digest:     obj.digest,
                    version:    obj.version,
                    type_:      obj.type_,
                    owner_info: Owner::address(owner.clone())
                })
            })
            .collect();
        state
            .pages
            .entry(owner)
            .or_default()
            .push_back(ObjectPage { data, next_cursor: None, has_next_page: false });
    }

    /// Registers an object id whose backend payload is missing object data,
    /// forcing a `BackendObjectError` out of the next page that contains it.
    pub fn seed_error_cell(&self, owner: impl Into<String>, object_id: impl Into<ObjectId>) {
        let mut state = self.state.lock();
        state
            .pages
            .entry(owner.into())
            .or_default()
            .push_back(ObjectPage {
                data: vec![crate::client::ListedObject { object_id: object_id.into(), data: None }],
                next_cursor: None,
                has_next_page: false
            });
    }

    pub fn set_owner(&self, object_id: impl Into<ObjectId>, owner: Owner) {
        self.state.lock().owners.insert(object_id.into(), owner);
    }

    pub fn push_dry_run_result(&self, result: Result<TxEffects, RpcError>) {
        self.state.lock().dry_run_script.push_back(result);
    }

    pub fn push_execute_result(&self, result: Result<TxEffects, RpcError>) {
        self.state.lock().execute_script.push_back(result);
    }

    pub fn submitted(&self) -> Vec<SignAndExecuteRequest> {
        self.state.lock().submitted.clone()
    }

    /// Makes every subsequent `sign_and_execute_transaction` call sleep for
    /// `delay` before resolving.
    pub fn set_execute_delay(&self, delay: Duration) {
        self.state.lock().execute_delay = Some(delay);
    }
}

#[async_trait::async_trait]
impl RpcClient for MockRpcClient {
    async fn list_owned_objects(
        &self,
        owner: &str,
        _cursor: Option<String>,
        _page_size: Option<u32>
    ) -> Result<ObjectPage, RpcError> {
        let mut state = self.state.lock();
        let page = state
            .pages
            .get_mut(owner)
            .and_then(|q| q.pop_front())
            .unwrap_or_default();
        Ok(page)
    }

    async fn get_object_owner(&self, object_id: &str) -> Result<ObjectOwnerInfo, RpcError> {
        let state = self.state.lock();
        state
            .owners
            .get(object_id)
            .cloned()
            .map(|owner| ObjectOwnerInfo { owner })
            .ok_or_else(|| RpcError::ObjectNotFound(object_id.to_string()))
    }

    async fn dry_run_transaction(&self, _tx_bytes: &[u8]) -> Result<TxEffects, RpcError> {
        let mut state = self.state.lock();
        state.dry_run_script.pop_front().unwrap_or_else(|| {
            let mut effects = TxEffects::default();
            effects.status = Some(pool_types::TxStatus::Success);
            Ok(effects)
        })
    }

    async fn sign_and_execute_transaction(
        &self,
        request: SignAndExecuteRequest
    ) -> Result<TxEffects, RpcError> {
        let delay = self.state.lock().execute_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.state.lock();
        state.submitted.push(request);
        state.execute_script.pop_front().unwrap_or_else(|| {
            let mut effects = TxEffects::default();
            effects.status = Some(pool_types::TxStatus::Success);
            Ok(effects)
        })
    }
}

/// A [`TransactionBlockBuilder`] whose inputs and serialized bytes are set
/// up front by the test; `build` never touches the RPC client.
#[derive(Debug, Clone, Default)]
pub struct MockTxBuilder {
    pub sender:      Option<String>,
    pub gas_payment: Vec<ObjectReference>,
    pub inputs:      Vec<TxInput>,
    pub bytes:       Vec<u8>
}

impl MockTxBuilder {
    pub fn new(inputs: Vec<TxInput>) -> Self {
        Self { inputs, bytes: b"mock-tx".to_vec(), ..Default::default() }
    }
}

#[async_trait::async_trait]
impl TransactionBlockBuilder for MockTxBuilder {
    fn set_sender(&mut self, sender: &str) {
        self.sender = Some(sender.to_string());
    }

    fn set_gas_payment(&mut self, coins: Vec<ObjectReference>) {
        self.gas_payment = coins;
    }

    fn inputs(&self) -> Vec<TxInput> {
        self.inputs.clone()
    }

    async fn build(&self, _rpc: &(dyn RpcClient + 'static)) -> Result<Vec<u8>, RpcError> {
        Ok(self.bytes.clone())
    }
}

/// Helper constructing a [`RequestType::WaitForEffectsCert`] request; most
/// tests don't care which visibility mode was asked for.
pub fn default_request_type() -> RequestType {
    RequestType::WaitForEffectsCert
}
