use serde::{Deserialize, Serialize};

use crate::{object::ObjectReference, owner::Owner};

/// Outcome of a dry-run or sign-and-execute submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Failure
}

impl TxStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, TxStatus::Success)
    }
}

/// One entry in an effects list (`created`, `mutated`, `unwrapped`,
/// `wrapped`, `deleted`): the object and who owns it after the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectEntry {
    pub owner:     Owner,
    pub reference: ObjectReference
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasUsed {
    pub computation_cost: u64,
    pub storage_cost:     u64,
    pub storage_rebate:   u64
}

/// The RPC-reported summary of a transaction's object-level changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxEffects {
    pub status:   Option<TxStatus>,
    pub error:    Option<String>,
    #[serde(default)]
    pub created:   Vec<EffectEntry>,
    #[serde(default)]
    pub unwrapped: Vec<EffectEntry>,
    #[serde(default)]
    pub mutated:   Vec<EffectEntry>,
    #[serde(default)]
    pub wrapped:   Vec<EffectEntry>,
    #[serde(default)]
    pub deleted:   Vec<EffectEntry>,
    #[serde(default)]
    pub gas_used:  GasUsed
}

impl TxEffects {
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(TxStatus::Success))
    }
}
