//! # Domain Entities
//!
//! The simulated call envelope and the typed records projected from
//! contract return values.

use super::errors::Hash;
use super::tagged_value::TaggedValue;
use super::value_objects::{CallerContext, Network, Symbol};
use serde::{Deserialize, Serialize};

/// Fee bid (stroops) put on every simulated call.
pub const BASE_FEE: u32 = 100;

/// Validity window of a simulated call, in seconds.
pub const CALL_TIMEOUT_SECS: u64 = 30;

/// Unsigned, single-operation call envelope. Built fresh per call and
/// only ever submitted for simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulatedCall {
    /// Target contract strkey (`C...`).
    pub contract_id: String,
    /// Decoded contract hash.
    pub contract_hash: Hash,
    /// Method to invoke.
    pub method: Symbol,
    /// Ordered call arguments.
    pub args: Vec<TaggedValue>,
    /// Fee bid.
    pub fee: u32,
    /// Target network.
    pub network: Network,
    /// Validity window length.
    pub timeout_secs: u64,
    /// Upper time bound (unix seconds).
    pub valid_until: u64,
    /// Source account context.
    pub source: CallerContext,
}

/// What a simulation returned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationOutcome {
    /// Return value of the invoked function, if any.
    pub return_value: Option<TaggedValue>,
    /// Host error reported by the simulation.
    pub error: Option<String>,
    /// Ledger the simulation ran against.
    pub latest_ledger: Option<u32>,
}

impl SimulationOutcome {
    /// Successful outcome carrying `value`.
    pub fn returning(value: TaggedValue) -> Self {
        Self {
            return_value: Some(value),
            ..Default::default()
        }
    }

    /// Failed outcome with a host error message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

/// One tracked event of a product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event identifier.
    pub event_id: u64,
    /// Product the event belongs to.
    pub product_id: String,
    /// Address that recorded the event.
    pub actor: String,
    /// Unix seconds.
    pub timestamp: u64,
    /// Kind of event (e.g. `harvested`, `shipped`).
    #[serde(rename = "event_type")]
    pub event_kind: String,
    /// Free-form note.
    pub note: String,
    /// Hash of off-chain data, when attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_hash: Option<String>,
}

/// Result of resolving every event id of a product.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EventBatch {
    /// Records that resolved, most recent first.
    pub events: Vec<EventRecord>,
    /// Ids whose read produced nothing.
    pub missing: Vec<u64>,
    /// Ids whose read failed, with the reason.
    pub failed: Vec<(u64, String)>,
}

impl EventBatch {
    /// Ids that did not produce a record, for any reason.
    pub fn unresolved(&self) -> usize {
        self.missing.len() + self.failed.len()
    }
}
