//! Soroban RPC Adapter
//!
//! Implements the `LedgerRpc` port over Soroban JSON-RPC 2.0
//! (`getLedgerEntries`, `simulateTransaction`).

use super::rpc_types::*;
use crate::config::ReaderConfig;
use crate::codec::envelope;
use crate::domain::{CallerContext, ReaderError, SimulatedCall, SimulationOutcome, TaggedValue};
use crate::ports::outbound::LedgerRpc;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Connect timeout for RPC requests.
const CONNECT_TIMEOUT_SECS: u64 = 2;

/// HTTP JSON-RPC client for a Soroban RPC server.
pub struct SorobanRpcClient {
    client: Client,
    endpoint: String,
    request_id: AtomicU64,
}

impl SorobanRpcClient {
    /// Create a client for `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, ReaderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ReaderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            request_id: AtomicU64::new(1),
        })
    }

    /// Create a client for the endpoint the config resolves to.
    pub fn from_config(config: &ReaderConfig) -> Result<Self, ReaderError> {
        Self::new(config.rpc_endpoint(), config.request_timeout_secs)
    }

    /// Endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn call<P: serde::Serialize + Send + Sync, R: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, ReaderError> {
        let request = JsonRpcRequest::new(method, params, self.next_id());
        debug!("[pv-reader] {} -> {}", method, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ReaderError::Transport(format!("Cannot connect to {}", self.endpoint))
                } else {
                    ReaderError::Transport(e.to_string())
                }
            })?;

        let rpc_response: JsonRpcResponse<R> = response
            .json()
            .await
            .map_err(|e| ReaderError::Transport(format!("Malformed response: {}", e)))?;

        if let Some(error) = rpc_response.error {
            return Err(ReaderError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        rpc_response
            .result
            .ok_or_else(|| ReaderError::Transport("Missing result in response".to_string()))
    }
}

#[async_trait]
impl LedgerRpc for SorobanRpcClient {
    async fn get_account(&self, identity: &str) -> Result<CallerContext, ReaderError> {
        let params = GetLedgerEntriesParams {
            keys: vec![envelope::account_ledger_key(identity)?],
        };
        let result: GetLedgerEntriesResult = self.call("getLedgerEntries", params).await?;
        account_from_entries(identity, result)
    }

    async fn simulate_transaction(
        &self,
        call: &SimulatedCall,
    ) -> Result<SimulationOutcome, ReaderError> {
        let params = SimulateTransactionParams {
            transaction: call.envelope_xdr_base64()?,
        };
        let result: SimulateTransactionResult = self.call("simulateTransaction", params).await?;
        outcome_from_simulation(result)
    }
}

/// Caller context from a `getLedgerEntries` result for one account key.
pub fn account_from_entries(
    identity: &str,
    result: GetLedgerEntriesResult,
) -> Result<CallerContext, ReaderError> {
    let entry = result
        .entries
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| ReaderError::AccountNotFound(identity.to_string()))?;
    Ok(envelope::read_account_entry(&entry.xdr)?)
}

/// Simulation outcome from a `simulateTransaction` result. A host error
/// takes precedence over any return value.
pub fn outcome_from_simulation(
    result: SimulateTransactionResult,
) -> Result<SimulationOutcome, ReaderError> {
    if let Some(error) = result.error {
        return Ok(SimulationOutcome {
            error: Some(error),
            latest_ledger: result.latest_ledger,
            ..Default::default()
        });
    }

    let return_value = match result.results.and_then(|r| r.into_iter().next()) {
        Some(host_result) => Some(TaggedValue::from_xdr_base64(&host_result.xdr)?),
        None => None,
    };

    Ok(SimulationOutcome {
        return_value,
        error: None,
        latest_ledger: result.latest_ledger,
    })
}
