//! Soroban JSON-RPC wire types.

use serde::{Deserialize, Serialize};

/// JSON-RPC request structure
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<T> {
    /// Protocol version, always `2.0`.
    pub jsonrpc: &'static str,
    /// Method name.
    pub method: String,
    /// Named parameters.
    pub params: T,
    /// Request id.
    pub id: u64,
}

impl<T> JsonRpcRequest<T> {
    /// Build a request.
    pub fn new(method: impl Into<String>, params: T, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC response structure
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    /// Result payload on success.
    pub result: Option<T>,
    /// Error object on failure.
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Error message.
    pub message: String,
    /// Extra detail.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RPC Error {}: {}", self.code, self.message)
    }
}

/// `getLedgerEntries` params.
#[derive(Debug, Serialize)]
pub struct GetLedgerEntriesParams {
    /// Base64 `LedgerKey`s.
    pub keys: Vec<String>,
}

/// `getLedgerEntries` result.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLedgerEntriesResult {
    /// Entries that exist; absent keys are omitted.
    #[serde(default)]
    pub entries: Option<Vec<LedgerEntryResult>>,
    /// Ledger the read ran against.
    #[serde(default)]
    pub latest_ledger: Option<u32>,
}

/// One ledger entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryResult {
    /// Base64 `LedgerKey`.
    #[serde(default)]
    pub key: String,
    /// Base64 `LedgerEntryData`.
    pub xdr: String,
    /// Ledger of the last modification.
    #[serde(default)]
    pub last_modified_ledger_seq: Option<u32>,
}

/// `simulateTransaction` params.
#[derive(Debug, Serialize)]
pub struct SimulateTransactionParams {
    /// Base64 `TransactionEnvelope`.
    pub transaction: String,
}

/// `simulateTransaction` result.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateTransactionResult {
    /// Host error, when the invocation failed.
    #[serde(default)]
    pub error: Option<String>,
    /// One entry per host function invoked.
    #[serde(default)]
    pub results: Option<Vec<HostFunctionResult>>,
    /// Ledger the simulation ran against.
    #[serde(default)]
    pub latest_ledger: Option<u32>,
    /// Minimum resource fee, in stroops.
    #[serde(default)]
    pub min_resource_fee: Option<String>,
}

/// Return value of one host function.
#[derive(Debug, Deserialize)]
pub struct HostFunctionResult {
    /// Base64 `ScVal`.
    pub xdr: String,
    /// Base64 authorization entries.
    #[serde(default)]
    pub auth: Vec<String>,
}
