//! Reader configuration.

use crate::domain::{Network, ReaderError};
use serde::{Deserialize, Serialize};
use std::env;

/// Default per-request RPC timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Contract reader configuration, passed explicitly into the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Target contract strkey (`C...`). Required.
    pub contract_id: String,

    /// Network the contract lives on.
    pub network: Network,

    /// RPC endpoint override. `None` uses the network default.
    pub rpc_url: Option<String>,

    /// Per-request RPC timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            contract_id: String::new(),
            network: Network::Testnet,
            rpc_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ReaderConfig {
    /// Config for `contract_id` on `network` with default endpoint and timeout.
    pub fn new(contract_id: impl Into<String>, network: Network) -> Self {
        Self {
            contract_id: contract_id.into(),
            network,
            ..Default::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PV_CONTRACT_ID`: Contract strkey (required, validated separately)
    /// - `PV_STELLAR_NETWORK`: testnet, mainnet or futurenet (default: testnet)
    /// - `PV_RPC_URL`: RPC endpoint override
    /// - `PV_RPC_TIMEOUT_SECS`: Request timeout (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ReaderConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            contract_id: lookup("PV_CONTRACT_ID").unwrap_or_default(),

            network: lookup("PV_STELLAR_NETWORK")
                .map(|v| Network::from_discriminator(&v))
                .unwrap_or_default(),

            rpc_url: lookup("PV_RPC_URL").filter(|v| !v.trim().is_empty()),

            request_timeout_secs: lookup("PV_RPC_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the RPC endpoint.
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    /// Reject configurations that cannot address a contract.
    pub fn validate(&self) -> Result<(), ReaderError> {
        if self.contract_id.trim().is_empty() {
            return Err(ReaderError::Configuration(
                "contract id is not set (PV_CONTRACT_ID)".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ReaderError::Configuration(
                "request timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The override URL, or the network's default endpoint.
    pub fn rpc_endpoint(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| self.network.default_rpc_url().to_string())
    }
}
