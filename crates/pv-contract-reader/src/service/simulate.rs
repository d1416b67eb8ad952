//! Simulated call construction and submission.

use super::caller::CallerResolver;
use crate::codec::strkey;
use crate::config::ReaderConfig;
use crate::domain::{
    CallerContext, Hash, ReaderError, SimulatedCall, Symbol, TaggedValue, BASE_FEE,
    CALL_TIMEOUT_SECS,
};
use crate::ports::outbound::LedgerRpc;
use std::sync::Arc;
use tracing::debug;

/// Builds a fresh unsigned envelope per call and submits it for simulation.
pub struct CallBuilder<R: LedgerRpc> {
    config: ReaderConfig,
    rpc: Arc<R>,
    caller: CallerResolver<R>,
}

impl<R: LedgerRpc> CallBuilder<R> {
    /// Builder over `rpc` for the configured contract.
    pub fn new(config: ReaderConfig, rpc: Arc<R>) -> Self {
        let caller = CallerResolver::new(Arc::clone(&rpc));
        Self { config, rpc, caller }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Assemble the envelope for `method(args)` from `source`.
    ///
    /// Fails with a configuration error on an empty or malformed contract
    /// id and with `InvalidSymbol` on a bad method name.
    pub fn build_call(
        &self,
        method: &str,
        args: Vec<TaggedValue>,
        source: CallerContext,
    ) -> Result<SimulatedCall, ReaderError> {
        let (contract_hash, method) = self.check_target(method)?;
        Ok(self.assemble(contract_hash, method, args, source))
    }

    fn assemble(
        &self,
        contract_hash: Hash,
        method: Symbol,
        args: Vec<TaggedValue>,
        source: CallerContext,
    ) -> SimulatedCall {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0);
        SimulatedCall {
            contract_id: self.config.contract_id.clone(),
            contract_hash,
            method,
            args,
            fee: BASE_FEE,
            network: self.config.network,
            timeout_secs: CALL_TIMEOUT_SECS,
            valid_until: now + CALL_TIMEOUT_SECS,
            source,
        }
    }

    fn check_target(&self, method: &str) -> Result<(Hash, Symbol), ReaderError> {
        self.config.validate()?;
        let contract_hash = strkey::decode_contract(self.config.contract_id.trim())
            .map_err(|e| ReaderError::Configuration(format!("contract id: {}", e)))?;
        let method = Symbol::new(method)?;
        Ok((contract_hash, method))
    }

    /// Simulate `method(args)` and return the raw return value.
    ///
    /// `Ok(None)` when the simulation returned nothing. A host error in
    /// the outcome is `ReaderError::Simulation`.
    pub async fn simulate(
        &self,
        method: &str,
        args: Vec<TaggedValue>,
    ) -> Result<Option<TaggedValue>, ReaderError> {
        // Configuration problems surface before any I/O.
        let (contract_hash, method) = self.check_target(method)?;

        let source = self.caller.resolve().await;
        let call = self.assemble(contract_hash, method, args, source);
        debug!(
            "[pv-reader] Simulating {}({} args) on {} ({})",
            call.method,
            call.args.len(),
            call.contract_id,
            call.network
        );

        let outcome = self.rpc.simulate_transaction(&call).await?;
        if let Some(error) = outcome.error {
            return Err(ReaderError::Simulation(error));
        }
        Ok(outcome.return_value)
    }
}
