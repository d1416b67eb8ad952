//! # Outbound Ports
//!
//! The remote ledger RPC the reader depends on.

use crate::domain::{CallerContext, ReaderError, SimulatedCall, SimulationOutcome};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Ledger RPC - outbound port.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Fetch the account context (identity and sequence) of `identity`.
    async fn get_account(&self, identity: &str) -> Result<CallerContext, ReaderError>;

    /// Simulate a call without committing it.
    async fn simulate_transaction(
        &self,
        call: &SimulatedCall,
    ) -> Result<SimulationOutcome, ReaderError>;
}

#[async_trait]
impl<T: LedgerRpc + ?Sized> LedgerRpc for Arc<T> {
    async fn get_account(&self, identity: &str) -> Result<CallerContext, ReaderError> {
        (**self).get_account(identity).await
    }

    async fn simulate_transaction(
        &self,
        call: &SimulatedCall,
    ) -> Result<SimulationOutcome, ReaderError> {
        (**self).simulate_transaction(call).await
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Scripted simulation handler.
pub type SimulationHandler =
    Arc<dyn Fn(&SimulatedCall) -> Result<SimulationOutcome, ReaderError> + Send + Sync>;

/// Mock ledger RPC for testing.
#[derive(Clone)]
pub struct MockLedgerRpc {
    /// Account returned by `get_account`; `None` reports the account missing.
    pub account: Option<CallerContext>,
    /// Produces the outcome of each simulated call.
    pub handler: SimulationHandler,
    /// Every call submitted for simulation, in order.
    pub calls: Arc<Mutex<Vec<SimulatedCall>>>,
}

impl Default for MockLedgerRpc {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedgerRpc {
    /// Mock with no account on the ledger and empty simulation results.
    pub fn new() -> Self {
        Self {
            account: None,
            handler: Arc::new(|_| Ok(SimulationOutcome::default())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Report `account` from `get_account`.
    pub fn with_account(mut self, account: CallerContext) -> Self {
        self.account = Some(account);
        self
    }

    /// Script simulation outcomes.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&SimulatedCall) -> Result<SimulationOutcome, ReaderError> + Send + Sync + 'static,
    {
        self.handler = Arc::new(handler);
        self
    }

    /// Snapshot of recorded calls.
    pub fn recorded_calls(&self) -> Vec<SimulatedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl LedgerRpc for MockLedgerRpc {
    async fn get_account(&self, identity: &str) -> Result<CallerContext, ReaderError> {
        self.account
            .clone()
            .ok_or_else(|| ReaderError::AccountNotFound(identity.to_string()))
    }

    async fn simulate_transaction(
        &self,
        call: &SimulatedCall,
    ) -> Result<SimulationOutcome, ReaderError> {
        self.calls.lock().push(call.clone());
        (self.handler)(call)
    }
}
