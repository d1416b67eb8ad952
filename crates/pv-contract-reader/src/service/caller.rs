//! Caller context resolution.

use crate::domain::{CallerContext, PLACEHOLDER_ACCOUNT};
use crate::ports::outbound::LedgerRpc;
use std::sync::Arc;
use tracing::debug;

/// Resolves the source account for simulated calls.
///
/// The placeholder account is looked up on the ledger first. Any failure
/// (unreachable RPC, unfunded account) yields the synthesized context with
/// sequence 0, so [`CallerResolver::resolve`] never fails.
pub struct CallerResolver<R: LedgerRpc> {
    rpc: Arc<R>,
    identity: String,
}

impl<R: LedgerRpc> CallerResolver<R> {
    /// Resolver for the placeholder account.
    pub fn new(rpc: Arc<R>) -> Self {
        Self::for_identity(rpc, PLACEHOLDER_ACCOUNT)
    }

    /// Resolver for an explicit identity.
    pub fn for_identity(rpc: Arc<R>, identity: impl Into<String>) -> Self {
        Self {
            rpc,
            identity: identity.into(),
        }
    }

    /// Identity being resolved.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Fresh caller context. Never fails.
    pub async fn resolve(&self) -> CallerContext {
        match self.rpc.get_account(&self.identity).await {
            Ok(context) => context,
            Err(e) => {
                debug!(
                    "[pv-reader] Caller lookup for {} failed ({}), using synthesized context",
                    self.identity, e
                );
                CallerContext::new(self.identity.clone(), 0)
            }
        }
    }
}
