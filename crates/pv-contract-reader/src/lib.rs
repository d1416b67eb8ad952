//! # PV Contract Reader
//!
//! Read-only client for the provenance tracking contract on Soroban.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Read product event history from the contract without a wallet:
//! - Simulated, unsigned calls from an inert placeholder account
//! - An in-crate XDR codec for tagged values (`ScVal`), strkeys and envelopes
//! - Decoding of tagged values into generic JSON-like values
//! - Projection into typed [`EventRecord`]s with per-field defaults
//!
//! ## Flow
//!
//! ```text
//! ContractReaderApi ──► CallBuilder ──► CallerResolver ──► LedgerRpc::get_account
//!        ▲                   │
//!        │                   └──► LedgerRpc::simulate_transaction ──► TaggedValue
//!        │                                                                │
//!   project_event(s) ◄──────────────── decode ◄───────────────────────────┘
//! ```
//!
//! ## Failure policy
//!
//! | Error | Handling |
//! |-------|----------|
//! | Configuration (empty contract id, bad method symbol) | returned immediately |
//! | Caller lookup failure | synthesized caller with sequence 0 |
//! | Simulation failure, undecodable payload | empty list / `None` |
//! | Transport, RPC error object on a single event read | `None` |
//! | Transport, RPC error object on an id listing | returned to the caller |
//!
//! ## Module Structure
//!
//! ```text
//! pv-contract-reader/
//! ├── domain/          # TaggedValue, SimulatedCall, EventRecord, errors
//! ├── codec/           # XDR primitives, ScVal, strkey, envelope
//! ├── algorithms/      # decoder, mapper
//! ├── ports/           # ContractReaderApi, LedgerRpc (+ MockLedgerRpc)
//! ├── adapters/        # SorobanRpcClient
//! └── service/         # ContractReaderService, CallBuilder, CallerResolver
//! ```
//!
//! ## Known limitation
//!
//! 128-bit integers decode to their low 64 bits and 256-bit integers to 0.
//! Consumers needing exact large integers must read the [`TaggedValue`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod codec;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::SorobanRpcClient;
pub use algorithms::{decode, decode_as_display_string, project_event, project_event_ids};
pub use config::ReaderConfig;
pub use domain::{
    CallerContext, CodecError, EventBatch, EventRecord, GenericValue, Network, ReaderError,
    ScAddress, SimulatedCall, SimulationOutcome, Symbol, TaggedValue, PLACEHOLDER_ACCOUNT,
};
pub use ports::{ContractReaderApi, LedgerRpc, MockLedgerRpc};
pub use service::{
    CallBuilder, CallerResolver, ContractReaderService, METHOD_GET_EVENT,
    METHOD_GET_PRODUCT_EVENT_IDS,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
