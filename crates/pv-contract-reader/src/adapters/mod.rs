//! # Adapters Module
//!
//! Concrete implementations of the outbound ports.

pub mod rpc_types;
pub mod soroban_rpc;

pub use soroban_rpc::SorobanRpcClient;
