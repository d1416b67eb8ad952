//! # Inbound Ports
//!
//! What the contract reader offers to presentation collaborators.

use crate::domain::{EventBatch, EventRecord, ReaderError};
use async_trait::async_trait;

/// Contract reader API - inbound port.
///
/// Reads that produce nothing come back as `[]` or `None`. Configuration
/// failures are always errors; transport failures are errors everywhere
/// except `get_event`.
#[async_trait]
pub trait ContractReaderApi: Send + Sync {
    /// Event ids recorded for a product, in contract order.
    async fn list_event_ids(&self, product_id: &str) -> Result<Vec<u64>, ReaderError>;

    /// A single event, or `None` when the contract has nothing usable or
    /// the call itself failed.
    async fn get_event(&self, event_id: u64) -> Result<Option<EventRecord>, ReaderError>;

    /// Resolve every event of a product concurrently and partition the
    /// outcomes. Records are ordered most recent first.
    async fn fetch_event_batch(&self, product_id: &str) -> Result<EventBatch, ReaderError>;

    /// Resolved events of a product, most recent first.
    async fn fetch_all_events(&self, product_id: &str) -> Result<Vec<EventRecord>, ReaderError> {
        Ok(self.fetch_event_batch(product_id).await?.events)
    }
}
