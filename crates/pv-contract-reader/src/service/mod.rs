//! # Contract Reader Service
//!
//! Implements [`ContractReaderApi`] on top of any [`LedgerRpc`].
//!
//! ## Read policy
//!
//! | Failure | `list_event_ids` | `get_event` | `fetch_event_batch` |
//! |---------|------------------|-------------|---------------------|
//! | Configuration | error | error | error |
//! | Transport / RPC | error | `None` | listed in `failed` |
//! | Simulation / codec | `[]` | `None` | listed in `missing` |
//! | Wrong payload shape | `[]` | `None` | listed in `missing` |

pub mod caller;
pub mod simulate;

pub use caller::CallerResolver;
pub use simulate::CallBuilder;

use crate::algorithms::{decode, partition_resolutions, project_event, project_event_ids};
use crate::config::ReaderConfig;
use crate::domain::{EventBatch, EventRecord, ReaderError, TaggedValue};
use crate::ports::inbound::ContractReaderApi;
use crate::ports::outbound::LedgerRpc;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Contract method listing a product's event ids.
pub const METHOD_GET_PRODUCT_EVENT_IDS: &str = "get_product_event_ids";

/// Contract method returning one event.
pub const METHOD_GET_EVENT: &str = "get_event";

/// The contract reader.
pub struct ContractReaderService<R: LedgerRpc> {
    calls: CallBuilder<R>,
}

impl<R: LedgerRpc> ContractReaderService<R> {
    /// Create a reader. The configuration is validated up front.
    pub fn new(config: ReaderConfig, rpc: R) -> Result<Self, ReaderError> {
        Self::with_shared_rpc(config, Arc::new(rpc))
    }

    /// Create a reader over an already shared RPC handle.
    pub fn with_shared_rpc(config: ReaderConfig, rpc: Arc<R>) -> Result<Self, ReaderError> {
        config.validate()?;
        Ok(Self {
            calls: CallBuilder::new(config, rpc),
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &ReaderConfig {
        self.calls.config()
    }

    /// Low-level simulated call, for methods without a typed projection.
    pub async fn simulate(
        &self,
        method: &str,
        args: Vec<TaggedValue>,
    ) -> Result<Option<TaggedValue>, ReaderError> {
        self.calls.simulate(method, args).await
    }

    /// Simulate, turning read misses into `None`.
    async fn read(
        &self,
        method: &str,
        args: Vec<TaggedValue>,
    ) -> Result<Option<TaggedValue>, ReaderError> {
        match self.calls.simulate(method, args).await {
            Ok(value) => Ok(value),
            Err(e) if e.is_read_miss() => {
                warn!("[pv-reader] {} produced no data: {}", method, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Read one event, keeping transport and RPC failures as errors.
    async fn fetch_event(&self, event_id: u64) -> Result<Option<EventRecord>, ReaderError> {
        let args = vec![TaggedValue::U64(event_id)];
        Ok(self
            .read(METHOD_GET_EVENT, args)
            .await?
            .and_then(|raw| project_event(&decode(&raw))))
    }
}

#[async_trait]
impl<R: LedgerRpc> ContractReaderApi for ContractReaderService<R> {
    async fn list_event_ids(&self, product_id: &str) -> Result<Vec<u64>, ReaderError> {
        let args = vec![TaggedValue::from(product_id)];
        let ids = match self.read(METHOD_GET_PRODUCT_EVENT_IDS, args).await? {
            Some(raw) => project_event_ids(&decode(&raw)),
            None => Vec::new(),
        };
        debug!("[pv-reader] Product {} has {} events", product_id, ids.len());
        Ok(ids)
    }

    async fn get_event(&self, event_id: u64) -> Result<Option<EventRecord>, ReaderError> {
        match self.fetch_event(event_id).await {
            Err(e) if !e.is_configuration() => {
                warn!("[pv-reader] Event {} unavailable: {}", event_id, e);
                Ok(None)
            }
            result => result,
        }
    }

    async fn fetch_event_batch(&self, product_id: &str) -> Result<EventBatch, ReaderError> {
        let ids = self.list_event_ids(product_id).await?;
        if ids.is_empty() {
            return Ok(EventBatch::default());
        }

        let resolutions = join_all(ids.iter().map(|&id| async move {
            (id, self.fetch_event(id).await)
        }))
        .await;

        let batch = partition_resolutions(resolutions);
        for (id, reason) in &batch.failed {
            warn!("[pv-reader] Event {} of {} failed: {}", id, product_id, reason);
        }
        if !batch.missing.is_empty() {
            debug!(
                "[pv-reader] {} events of {} resolved to nothing: {:?}",
                batch.missing.len(),
                product_id,
                batch.missing
            );
        }
        Ok(batch)
    }
}
