//! # Domain Mapper
//!
//! Projection of decoded [`GenericValue`]s into typed records. Every
//! defaulting rule lives here:
//!
//! - numeric fields accept a non-negative integer or a decimal string,
//!   otherwise `0`
//! - text fields accept text, otherwise `""`
//! - `data_hash` is kept only when truthy
//! - a non-list id payload is an empty list; uncoercible elements are dropped
//! - a non-mapping event payload is absent

use super::decoder::{display_string, is_truthy};
use crate::domain::{EventBatch, EventRecord, GenericValue};
use serde_json::{Map, Value};

/// Project an id-list payload. Non-lists yield `[]`.
pub fn project_event_ids(value: &GenericValue) -> Vec<u64> {
    match value {
        Value::Array(items) => items.iter().filter_map(coerce_u64).collect(),
        _ => Vec::new(),
    }
}

/// Project an event payload. Non-mappings yield `None`.
pub fn project_event(value: &GenericValue) -> Option<EventRecord> {
    let fields = value.as_object()?;
    Some(EventRecord {
        event_id: number_field(fields, "event_id"),
        product_id: text_field(fields, "product_id"),
        actor: text_field(fields, "actor"),
        timestamp: number_field(fields, "timestamp"),
        event_kind: text_field(fields, "event_type"),
        note: text_field(fields, "note"),
        data_hash: fields
            .get("data_hash")
            .filter(|v| is_truthy(v))
            .map(display_string),
    })
}

/// Unsigned integer from a number or a decimal string.
pub fn coerce_u64(value: &GenericValue) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn number_field(fields: &Map<String, Value>, key: &str) -> u64 {
    fields.get(key).and_then(coerce_u64).unwrap_or(0)
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Most recent first. Equal timestamps keep their input order.
pub fn order_by_recency(events: &mut [EventRecord]) {
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Outcome of resolving one id.
pub type Resolution<E> = (u64, Result<Option<EventRecord>, E>);

/// Partition per-id outcomes into records, misses and failures, then order
/// the records by recency.
pub fn partition_resolutions<E: std::fmt::Display>(
    resolutions: impl IntoIterator<Item = Resolution<E>>,
) -> EventBatch {
    let mut batch = EventBatch::default();
    for (id, outcome) in resolutions {
        match outcome {
            Ok(Some(record)) => batch.events.push(record),
            Ok(None) => batch.missing.push(id),
            Err(e) => batch.failed.push((id, e.to_string())),
        }
    }
    order_by_recency(&mut batch.events);
    batch
}
