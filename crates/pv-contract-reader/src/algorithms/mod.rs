//! # Algorithms Module
//!
//! Pure transformations: tagged value decoding and record projection.

pub mod decoder;
pub mod mapper;

pub use decoder::{decode, decode_as_display_string, display_string, is_truthy};
pub use mapper::{
    coerce_u64, order_by_recency, partition_resolutions, project_event, project_event_ids,
    Resolution,
};
