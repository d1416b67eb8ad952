//! PV-Timeline: command-line viewer for product event history.
//!
//! The binary wires `pv-contract-reader` to a terminal; this library holds
//! the rendering so it can be tested without a network.

pub mod format;

pub use format::{format_event_timestamp, relative_time, render_event, render_timeline};
