//! # Domain Module
//!
//! Core domain types for the contract read client.

pub mod entities;
pub mod errors;
pub mod tagged_value;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use tagged_value::*;
pub use value_objects::*;
