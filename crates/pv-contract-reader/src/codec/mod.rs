//! # Codec Module
//!
//! XDR wire format: primitives, tagged values, strkeys and the call envelope.

pub mod envelope;
pub mod scval;
pub mod strkey;
pub mod xdr;

pub use scval::{read_scval, write_scval};
pub use xdr::{XdrReader, XdrWriter};
