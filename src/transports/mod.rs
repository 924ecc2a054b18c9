//! Transport implementations.
//!
//! Only the serial transport is implemented. The network transport exists
//! in configuration (`connection.type: network`) and is rejected with
//! [`crate::DecoderError::UnsupportedTransport`] at connect time.

pub mod serial;

pub use serial::SerialTransport;
