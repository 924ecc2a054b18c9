//! Core types for telemetry field configuration and decoded output.
//!
//! The type system maps directly onto the external settings-store schema:
//! - [`FieldMapping`] describes one named field and how it is addressed
//! - [`ParsingConfig`] governs frame boundary detection
//! - [`DecodedSnapshot`] is the label→value map published each decode tick
//! - [`SampleRate`] caps subscriber-side snapshot delivery

mod field;
mod parsing;
mod sample_rate;
mod snapshot;

pub use field::{Addressing, FieldKind, FieldMapping, Modifier, ValueSource};
pub use parsing::{FramingMethod, ParsingConfig};
pub use sample_rate::SampleRate;
pub use snapshot::{DecodedSnapshot, PLACEHOLDER};
