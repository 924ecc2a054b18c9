//! The pure decoding core: frame location, field extraction, modifiers.
//!
//! Everything in this module is synchronous and side-effect free (system
//! date/time fields aside); the async plumbing around it lives in
//! [`crate::driver`].

mod extract;
mod framing;
mod modifier;

pub use extract::extract_field;
pub use framing::locate_frame;
pub use modifier::apply_modifier;

use crate::types::{DecodedSnapshot, FieldMapping};

/// Decode every configured field against one frame window.
///
/// Produces the full replacement snapshot for a tick. Zero configured
/// fields produce an empty snapshot, not an error.
pub fn decode_fields(frame: &str, fields: &[FieldMapping]) -> DecodedSnapshot {
    let mut snapshot = DecodedSnapshot::with_capacity(fields.len());
    for field in fields {
        snapshot.insert(field.label.clone(), extract_field(frame, field));
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Addressing, FieldKind, Modifier, ValueSource};

    fn field(label: &str, addressing: Addressing, modifier: Modifier) -> FieldMapping {
        FieldMapping {
            id: label.to_ascii_lowercase(),
            label: label.to_string(),
            addressing,
            modifier,
            data_type: FieldKind::Number,
            source: ValueSource::Frame,
        }
    }

    #[test]
    fn decodes_every_configured_field() {
        let fields = vec![
            field("Depth", Addressing::Position { offset: 1, length: 4 }, Modifier::Divide(10.0)),
            field(
                "Heading",
                Addressing::Tag { marker: "H".into(), length: 3, fallback: "0".into() },
                Modifier::None,
            ),
        ];
        let snapshot = decode_fields("#0425H271", &fields);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("Depth"), Some("42.5"));
        assert_eq!(snapshot.get("Heading"), Some("271"));
    }

    #[test]
    fn zero_fields_yield_an_empty_snapshot() {
        assert!(decode_fields("#0425H271", &[]).is_empty());
    }
}
