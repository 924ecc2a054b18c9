//! The published label→value snapshot.

use std::collections::HashMap;

use serde::Serialize;

use super::FieldMapping;

/// Decorative placeholder for a field that has not resolved yet.
pub const PLACEHOLDER: &str = "---";

/// Mapping from field label to its current string value.
///
/// A snapshot is recomputed wholesale on every successful decode tick and
/// fully replaces its predecessor; it is never merged. Consumers treat it as
/// a flat string-keyed record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecodedSnapshot {
    values: HashMap<String, String>,
}

impl DecodedSnapshot {
    /// Create an empty snapshot with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { values: HashMap::with_capacity(capacity) }
    }

    /// Snapshot published on connect, before the first frame resolves:
    /// every configured label mapped to the [`PLACEHOLDER`].
    pub fn pending(fields: &[FieldMapping]) -> Self {
        let mut snapshot = Self::with_capacity(fields.len());
        for field in fields {
            snapshot.insert(field.label.clone(), PLACEHOLDER.to_string());
        }
        snapshot
    }

    /// Set a field's value, replacing any previous entry for the label.
    pub fn insert(&mut self, label: String, value: String) {
        self.values.insert(label, value);
    }

    /// Look up a field's current value by label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.values.get(label).map(String::as_str)
    }

    /// Iterate over (label, value) entries. Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Addressing, FieldKind, Modifier, ValueSource};

    fn field(label: &str) -> FieldMapping {
        FieldMapping {
            id: label.to_ascii_lowercase(),
            label: label.to_string(),
            addressing: Addressing::Position { offset: 0, length: 4 },
            modifier: Modifier::None,
            data_type: FieldKind::Text,
            source: ValueSource::Frame,
        }
    }

    #[test]
    fn pending_maps_every_label_to_placeholder() {
        let fields = vec![field("Depth"), field("Heading")];
        let snapshot = DecodedSnapshot::pending(&fields);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("Depth"), Some(PLACEHOLDER));
        assert_eq!(snapshot.get("Heading"), Some(PLACEHOLDER));
        assert_eq!(snapshot.get("Altitude"), None);
    }

    #[test]
    fn pending_with_no_fields_is_empty() {
        assert!(DecodedSnapshot::pending(&[]).is_empty());
    }

    #[test]
    fn insert_replaces_value_for_label() {
        let mut snapshot = DecodedSnapshot::with_capacity(1);
        snapshot.insert("Depth".into(), "12.4".into());
        snapshot.insert("Depth".into(), "12.6".into());
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("Depth"), Some("12.6"));
    }
}
