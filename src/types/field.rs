//! Field mapping types: how one named value is addressed inside a frame.

use serde::{Deserialize, Serialize};

/// One configured telemetry field.
///
/// The `label` doubles as the key in the published snapshot, so labels must
/// be unique within a configuration — [`crate::DecoderConfig::validate`]
/// rejects duplicates rather than letting one field silently overwrite
/// another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// Opaque stable identifier, unique within a configuration.
    pub id: String,

    /// Display name; used as the snapshot key.
    pub label: String,

    /// How the raw value is located inside the frame.
    pub addressing: Addressing,

    /// Optional numeric transform applied to the extracted value.
    #[serde(default)]
    pub modifier: Modifier,

    /// Display hint only; never affects extraction.
    #[serde(default)]
    pub data_type: FieldKind,

    /// Where the value comes from. Anything other than `Frame` bypasses
    /// frame addressing entirely.
    #[serde(default, rename = "defaultSource", alias = "source")]
    pub source: ValueSource,
}

/// Addressing scheme for locating a field's raw value inside a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Addressing {
    /// Read `length` characters starting at character `offset`.
    Position { offset: usize, length: usize },

    /// Find `marker` in the frame and take up to `length` characters that
    /// follow it (stopping at the next comma). `fallback` is used verbatim
    /// when the marker is absent.
    Tag { marker: String, length: usize, fallback: String },
}

/// Numeric transform applied after extraction.
///
/// Modifiers only apply to values that parse as a decimal number and contain
/// no alphabetic characters; anything else passes through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "op", content = "operand", rename_all = "camelCase")]
pub enum Modifier {
    #[default]
    None,
    Add(f64),
    Subtract(f64),
    Multiply(f64),
    Divide(f64),
}

/// Display classification for a field. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Date,
    Time,
}

/// Source of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueSource {
    /// Extracted from the telemetry frame per the field's addressing.
    #[default]
    Frame,
    /// Always the current date, formatted for display.
    SystemDate,
    /// Always the current time, formatted for display.
    SystemTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_mapping_deserializes_from_camel_case() {
        let yaml = r#"
id: depth
label: Depth
addressing:
  kind: position
  offset: 1
  length: 6
modifier:
  op: multiply
  operand: 0.5
dataType: number
source: frame
"#;
        let field: FieldMapping = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(field.label, "Depth");
        assert_eq!(field.addressing, Addressing::Position { offset: 1, length: 6 });
        assert_eq!(field.modifier, Modifier::Multiply(0.5));
        assert_eq!(field.data_type, FieldKind::Number);
        assert_eq!(field.source, ValueSource::Frame);
    }

    #[test]
    fn field_mapping_defaults_apply() {
        let yaml = r#"
id: heading
label: Heading
addressing:
  kind: tag
  marker: "HDG"
  length: 5
  fallback: "0.0"
"#;
        let field: FieldMapping = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(field.modifier, Modifier::None);
        assert_eq!(field.data_type, FieldKind::Text);
        assert_eq!(field.source, ValueSource::Frame);
    }

    #[test]
    fn system_sources_deserialize() {
        let field: ValueSource = serde_yaml_ng::from_str("systemDate").unwrap();
        assert_eq!(field, ValueSource::SystemDate);
        let field: ValueSource = serde_yaml_ng::from_str("systemTime").unwrap();
        assert_eq!(field, ValueSource::SystemTime);
    }
}
