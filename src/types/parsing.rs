//! Frame boundary configuration.

use serde::{Deserialize, Serialize};

/// Governs frame boundary detection for one configuration.
///
/// `frame_length` must be large enough to contain every field's
/// `offset + length`; the decoder does not enforce this — a misconfiguration
/// simply yields truncated fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsingConfig {
    /// How individual fields address data. Both methods use the same
    /// framing algorithm; the distinction only matters to field addressing.
    #[serde(default)]
    pub method: FramingMethod,

    /// Exact expected length of one complete frame, in characters.
    #[serde(rename = "stringLength")]
    pub frame_length: usize,

    /// Start-of-frame marker. An empty marker disables framing: the whole
    /// buffer tail is treated as one frame.
    #[serde(default, rename = "startCharacter")]
    pub start_marker: String,
}

/// Field addressing method declared by the settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FramingMethod {
    /// Fields are addressed by fixed character position.
    #[default]
    Position,
    /// Fields are addressed by tag lookup.
    Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_config_uses_wire_names() {
        let yaml = r##"
method: id
stringLength: 48
startCharacter: "#"
"##;
        let cfg: ParsingConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(cfg.method, FramingMethod::Id);
        assert_eq!(cfg.frame_length, 48);
        assert_eq!(cfg.start_marker, "#");
    }

    #[test]
    fn start_marker_defaults_to_empty() {
        let cfg: ParsingConfig = serde_yaml_ng::from_str("stringLength: 32").unwrap();
        assert_eq!(cfg.method, FramingMethod::Position);
        assert!(cfg.start_marker.is_empty());
    }
}
