//! Field extraction from a located frame window.

use chrono::Local;

use super::modifier::apply_modifier;
use crate::types::{Addressing, FieldMapping, ValueSource};

const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Extract one field's display value from a frame window.
///
/// System-sourced fields ignore the frame entirely and render the current
/// date or time. Frame-sourced fields resolve a raw substring per the
/// field's addressing, drop a single leading alphabetic type-prefix
/// character (`N123.45` → `123.45`), and run the configured modifier.
///
/// Never fails: an out-of-range position yields an empty string, an absent
/// tag yields the configured fallback verbatim, and malformed numeric input
/// passes through the modifier untouched.
pub fn extract_field(frame: &str, field: &FieldMapping) -> String {
    let raw = match field.source {
        ValueSource::SystemDate => return Local::now().format(DATE_FORMAT).to_string(),
        ValueSource::SystemTime => return Local::now().format(TIME_FORMAT).to_string(),
        ValueSource::Frame => match &field.addressing {
            Addressing::Position { offset, length } => position_value(frame, *offset, *length),
            Addressing::Tag { marker, length, fallback } => {
                match tag_value(frame, marker, *length) {
                    Some(value) => value,
                    // Absent marker: the configured fallback, untouched.
                    None => return fallback.clone(),
                }
            }
        },
    };

    apply_modifier(&trim_type_prefix(raw), field.modifier)
}

/// Up to `length` characters starting at character `offset`, clipped to the
/// frame. An offset at or past the end yields an empty string.
fn position_value(frame: &str, offset: usize, length: usize) -> String {
    frame.chars().skip(offset).take(length).collect()
}

/// The run of characters following the first occurrence of `marker`, up to
/// the next comma, clipped to `length`. `None` when the marker is absent.
fn tag_value(frame: &str, marker: &str, length: usize) -> Option<String> {
    let at = frame.find(marker)?;
    let after = &frame[at + marker.len()..];
    Some(after.chars().take_while(|&ch| ch != ',').take(length).collect())
}

/// Drop a single leading alphabetic character. Telemetry sources commonly
/// prefix numeric payloads with a one-letter type tag.
fn trim_type_prefix(raw: String) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => chars.as_str().to_string(),
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldKind, Modifier};

    fn frame_field(addressing: Addressing, modifier: Modifier) -> FieldMapping {
        FieldMapping {
            id: "f1".into(),
            label: "F1".into(),
            addressing,
            modifier,
            data_type: FieldKind::Text,
            source: ValueSource::Frame,
        }
    }

    #[test]
    fn position_extraction_reads_offset_and_length() {
        let field = frame_field(Addressing::Position { offset: 1, length: 4 }, Modifier::None);
        assert_eq!(extract_field("#1234567", &field), "1234");
    }

    #[test]
    fn position_at_last_character_clips_to_one() {
        // offset = frame.len() - 1, length = 5: exactly the one remaining
        // character, not an out-of-range error.
        let field = frame_field(Addressing::Position { offset: 7, length: 5 }, Modifier::None);
        assert_eq!(extract_field("#1234567", &field), "7");
    }

    #[test]
    fn position_past_the_end_is_empty() {
        let field = frame_field(Addressing::Position { offset: 8, length: 3 }, Modifier::None);
        assert_eq!(extract_field("#1234567", &field), "");
    }

    #[test]
    fn tag_extraction_reads_after_marker() {
        let field = frame_field(
            Addressing::Tag { marker: "DPT".into(), length: 6, fallback: "n/a".into() },
            Modifier::None,
        );
        assert_eq!(extract_field("$HDG271.5,DPT42.75,TMP08", &field), "42.75");
    }

    #[test]
    fn tag_run_stops_at_comma_before_length() {
        let field = frame_field(
            Addressing::Tag { marker: "TMP".into(), length: 10, fallback: String::new() },
            Modifier::None,
        );
        assert_eq!(extract_field("TMP08,DPT42", &field), "08");
    }

    #[test]
    fn tag_run_clips_to_length() {
        let field = frame_field(
            Addressing::Tag { marker: "DPT".into(), length: 3, fallback: String::new() },
            Modifier::None,
        );
        assert_eq!(extract_field("DPT42.75", &field), "42.");
    }

    #[test]
    fn absent_tag_returns_fallback_verbatim() {
        // Verbatim: no type-prefix trim, no modifier.
        let field = frame_field(
            Addressing::Tag { marker: "ALT".into(), length: 5, fallback: "N0.00".into() },
            Modifier::Multiply(10.0),
        );
        assert_eq!(extract_field("DPT42.75,TMP08", &field), "N0.00");
    }

    #[test]
    fn leading_letter_is_trimmed_once() {
        let field = frame_field(Addressing::Position { offset: 0, length: 7 }, Modifier::None);
        assert_eq!(extract_field("N123.45", &field), "123.45");
    }

    #[test]
    fn value_without_letter_prefix_is_untouched() {
        let field = frame_field(Addressing::Position { offset: 0, length: 6 }, Modifier::None);
        assert_eq!(extract_field("123.45", &field), "123.45");
    }

    #[test]
    fn modifier_runs_after_prefix_trim() {
        let field = frame_field(Addressing::Position { offset: 0, length: 5 }, Modifier::Divide(2.0));
        assert_eq!(extract_field("N1000", &field), "500");
    }

    #[test]
    fn system_date_ignores_the_frame() {
        let mut field = frame_field(Addressing::Position { offset: 50, length: 5 }, Modifier::None);
        field.source = ValueSource::SystemDate;
        let value = extract_field("", &field);
        assert_eq!(value.matches('/').count(), 2);
    }

    #[test]
    fn system_time_ignores_the_frame() {
        let mut field = frame_field(Addressing::Position { offset: 50, length: 5 }, Modifier::None);
        field.source = ValueSource::SystemTime;
        let value = extract_field("", &field);
        assert_eq!(value.matches(':').count(), 2);
    }

    #[test]
    fn empty_result_is_not_trimmed() {
        let field = frame_field(Addressing::Position { offset: 99, length: 1 }, Modifier::Add(5.0));
        assert_eq!(extract_field("short", &field), "");
    }
}
