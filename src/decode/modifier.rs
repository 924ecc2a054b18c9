//! Numeric transforms for extracted field values.

use crate::types::Modifier;

/// Apply a modifier to an extracted raw value.
///
/// Modifiers are for calibration offsets and unit scaling, so they only
/// touch values that are plainly numeric: anything containing an alphabetic
/// character, and anything that fails to parse as a decimal, passes through
/// unchanged. Division by zero skips the operation rather than producing an
/// infinity.
pub fn apply_modifier(raw: &str, modifier: Modifier) -> String {
    if matches!(modifier, Modifier::None) || raw.chars().any(char::is_alphabetic) {
        return raw.to_string();
    }

    let Ok(value) = raw.trim().parse::<f64>() else {
        return raw.to_string();
    };

    let adjusted = match modifier {
        Modifier::None => value,
        Modifier::Add(operand) => value + operand,
        Modifier::Subtract(operand) => value - operand,
        Modifier::Multiply(operand) => value * operand,
        Modifier::Divide(operand) if operand == 0.0 => return raw.to_string(),
        Modifier::Divide(operand) => value / operand,
    };

    // Shortest round-trip decimal form: "500", "12.5", "-0.25".
    format!("{adjusted}")
}
