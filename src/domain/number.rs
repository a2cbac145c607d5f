//! Display-string conversion for calculator values
//!
//! The display is the single source of truth for the current operand, so
//! both directions matter: formatting a result for the display, and
//! re-parsing the display when an operator captures it. Parsing must
//! tolerate the transient partial entries the user can type ("", ".",
//! "-"), which behave as NaN the same way a lenient float parser would
//! treat them.

/// Formats an f64 result for the display
///
/// Finite values use the shortest decimal string that round-trips back
/// to the same f64. Non-finite values are spelled out so they re-parse
/// through [`parse_display`] to the same value.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    // Negative zero displays as plain "0"
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Parses the display text back into an f64
///
/// Transient entries that are not yet a complete number ("", ".", "-")
/// yield NaN, which then propagates through arithmetic like any other
/// non-finite value.
pub fn parse_display(text: &str) -> f64 {
    text.parse::<f64>().unwrap_or(f64::NAN)
}
