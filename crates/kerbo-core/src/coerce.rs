//! Best-effort conversions used to synthesize a value's projections.
//!
//! Parsing never fails: a string that does not parse as the target type
//! degrades to a fixed fallback (`0`, `NaN`, `false`, the zero pair). Scripts
//! rely on these fallbacks, so they are part of the language semantics rather
//! than an error path.
//!
//! Formatting is chosen so every formatted scalar parses back through the
//! matching parser.

use crate::pair::OrderedPair;

/// Integer projection of a string: trimmed decimal with optional sign, else `0`.
pub fn parse_integer(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}

/// Float projection of a string, else `NaN`.
///
/// Accepts everything Rust's float parser does after trimming, including
/// `NaN`, `inf` and `Infinity` in any case.
pub fn parse_float(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}

/// Boolean projection of a string: `true`/`false` in any case, else `false`.
pub fn parse_boolean(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("true")
}

/// Pair projection of a string: the canonical `(X, Y)` form, else `(0, 0)`.
pub fn parse_pair(text: &str) -> OrderedPair {
    OrderedPair::parse(text).unwrap_or_default()
}

/// Integer projection of a float: truncation toward zero.
///
/// Out-of-range values saturate and `NaN` becomes `0`.
pub fn truncate_float(value: f64) -> i64 {
    value as i64
}

pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

pub fn format_boolean(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

/// Serde adapter for float fields.
///
/// JSON has no NaN or infinities, so non-finite floats are written in their
/// `format_float` spelling and read back from either a number or a string.
pub(crate) mod float_serde {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&super::format_float(*value))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid float literal: {text:?}"))),
        }
    }
}
