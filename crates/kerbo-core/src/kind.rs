//! The variant tag carried by every [`Value`](crate::Value).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The active logical type of a value.
///
/// `Pointer` shares the string projection with `String`; it only tells the
/// evaluator that the text names another value instead of being literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    #[default]
    String,
    Integer,
    Float,
    Boolean,
    OrderedPair,
    Pointer,
}

impl ValueKind {
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::OrderedPair => "ordered_pair",
            ValueKind::Pointer => "pointer",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
