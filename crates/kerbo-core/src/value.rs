//! The dynamic runtime value.
//!
//! A [`Value`] carries a variant tag plus five projections (string, integer,
//! float, boolean, ordered pair). All five are recomputed from the source
//! whenever the value is written, so any projection can be read regardless of
//! the tag. Operators pick which projection to use from the operands' tags; see
//! [`crate::ops`].
//!
//! # Synthesis rules
//!
//! | source        | string          | integer          | float       | boolean         | pair        |
//! |---------------|-----------------|------------------|-------------|-----------------|-------------|
//! | string        | as given        | parse, else 0    | parse, else NaN | parse, else false | parse, else (0, 0) |
//! | integer `i`   | decimal         | `i`              | `i`         | `i != 0`        | `(i, 0)`    |
//! | float `f`     | shortest decimal| truncated `f`    | `f`         | truncated `!= 0`| `(trunc, 0)`|
//! | boolean `b`   | `True`/`False`  | `1`/`0`          | `1.0`/`0.0` | `b`             | `(1/0, 0)`  |
//! | pair `p`      | `(X, Y)`        | `p.x`            | `p.x`       | `p.x != 0`      | `p`         |

use crate::coerce;
use crate::kind::ValueKind;
use crate::pair::OrderedPair;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically typed script value.
///
/// Cloning yields an independent copy. Equality (`PartialEq`) compares the tag
/// and the source projection; it is representation equality, not the script's
/// `==` operator (see [`Value::equals`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "Literal", from = "Literal")]
pub struct Value {
    is_null: bool,
    kind: ValueKind,
    string: String,
    integer: i64,
    float: f64,
    boolean: bool,
    pair: OrderedPair,
}

impl Value {
    /// The null sentinel. Every projection reads as its default and every
    /// operator rejects it.
    pub fn null() -> Self {
        Value {
            is_null: true,
            kind: ValueKind::String,
            string: String::new(),
            integer: 0,
            float: f64::NAN,
            boolean: false,
            pair: OrderedPair::ZERO,
        }
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        let mut v = Value::null();
        v.set_string(value);
        v
    }

    /// A string tagged as a symbolic reference for the evaluator to resolve.
    pub fn pointer(name: impl Into<String>) -> Self {
        let mut v = Value::null();
        v.set_pointer(name);
        v
    }

    pub fn from_integer(value: i64) -> Self {
        let mut v = Value::null();
        v.set_integer(value);
        v
    }

    pub fn from_float(value: f64) -> Self {
        let mut v = Value::null();
        v.set_float(value);
        v
    }

    pub fn from_boolean(value: bool) -> Self {
        let mut v = Value::null();
        v.set_boolean(value);
        v
    }

    pub fn from_pair(value: OrderedPair) -> Self {
        let mut v = Value::null();
        v.set_pair(value);
        v
    }

    pub fn is_null(&self) -> bool {
        self.is_null
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn as_string(&self) -> &str {
        &self.string
    }

    pub fn as_integer(&self) -> i64 {
        self.integer
    }

    pub fn as_float(&self) -> f64 {
        self.float
    }

    pub fn as_boolean(&self) -> bool {
        self.boolean
    }

    pub fn as_pair(&self) -> OrderedPair {
        self.pair
    }

    /// The referenced name, if this value is a pointer.
    pub fn pointer_name(&self) -> Option<&str> {
        match self.kind {
            ValueKind::Pointer if !self.is_null => Some(&self.string),
            _ => None,
        }
    }

    pub fn set_string(&mut self, value: impl Into<String>) {
        self.assign_text(value.into(), ValueKind::String);
    }

    pub fn set_pointer(&mut self, name: impl Into<String>) {
        self.assign_text(name.into(), ValueKind::Pointer);
    }

    fn assign_text(&mut self, text: String, kind: ValueKind) {
        self.is_null = false;
        self.kind = kind;
        self.integer = coerce::parse_integer(&text);
        self.float = coerce::parse_float(&text);
        self.boolean = coerce::parse_boolean(&text);
        self.pair = coerce::parse_pair(&text);
        self.string = text;
    }

    pub fn set_integer(&mut self, value: i64) {
        self.is_null = false;
        self.kind = ValueKind::Integer;
        self.integer = value;
        self.string = value.to_string();
        self.float = value as f64;
        self.boolean = value != 0;
        self.pair = OrderedPair::new(value, 0);
    }

    pub fn set_float(&mut self, value: f64) {
        let truncated = coerce::truncate_float(value);
        self.is_null = false;
        self.kind = ValueKind::Float;
        self.float = value;
        self.integer = truncated;
        self.boolean = truncated != 0;
        self.string = coerce::format_float(value);
        self.pair = OrderedPair::new(truncated, 0);
    }

    pub fn set_boolean(&mut self, value: bool) {
        let integer = i64::from(value);
        self.is_null = false;
        self.kind = ValueKind::Boolean;
        self.boolean = value;
        self.string = coerce::format_boolean(value);
        self.integer = integer;
        self.float = integer as f64;
        self.pair = OrderedPair::new(integer, 0);
    }

    pub fn set_pair(&mut self, value: OrderedPair) {
        self.is_null = false;
        self.kind = ValueKind::OrderedPair;
        self.pair = value;
        self.integer = value.x();
        self.float = value.x() as f64;
        self.boolean = value.x() != 0;
        self.string = value.to_string();
    }

    /// Re-derive every projection from the one matching the current tag.
    ///
    /// The tag is unchanged; null stays null. Idempotent.
    pub fn refresh(&mut self) {
        if self.is_null {
            return;
        }
        match self.kind {
            ValueKind::String | ValueKind::Pointer => {
                let text = std::mem::take(&mut self.string);
                self.assign_text(text, self.kind);
            }
            ValueKind::Integer => self.set_integer(self.integer),
            ValueKind::Float => self.set_float(self.float),
            ValueKind::Boolean => self.set_boolean(self.boolean),
            ValueKind::OrderedPair => self.set_pair(self.pair),
        }
    }

    /// The source this value was built from.
    pub fn literal(&self) -> Literal {
        if self.is_null {
            return Literal::Null;
        }
        match self.kind {
            ValueKind::String => Literal::String(self.string.clone()),
            ValueKind::Pointer => Literal::Pointer(self.string.clone()),
            ValueKind::Integer => Literal::Integer(self.integer),
            ValueKind::Float => Literal::Float(self.float),
            ValueKind::Boolean => Literal::Boolean(self.boolean),
            ValueKind::OrderedPair => Literal::OrderedPair(self.pair),
        }
    }

    /// A snapshot of the tag and all five projections.
    pub fn projections(&self) -> Projections {
        Projections {
            is_null: self.is_null,
            kind: self.kind,
            string: self.string.clone(),
            integer: self.integer,
            float: self.float,
            boolean: self.boolean,
            pair: self.pair,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::null()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.is_null || other.is_null {
            return self.is_null == other.is_null;
        }
        self.kind == other.kind
            && match self.kind {
                ValueKind::String | ValueKind::Pointer => self.string == other.string,
                ValueKind::Integer => self.integer == other.integer,
                ValueKind::Float => self.float == other.float,
                ValueKind::Boolean => self.boolean == other.boolean,
                ValueKind::OrderedPair => self.pair == other.pair,
            }
    }
}

/// Prints the string projection (empty for null).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::from_string(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::from_string(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::from_integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::from_integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::from_float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::from_boolean(value)
    }
}

impl From<OrderedPair> for Value {
    fn from(value: OrderedPair) -> Self {
        Value::from_pair(value)
    }
}

/// The source of a value, one variant per tag plus null.
///
/// This is the serialized form of [`Value`]:
/// `{"kind": "integer", "value": 7}`, `{"kind": "null"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Null,
    String(String),
    Integer(i64),
    Float(#[serde(with = "coerce::float_serde")] f64),
    Boolean(bool),
    OrderedPair(OrderedPair),
    Pointer(String),
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Null => Value::null(),
            Literal::String(s) => Value::from_string(s),
            Literal::Integer(i) => Value::from_integer(i),
            Literal::Float(f) => Value::from_float(f),
            Literal::Boolean(b) => Value::from_boolean(b),
            Literal::OrderedPair(p) => Value::from_pair(p),
            Literal::Pointer(name) => Value::pointer(name),
        }
    }
}

impl From<Value> for Literal {
    fn from(value: Value) -> Self {
        value.literal()
    }
}

/// Every projection of a value at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projections {
    pub is_null: bool,
    pub kind: ValueKind,
    pub string: String,
    pub integer: i64,
    #[serde(with = "coerce::float_serde")]
    pub float: f64,
    pub boolean: bool,
    pub pair: OrderedPair,
}
