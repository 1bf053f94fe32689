//! Operator dispatch with implicit coercion.
//!
//! Binary operators never require matching tags. Instead they walk a fixed
//! precedence ladder and the first kind carried by *either* operand governs the
//! operation; both operands are then read through that kind's projection.
//!
//! - `== != + - * / % ^`: string > float > integer > boolean > ordered pair
//! - `& |`: string (rejected) > integer > boolean > float (rejected) > ordered pair
//!
//! A float operand fails `&` and `|` wherever it sits, so `1.0 & 1` is an
//! error even though integer governs that pair.
//!
//! Pointers appear on neither ladder. Two pointer operands therefore govern
//! nothing and produce the null value. Unary operators dispatch on the single
//! operand's own tag.

use crate::coerce;
use crate::error::{Result, ValueError};
use crate::kind::ValueKind;
use crate::pair::OrderedPair;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Absolute tolerance used by float `==`.
pub const FLOAT_EQUALITY_TOLERANCE: f64 = 10.0 * f64::EPSILON;

const ARITHMETIC_LADDER: [ValueKind; 5] = [
    ValueKind::String,
    ValueKind::Float,
    ValueKind::Integer,
    ValueKind::Boolean,
    ValueKind::OrderedPair,
];

const LOGICAL_LADDER: [ValueKind; 5] = [
    ValueKind::String,
    ValueKind::Integer,
    ValueKind::Boolean,
    ValueKind::Float,
    ValueKind::OrderedPair,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Equal,
    NotEqual,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    BitAnd,
    BitOr,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 10] = [
        BinaryOp::Equal,
        BinaryOp::NotEqual,
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Rem,
        BinaryOp::Pow,
        BinaryOp::BitAnd,
        BinaryOp::BitOr,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
        }
    }

    fn description(self) -> &'static str {
        match self {
            BinaryOp::Equal | BinaryOp::NotEqual => "comparison",
            BinaryOp::Add => "addition",
            BinaryOp::Sub => "subtraction",
            BinaryOp::Mul => "multiplication",
            BinaryOp::Div => "division",
            BinaryOp::Rem => "remainder division",
            BinaryOp::Pow => "exponentiation",
            BinaryOp::BitAnd => "bitwise or logical AND",
            BinaryOp::BitOr => "bitwise or logical OR",
        }
    }

    fn ladder(self) -> &'static [ValueKind; 5] {
        match self {
            BinaryOp::BitAnd | BinaryOp::BitOr => &LOGICAL_LADDER,
            _ => &ARITHMETIC_LADDER,
        }
    }

    fn rejects(self, operand: &str) -> ValueError {
        ValueError::invalid(format!(
            "cannot perform {} with {operand}",
            self.description()
        ))
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BinaryOp {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        BinaryOp::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| ValueError::invalid(format!("unknown binary operator `{s}`")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Identity,
    Negate,
    Complement,
    Not,
    Increment,
    Decrement,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 6] = [
        UnaryOp::Identity,
        UnaryOp::Negate,
        UnaryOp::Complement,
        UnaryOp::Not,
        UnaryOp::Increment,
        UnaryOp::Decrement,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Identity => "+",
            UnaryOp::Negate => "-",
            UnaryOp::Complement => "~",
            UnaryOp::Not => "!",
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for UnaryOp {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        UnaryOp::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| ValueError::invalid(format!("unknown unary operator `{s}`")))
    }
}

/// First kind on `ladder` carried by either operand.
fn governing_kind(ladder: &[ValueKind], lhs: &Value, rhs: &Value) -> Option<ValueKind> {
    ladder
        .iter()
        .copied()
        .find(|&kind| lhs.kind() == kind || rhs.kind() == kind)
}

impl Value {
    /// Apply a binary operator, coercing both operands to the governing kind.
    pub fn binary(&self, op: BinaryOp, rhs: &Value) -> Result<Value> {
        self.dispatch_binary(op, rhs).inspect_err(|err| {
            debug!(
                operator = op.symbol(),
                lhs = %self.kind(),
                rhs = %rhs.kind(),
                error = %err,
                "binary operator rejected"
            )
        })
    }

    fn dispatch_binary(&self, op: BinaryOp, rhs: &Value) -> Result<Value> {
        if self.is_null() || rhs.is_null() {
            return Err(ValueError::NullValue {
                operator: op.symbol(),
            });
        }

        if op == BinaryOp::NotEqual {
            let equal = self.dispatch_binary(BinaryOp::Equal, rhs)?;
            if equal.is_null() {
                return Ok(equal);
            }
            return Ok(Value::from_boolean(!equal.as_boolean()));
        }

        let Some(kind) = governing_kind(op.ladder(), self, rhs) else {
            trace!(operator = op.symbol(), "no governing kind, yielding null");
            return Ok(Value::null());
        };
        trace!(operator = op.symbol(), governing = %kind, "ladder resolved");

        // Float can never take part in `&`/`|`, even when the other operand
        // outranks it on the ladder. String keeps its own rejection.
        if matches!(op, BinaryOp::BitAnd | BinaryOp::BitOr)
            && kind != ValueKind::String
            && (self.kind() == ValueKind::Float || rhs.kind() == ValueKind::Float)
        {
            return Err(op.rejects("a floating-point value"));
        }

        match kind {
            ValueKind::String => string_binary(op, self, rhs),
            ValueKind::Float => float_binary(op, self, rhs),
            ValueKind::Integer => integer_binary(op, self, rhs),
            ValueKind::Boolean => boolean_binary(op, self, rhs),
            ValueKind::OrderedPair => pair_binary(op, self, rhs),
            ValueKind::Pointer => Ok(Value::null()),
        }
    }

    /// Apply a unary operator, dispatching on this value's own tag.
    pub fn unary(&self, op: UnaryOp) -> Result<Value> {
        self.dispatch_unary(op).inspect_err(|err| {
            debug!(
                operator = op.symbol(),
                operand = %self.kind(),
                error = %err,
                "unary operator rejected"
            )
        })
    }

    fn dispatch_unary(&self, op: UnaryOp) -> Result<Value> {
        if self.is_null() {
            return Err(ValueError::NullValue {
                operator: op.symbol(),
            });
        }

        let i = self.as_integer();
        match (op, self.kind()) {
            (UnaryOp::Identity, _) => Ok(self.clone()),

            (UnaryOp::Not, ValueKind::Boolean) => Ok(Value::from_boolean(!self.as_boolean())),
            (UnaryOp::Not, _) => Err(ValueError::invalid(
                "cannot perform logical-NOT on non-boolean values",
            )),

            (_, ValueKind::Pointer) => Ok(Value::null()),

            (UnaryOp::Negate, ValueKind::String) => Err(ValueError::invalid(
                "cannot perform mathematical negation on a string value",
            )),
            (UnaryOp::Negate, ValueKind::Float) => Ok(Value::from_float(-self.as_float())),
            (UnaryOp::Negate, ValueKind::Integer) => Ok(Value::from_integer(i.wrapping_neg())),
            (UnaryOp::Negate, ValueKind::Boolean) => Ok(Value::from_boolean(i.wrapping_neg() != 0)),
            (UnaryOp::Negate, ValueKind::OrderedPair) => Ok(Value::from_pair(-self.as_pair())),

            (UnaryOp::Complement, ValueKind::String) => Err(ValueError::invalid(
                "cannot perform binary negation on a string value",
            )),
            (UnaryOp::Complement, ValueKind::Float) => Err(ValueError::invalid(
                "cannot perform binary negation on a floating-point value",
            )),
            (UnaryOp::Complement, ValueKind::Integer) => Ok(Value::from_integer(!i)),
            (UnaryOp::Complement, ValueKind::Boolean) => Ok(Value::from_boolean(!i != 0)),
            (UnaryOp::Complement, ValueKind::OrderedPair) => Ok(Value::from_pair(!self.as_pair())),

            (UnaryOp::Increment, ValueKind::String) => Err(ValueError::invalid(
                "cannot perform incrementation with a string value",
            )),
            (UnaryOp::Increment, ValueKind::Float) => Ok(Value::from_float(self.as_float() + 1.0)),
            (UnaryOp::Increment, ValueKind::Integer) => Ok(Value::from_integer(i.wrapping_add(1))),
            (UnaryOp::Increment, ValueKind::Boolean) => {
                Ok(Value::from_boolean(i.wrapping_add(1) != 0))
            }
            (UnaryOp::Increment, ValueKind::OrderedPair) => {
                Ok(Value::from_pair(self.as_pair().increment()))
            }

            (UnaryOp::Decrement, ValueKind::String) => Err(ValueError::invalid(
                "cannot perform decrementation with a string value",
            )),
            (UnaryOp::Decrement, ValueKind::Float) => Ok(Value::from_float(self.as_float() - 1.0)),
            (UnaryOp::Decrement, ValueKind::Integer) => Ok(Value::from_integer(i.wrapping_sub(1))),
            (UnaryOp::Decrement, ValueKind::Boolean) => {
                Ok(Value::from_boolean(i.wrapping_sub(1) != 0))
            }
            (UnaryOp::Decrement, ValueKind::OrderedPair) => {
                Ok(Value::from_pair(self.as_pair().decrement()))
            }
        }
    }

    pub fn equals(&self, rhs: &Value) -> Result<Value> {
        self.binary(BinaryOp::Equal, rhs)
    }

    pub fn not_equals(&self, rhs: &Value) -> Result<Value> {
        self.binary(BinaryOp::NotEqual, rhs)
    }

    pub fn pow(&self, power: &Value) -> Result<Value> {
        self.binary(BinaryOp::Pow, power)
    }

    pub fn identity(&self) -> Result<Value> {
        self.unary(UnaryOp::Identity)
    }

    pub fn negate(&self) -> Result<Value> {
        self.unary(UnaryOp::Negate)
    }

    pub fn complement(&self) -> Result<Value> {
        self.unary(UnaryOp::Complement)
    }

    pub fn logical_not(&self) -> Result<Value> {
        self.unary(UnaryOp::Not)
    }

    pub fn increment(&self) -> Result<Value> {
        self.unary(UnaryOp::Increment)
    }

    pub fn decrement(&self) -> Result<Value> {
        self.unary(UnaryOp::Decrement)
    }
}

fn string_binary(op: BinaryOp, a: &Value, b: &Value) -> Result<Value> {
    match op {
        BinaryOp::Equal => Ok(Value::from_boolean(a.as_string() == b.as_string())),
        BinaryOp::Add => Ok(Value::from_string(format!(
            "{}{}",
            a.as_string(),
            b.as_string()
        ))),
        _ => Err(op.rejects("a string value")),
    }
}

fn float_binary(op: BinaryOp, a: &Value, b: &Value) -> Result<Value> {
    let (x, y) = (a.as_float(), b.as_float());
    let result = match op {
        BinaryOp::Equal => return Ok(Value::from_boolean((x - y).abs() < FLOAT_EQUALITY_TOLERANCE)),
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        BinaryOp::Div | BinaryOp::Rem if y == 0.0 => {
            return Err(ValueError::DivideByZero {
                operator: op.symbol(),
            })
        }
        BinaryOp::Div => x / y,
        BinaryOp::Rem => x % y,
        BinaryOp::Pow => x.powf(y),
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::NotEqual => {
            return Err(op.rejects("a floating-point value"))
        }
    };
    Ok(Value::from_float(result))
}

/// Integer arithmetic shared by the integer and boolean ladders.
fn integer_arithmetic(op: BinaryOp, a: &Value, b: &Value) -> Result<i64> {
    let (x, y) = (a.as_integer(), b.as_integer());
    match op {
        BinaryOp::Add => Ok(x.wrapping_add(y)),
        BinaryOp::Sub => Ok(x.wrapping_sub(y)),
        BinaryOp::Mul => Ok(x.wrapping_mul(y)),
        BinaryOp::Div | BinaryOp::Rem if y == 0 => Err(ValueError::DivideByZero {
            operator: op.symbol(),
        }),
        BinaryOp::Div => Ok(x.wrapping_div(y)),
        BinaryOp::Rem => Ok(x.wrapping_rem(y)),
        BinaryOp::Pow => Ok(coerce::truncate_float(a.as_float().powf(b.as_float()))),
        BinaryOp::BitAnd => Ok(x & y),
        BinaryOp::BitOr => Ok(x | y),
        BinaryOp::Equal | BinaryOp::NotEqual => Ok(i64::from(x == y)),
    }
}

fn integer_binary(op: BinaryOp, a: &Value, b: &Value) -> Result<Value> {
    if op == BinaryOp::Equal {
        return Ok(Value::from_boolean(a.as_integer() == b.as_integer()));
    }
    integer_arithmetic(op, a, b).map(Value::from_integer)
}

fn boolean_binary(op: BinaryOp, a: &Value, b: &Value) -> Result<Value> {
    let (x, y) = (a.as_boolean(), b.as_boolean());
    match op {
        BinaryOp::Equal => Ok(Value::from_boolean(x == y)),
        BinaryOp::BitAnd => Ok(Value::from_boolean(x & y)),
        BinaryOp::BitOr => Ok(Value::from_boolean(x | y)),
        _ => integer_arithmetic(op, a, b).map(|n| Value::from_boolean(n != 0)),
    }
}

fn pair_binary(op: BinaryOp, a: &Value, b: &Value) -> Result<Value> {
    let (x, y) = (a.as_pair(), b.as_pair());
    let result: OrderedPair = match op {
        BinaryOp::Equal | BinaryOp::NotEqual => return Ok(Value::from_boolean(x == y)),
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        BinaryOp::Div => x.checked_div(y)?,
        BinaryOp::Rem => x.checked_rem(y)?,
        BinaryOp::Pow => x.pow(y),
        BinaryOp::BitAnd => x & y,
        BinaryOp::BitOr => x | y,
    };
    Ok(Value::from_pair(result))
}

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl std::ops::$trait<&Value> for &Value {
            type Output = Result<Value>;

            fn $method(self, rhs: &Value) -> Result<Value> {
                self.binary($op, rhs)
            }
        }

        impl std::ops::$trait for Value {
            type Output = Result<Value>;

            fn $method(self, rhs: Value) -> Result<Value> {
                self.binary($op, &rhs)
            }
        }
    };
}

binary_operator!(Add, add, BinaryOp::Add);
binary_operator!(Sub, sub, BinaryOp::Sub);
binary_operator!(Mul, mul, BinaryOp::Mul);
binary_operator!(Div, div, BinaryOp::Div);
binary_operator!(Rem, rem, BinaryOp::Rem);
binary_operator!(BitAnd, bitand, BinaryOp::BitAnd);
binary_operator!(BitOr, bitor, BinaryOp::BitOr);

impl std::ops::Neg for &Value {
    type Output = Result<Value>;

    fn neg(self) -> Result<Value> {
        self.negate()
    }
}

impl std::ops::Neg for Value {
    type Output = Result<Value>;

    fn neg(self) -> Result<Value> {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladders_pick_first_matching_kind() {
        let s = Value::from_string("1");
        let f = Value::from_float(1.0);
        let i = Value::from_integer(1);
        let b = Value::from_boolean(true);
        let p = Value::from_pair(OrderedPair::new(1, 0));

        assert_eq!(governing_kind(&ARITHMETIC_LADDER, &i, &s), Some(ValueKind::String));
        assert_eq!(governing_kind(&ARITHMETIC_LADDER, &i, &f), Some(ValueKind::Float));
        assert_eq!(governing_kind(&ARITHMETIC_LADDER, &b, &i), Some(ValueKind::Integer));
        assert_eq!(governing_kind(&ARITHMETIC_LADDER, &p, &b), Some(ValueKind::Boolean));
        assert_eq!(governing_kind(&LOGICAL_LADDER, &f, &i), Some(ValueKind::Integer));
        assert_eq!(governing_kind(&LOGICAL_LADDER, &f, &b), Some(ValueKind::Boolean));
        assert_eq!(governing_kind(&LOGICAL_LADDER, &f, &p), Some(ValueKind::Float));
    }

    #[test]
    fn pointers_govern_nothing() {
        let a = Value::pointer("a");
        let b = Value::pointer("b");
        assert_eq!(governing_kind(&ARITHMETIC_LADDER, &a, &b), None);
        assert!(a.binary(BinaryOp::Add, &b).unwrap().is_null());
        assert!(a.not_equals(&b).unwrap().is_null());
    }

    #[test]
    fn operator_symbols_round_trip() {
        for op in BinaryOp::ALL {
            assert_eq!(op.symbol().parse::<BinaryOp>(), Ok(op));
        }
        for op in UnaryOp::ALL {
            assert_eq!(op.symbol().parse::<UnaryOp>(), Ok(op));
        }
        assert!("**".parse::<BinaryOp>().is_err());
        assert!("+++".parse::<UnaryOp>().is_err());
    }

    #[test]
    fn float_equality_uses_tolerance() {
        let a = Value::from_float(0.1 + 0.2);
        let b = Value::from_float(0.3);
        assert!(a.equals(&b).unwrap().as_boolean());
        assert!(!a.equals(&Value::from_float(0.31)).unwrap().as_boolean());
    }

    #[test]
    fn rejection_messages_describe_the_combination() {
        let err = Value::from_string("x")
            .binary(BinaryOp::Rem, &Value::from_integer(1))
            .unwrap_err();
        assert_eq!(
            err,
            ValueError::invalid("cannot perform remainder division with a string value")
        );

        let err = Value::from_float(1.0)
            .binary(BinaryOp::BitOr, &Value::from_float(2.0))
            .unwrap_err();
        assert_eq!(
            err,
            ValueError::invalid("cannot perform bitwise or logical OR with a floating-point value")
        );
    }

    #[test]
    fn float_fails_logic_even_when_outranked() {
        let f = Value::from_float(1.0);
        for other in [Value::from_integer(1), Value::from_boolean(true)] {
            assert_eq!(
                f.binary(BinaryOp::BitAnd, &other),
                Err(ValueError::invalid(
                    "cannot perform bitwise or logical AND with a floating-point value"
                ))
            );
            assert!(other.binary(BinaryOp::BitOr, &f).is_err());
        }
    }
}
