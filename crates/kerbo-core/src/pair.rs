//! Ordered pairs: immutable `(X, Y)` integer tuples with componentwise algebra.
//!
//! The canonical textual form is `(X, Y)`. Parsing accepts optional whitespace
//! around every token, so anything the `Display` impl produces parses back to
//! the same pair.

use crate::error::{ParsePairError, Result, ValueError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, Mul, Neg, Not, Sub};
use std::str::FromStr;

/// An immutable pair of integers. The default is `(0, 0)`.
///
/// Arithmetic wraps on overflow, matching scalar integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OrderedPair {
    x: i64,
    y: i64,
}

impl OrderedPair {
    pub const ZERO: OrderedPair = OrderedPair { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        OrderedPair { x, y }
    }

    pub const fn x(&self) -> i64 {
        self.x
    }

    pub const fn y(&self) -> i64 {
        self.y
    }

    /// Parse the canonical form, returning `None` on malformed input.
    ///
    /// Used by value coercion, where a failed parse degrades to the zero pair.
    pub fn parse(text: &str) -> Option<Self> {
        let inner = text.trim().strip_prefix('(')?.strip_suffix(')')?;
        let (x, y) = inner.split_once(',')?;
        let x = x.trim().parse().ok()?;
        let y = y.trim().parse().ok()?;
        Some(OrderedPair { x, y })
    }

    fn map(self, f: impl Fn(i64) -> i64) -> Self {
        OrderedPair::new(f(self.x), f(self.y))
    }

    fn zip(self, other: Self, f: impl Fn(i64, i64) -> i64) -> Self {
        OrderedPair::new(f(self.x, other.x), f(self.y, other.y))
    }

    /// Componentwise division. Fails if either component of `divisor` is zero.
    pub fn checked_div(self, divisor: Self) -> Result<Self> {
        if divisor.has_zero_component() {
            return Err(ValueError::DivideByZero { operator: "/" });
        }
        Ok(self.zip(divisor, i64::wrapping_div))
    }

    /// Componentwise remainder. Fails if either component of `divisor` is zero.
    pub fn checked_rem(self, divisor: Self) -> Result<Self> {
        if divisor.has_zero_component() {
            return Err(ValueError::DivideByZero { operator: "%" });
        }
        Ok(self.zip(divisor, i64::wrapping_rem))
    }

    /// Componentwise exponentiation, computed in floating point and truncated.
    pub fn pow(self, power: Self) -> Self {
        self.zip(power, |base, exp| (base as f64).powf(exp as f64) as i64)
    }

    pub fn increment(self) -> Self {
        self.map(|c| c.wrapping_add(1))
    }

    pub fn decrement(self) -> Self {
        self.map(|c| c.wrapping_sub(1))
    }

    fn has_zero_component(&self) -> bool {
        self.x == 0 || self.y == 0
    }
}

macro_rules! componentwise_op {
    ($trait:ident, $method:ident, $f:expr) => {
        impl $trait for OrderedPair {
            type Output = OrderedPair;

            fn $method(self, rhs: OrderedPair) -> OrderedPair {
                self.zip(rhs, $f)
            }
        }
    };
}

componentwise_op!(Add, add, i64::wrapping_add);
componentwise_op!(Sub, sub, i64::wrapping_sub);
componentwise_op!(Mul, mul, i64::wrapping_mul);
componentwise_op!(BitAnd, bitand, |a, b| a & b);
componentwise_op!(BitOr, bitor, |a, b| a | b);

impl Neg for OrderedPair {
    type Output = OrderedPair;

    fn neg(self) -> OrderedPair {
        self.map(i64::wrapping_neg)
    }
}

/// Bitwise complement of both components.
impl Not for OrderedPair {
    type Output = OrderedPair;

    fn not(self) -> OrderedPair {
        self.map(|c| !c)
    }
}

impl From<(i64, i64)> for OrderedPair {
    fn from((x, y): (i64, i64)) -> Self {
        OrderedPair::new(x, y)
    }
}

impl From<OrderedPair> for (i64, i64) {
    fn from(pair: OrderedPair) -> Self {
        (pair.x, pair.y)
    }
}

impl fmt::Display for OrderedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for OrderedPair {
    type Err = ParsePairError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OrderedPair::parse(s).ok_or_else(|| ParsePairError {
            input: s.to_string(),
        })
    }
}
