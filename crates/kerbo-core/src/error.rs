//! Error types for value construction and operator application.

use thiserror::Error;

/// Errors raised when an operator cannot be applied to its operands.
///
/// Every error is raised at the point of violation and returned unchanged to
/// the caller; the evaluator is responsible for attaching source locations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An operand was the null sentinel.
    #[error("operator `{operator}` applied to a null value")]
    NullValue { operator: &'static str },

    /// The operator has no meaning for the governing variant
    /// (e.g. subtracting strings, bitwise AND on floats).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Division or remainder with a zero divisor. For ordered pairs, either
    /// component being zero counts.
    #[error("operator `{operator}` divided by zero")]
    DivideByZero { operator: &'static str },
}

impl ValueError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ValueError::InvalidOperation(message.into())
    }
}

/// Returned by [`OrderedPair`](crate::OrderedPair)'s `FromStr` when the input is
/// not in the `(X, Y)` form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid ordered pair literal: {input:?}")]
pub struct ParsePairError {
    pub input: String,
}

/// Convenience alias used throughout kerbo-core.
pub type Result<T> = std::result::Result<T, ValueError>;
