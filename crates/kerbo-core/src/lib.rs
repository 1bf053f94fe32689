//! # kerbo-core
//!
//! Runtime values for **KerboScript**, the small scripting language used to
//! automate in-game vehicles.
//!
//! Every script value is a [`Value`]: a tag (string, integer, float, boolean,
//! ordered pair, or pointer) plus a projection for each representable type,
//! all kept in sync. Operators coerce freely between kinds using fixed
//! precedence ladders, so `"3" + 4` concatenates while `3.0 + 4` adds floats.
//!
//! ## Quick start
//!
//! ```rust
//! use kerbo_core::{OrderedPair, Value, ValueError};
//!
//! let sum = (Value::from("3") + Value::from(4)).unwrap();
//! assert_eq!(sum.as_string(), "34");
//!
//! let pair = (Value::from(OrderedPair::new(1, 2)) + Value::from(OrderedPair::new(3, 4))).unwrap();
//! assert_eq!(pair.as_pair(), OrderedPair::new(4, 6));
//!
//! let err = (Value::from(5) / Value::from(0)).unwrap_err();
//! assert_eq!(err, ValueError::DivideByZero { operator: "/" });
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `Value`, its constructors, projections and serialized form
//! - [`ops`] — binary/unary operator dispatch and the coercion ladders
//! - [`pair`] — `OrderedPair` and its componentwise algebra
//! - [`kind`] — the `ValueKind` tag
//! - [`coerce`] — parse/format helpers behind projection synthesis
//! - [`error`] — error types for rejected operations

pub mod coerce;
pub mod error;
pub mod kind;
pub mod ops;
pub mod pair;
pub mod value;

pub use error::{ParsePairError, Result, ValueError};
pub use kind::ValueKind;
pub use ops::{BinaryOp, UnaryOp, FLOAT_EQUALITY_TOLERANCE};
pub use pair::OrderedPair;
pub use value::{Literal, Projections, Value};
