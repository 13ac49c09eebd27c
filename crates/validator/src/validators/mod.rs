//! Leaf checks used by the evaluator
//!
//! Each module handles one concern and reports failures as a bare
//! [`ErrorKind`](crate::foundation::ErrorKind); the evaluator attaches the
//! input and the rejecting rule node.
//!
//! - [`numeric`]: strict integer and float parsing
//! - [`range`]: inclusive integer, float and text ranges
//! - [`pattern`]: regular-expression search
//! - [`length`]: byte and character length constraints

pub mod length;
pub mod numeric;
pub mod pattern;
pub mod range;

pub use length::{LengthBound, LengthMode, TextUnits};
pub use numeric::{parse_float, parse_integer};
pub use range::RangeRule;
