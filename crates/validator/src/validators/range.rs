//! Inclusive range rules
//!
//! The kind of a range is fixed by its bounds when it is built: two integers
//! give an integer range, two numbers with at least one float give a float
//! range, two strings give a lexicographic text range.

use std::fmt;

use crate::foundation::{ConfigError, ErrorKind, Scalar, Value};
use crate::validators::numeric::{parse_float, parse_integer};

/// An inclusive range whose bound kind decides how input is parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeRule {
    /// Input must be an integer within `lo..=hi`.
    Integer {
        /// Lower bound.
        lo: i64,
        /// Upper bound.
        hi: i64,
    },
    /// Input must be a float within `lo..=hi`.
    Float {
        /// Lower bound.
        lo: f64,
        /// Upper bound.
        hi: f64,
    },
    /// Input must sort between `lo` and `hi` (byte-wise).
    Text {
        /// Lower bound.
        lo: String,
        /// Upper bound.
        hi: String,
    },
}

impl RangeRule {
    /// Builds a range from two scalar bounds.
    ///
    /// Booleans and mixed text/number bounds are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_validator::validators::RangeRule;
    ///
    /// assert!(matches!(RangeRule::new(3, 45), Ok(RangeRule::Integer { lo: 3, hi: 45 })));
    /// assert!(matches!(RangeRule::new(3.0, 45), Ok(RangeRule::Float { .. })));
    /// assert!(RangeRule::new("abc", 4).is_err());
    /// ```
    pub fn new(lo: impl Into<Scalar>, hi: impl Into<Scalar>) -> Result<Self, ConfigError> {
        match (lo.into(), hi.into()) {
            (Scalar::Integer(lo), Scalar::Integer(hi)) => Ok(Self::Integer { lo, hi }),
            (Scalar::String(lo), Scalar::String(hi)) => Ok(Self::Text { lo, hi }),
            (lo, hi) => match (lo.as_f64(), hi.as_f64()) {
                (Some(lo), Some(hi)) => Ok(Self::Float { lo, hi }),
                _ => Err(ConfigError::invalid_range(format!(
                    "bounds {lo} and {hi} are not both numbers or both strings"
                ))),
            },
        }
    }

    /// Checks `input` against the range and returns the parsed value.
    pub fn check(&self, input: &str) -> Result<Value, ErrorKind> {
        match self {
            Self::Integer { lo, hi } => {
                let n = parse_integer(input)?;
                if (*lo..=*hi).contains(&n) {
                    Ok(Value::Integer(n))
                } else {
                    Err(ErrorKind::OutOfRange)
                }
            }
            Self::Float { lo, hi } => {
                let f = parse_float(input)?;
                if (*lo..=*hi).contains(&f) {
                    Ok(Value::Float(f))
                } else {
                    Err(ErrorKind::OutOfRange)
                }
            }
            Self::Text { lo, hi } => {
                if lo.as_str() <= input && input <= hi.as_str() {
                    Ok(Value::String(input.to_owned()))
                } else {
                    Err(ErrorKind::OutOfRange)
                }
            }
        }
    }
}

impl fmt::Display for RangeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer { lo, hi } => write!(f, "{lo}..={hi}"),
            Self::Float { lo, hi } => write!(f, "{lo:?}..={hi:?}"),
            Self::Text { lo, hi } => write!(f, "{lo:?}..={hi:?}"),
        }
    }
}
