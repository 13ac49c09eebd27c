//! String length constraints
//!
//! Length is measured through the [`TextUnits`] capability. [`LengthMode`]
//! covers bytes and Unicode scalar values; callers that need grapheme
//! clusters or another unit implement [`TextUnits`] themselves.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::foundation::ErrorKind;

// ============================================================================
// TEXT UNITS
// ============================================================================

/// Counts the text units of a string.
pub trait TextUnits: fmt::Debug + Send + Sync {
    /// Number of units in `input`.
    fn count(&self, input: &str) -> usize;
}

/// How to count string length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthMode {
    /// Count bytes of the UTF-8 encoding.
    Bytes,
    /// Count Unicode scalar values.
    #[default]
    Chars,
}

impl TextUnits for LengthMode {
    #[inline]
    fn count(&self, input: &str) -> usize {
        match self {
            LengthMode::Bytes => input.len(),
            LengthMode::Chars => input.chars().count(),
        }
    }
}

// ============================================================================
// LENGTH BOUND
// ============================================================================

/// Accepted lengths for `length` / `charlength` constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthBound {
    /// Length must equal this value.
    Exact(usize),
    /// Length must lie in this inclusive range.
    Range(RangeInclusive<usize>),
}

impl LengthBound {
    /// Returns `true` if `len` satisfies the bound.
    #[must_use]
    pub fn contains(&self, len: usize) -> bool {
        match self {
            Self::Exact(n) => len == *n,
            Self::Range(r) => r.contains(&len),
        }
    }
}

impl From<usize> for LengthBound {
    fn from(n: usize) -> Self {
        Self::Exact(n)
    }
}

impl From<RangeInclusive<usize>> for LengthBound {
    fn from(r: RangeInclusive<usize>) -> Self {
        Self::Range(r)
    }
}

// ============================================================================
// CHECKS
// ============================================================================

/// `len` must satisfy `bound`, else [`ErrorKind::InvalidLength`].
pub fn check_exact(bound: &LengthBound, len: usize) -> Result<(), ErrorKind> {
    if bound.contains(len) {
        Ok(())
    } else {
        Err(ErrorKind::InvalidLength)
    }
}

/// `len` must be at least `min`, else [`ErrorKind::TooShort`].
pub fn check_min(min: usize, len: usize) -> Result<(), ErrorKind> {
    if len >= min {
        Ok(())
    } else {
        Err(ErrorKind::TooShort)
    }
}

/// `len` must be at most `max`, else [`ErrorKind::TooLong`].
pub fn check_max(max: usize, len: usize) -> Result<(), ErrorKind> {
    if len <= max {
        Ok(())
    } else {
        Err(ErrorKind::TooLong)
    }
}
