//! Foundation types shared by every part of the validator
//!
//! - **Values**: [`Value`] (what an accepted input turns into) and
//!   [`Scalar`] (literals and range bounds inside rules)
//! - **Errors**: [`ValidationError`] with its [`ErrorKind`], [`ConfigError`]
//!   for misconfigured rule sets, and the unified [`Error`]

pub mod error;
pub mod value;

pub use error::{ConfigError, Error, ErrorKind, ValidationError};
pub use value::{Scalar, Value};

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Result of evaluating a single rule.
pub type ValidationResult<T = Value> = Result<T, ValidationError>;

/// Result of an operation that can only fail through misconfiguration.
pub type ConfigResult<T> = Result<T, ConfigError>;
