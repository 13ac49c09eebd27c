//! Error types for validation failures and rule configuration faults
//!
//! Two categories are kept apart:
//!
//! - [`ValidationError`]: the input does not satisfy the rule. Carries one
//!   [`ErrorKind`], the rejected input and the rule node that rejected it.
//! - [`ConfigError`]: the rule set itself is wrong (unknown rule name,
//!   unknown combinator key, malformed definition). These are programming
//!   errors and never describe a property of the input.
//!
//! [`Error`] unifies both for APIs that can hit either.

use std::fmt;

use crate::rule::Rule;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Input is not a whole-string base-10 integer.
    NotInteger,
    /// Input is not a whole-string decimal float.
    NotFloat,
    /// Parsed input lies outside the range bounds.
    OutOfRange,
    /// Regular expression did not match.
    RegexpMismatch,
    /// Length differs from the exact length or length range.
    InvalidLength,
    /// Length is below the minimum.
    TooShort,
    /// Length is above the maximum.
    TooLong,
    /// Catch-all: literal, list, predicate or constructor rejection.
    InvalidValue,
}

impl ErrorKind {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::NotInteger => "not_integer",
            Self::NotFloat => "not_float",
            Self::OutOfRange => "out_of_range",
            Self::RegexpMismatch => "regexp_mismatch",
            Self::InvalidLength => "invalid_length",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::InvalidValue => "invalid_value",
        }
    }

    /// Short English description.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::NotInteger => "not integer",
            Self::NotFloat => "not float",
            Self::OutOfRange => "out of range",
            Self::RegexpMismatch => "regexp mismatch",
            Self::InvalidLength => "invalid length",
            Self::TooShort => "too short",
            Self::TooLong => "too long",
            Self::InvalidValue => "invalid value",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// The input was rejected by a rule.
///
/// # Examples
///
/// ```
/// use string_validator::prelude::*;
///
/// let err = evaluate(&Rule::Integer, "1.2").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NotInteger);
/// assert_eq!(err.input(), "1.2");
/// assert_eq!(err.to_string(), "not integer");
/// ```
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}")]
pub struct ValidationError {
    kind: ErrorKind,
    input: String,
    rule: Rule,
}

impl ValidationError {
    /// Creates an error of `kind` for `input` rejected by `rule`.
    pub fn new(kind: ErrorKind, input: impl Into<String>, rule: Rule) -> Self {
        Self {
            kind,
            input: input.into(),
            rule,
        }
    }

    /// The failure classification.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Shorthand for `self.kind().code()`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The rule node that rejected the input.
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }
}

// ============================================================================
// CONFIG ERROR
// ============================================================================

/// A fault in how rules were built or looked up.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No rule is registered under this name.
    #[error("No such rule: {name}")]
    UnknownRule {
        /// The name that was looked up.
        name: String,
    },

    /// A combinator was given a key it does not understand.
    #[error("Invalid key: {key}")]
    InvalidRuleKey {
        /// The offending key.
        key: String,
    },

    /// Range bounds of incompatible kinds.
    #[error("Invalid range: {reason}")]
    InvalidRange {
        /// What is wrong with the bounds.
        reason: String,
    },

    /// Pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A declarative rule definition has the wrong shape.
    #[error("Invalid rule definition: {message}")]
    InvalidDefinition {
        /// Description of the problem.
        message: String,
    },

    /// Configuration document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates an [`UnknownRule`](Self::UnknownRule) error.
    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    /// Creates an [`InvalidRuleKey`](Self::InvalidRuleKey) error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidRuleKey { key: key.into() }
    }

    /// Creates an [`InvalidRange`](Self::InvalidRange) error.
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            reason: reason.into(),
        }
    }

    /// Creates an [`InvalidDefinition`](Self::InvalidDefinition) error.
    pub fn invalid_definition(message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            message: message.into(),
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownRule { .. } => "unknown_rule",
            Self::InvalidRuleKey { .. } => "invalid_rule_key",
            Self::InvalidRange { .. } => "invalid_range",
            Self::InvalidPattern(_) => "invalid_pattern",
            Self::InvalidDefinition { .. } => "invalid_definition",
            Self::Json(_) => "json",
        }
    }
}

// ============================================================================
// UNIFIED ERROR
// ============================================================================

/// Either a validation failure or a configuration fault.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The rule set is misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns `true` for validation failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` for configuration faults.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// The validation failure, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Config(_) => None,
        }
    }

    /// The failure kind, if this is a validation failure.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        self.as_validation().map(ValidationError::kind)
    }
}
