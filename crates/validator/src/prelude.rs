//! Prelude module for convenient imports.
//!
//! Provides a single `use string_validator::prelude::*;` import that brings
//! in the rule tree, the evaluator, named rule tables and the error types.
//!
//! # Examples
//!
//! ```rust
//! use string_validator::prelude::*;
//!
//! let rule = Rule::one_of([Rule::Integer, Rule::literal("n/a")]);
//! assert!(is_valid(&rule, "42"));
//! assert!(is_valid(&rule, "n/a"));
//! ```

// ============================================================================
// FOUNDATION: Values and errors
// ============================================================================

pub use crate::foundation::{
    ConfigError, ConfigResult, Error, ErrorKind, Scalar, ValidationError, ValidationResult, Value,
};

// ============================================================================
// RULES: The rule tree and its evaluation
// ============================================================================

pub use crate::evaluator::{Evaluator, evaluate, is_valid};
pub use crate::rule::{BoxError, Combinator, CombinatorKey, Constructor, Predicate, Rule};

// ============================================================================
// VALIDATORS: Leaf check configuration
// ============================================================================

pub use crate::validators::{LengthBound, LengthMode, RangeRule, TextUnits};

// ============================================================================
// NAMED RULES AND CONFIG
// ============================================================================

pub use crate::config::ValidatorConfig;
pub use crate::named::{NamedRuleSet, NamedRuleValidator};
