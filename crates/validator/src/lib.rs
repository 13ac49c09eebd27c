//! # string-validator
//!
//! Declarative validation and conversion of text input.
//!
//! A [`Rule`] is a closed tree of checks: type sentinels, inclusive ranges,
//! regular expressions, caller-supplied predicates and constructors, literal
//! values, alternations and keyed combinators. Evaluating a rule against a
//! string either produces a converted [`Value`] or a classified
//! [`ValidationError`].
//!
//! ## Quick Start
//!
//! ```rust
//! use string_validator::prelude::*;
//!
//! let port = Rule::int_range(1, 65535);
//! assert_eq!(evaluate(&port, "8080").unwrap(), Value::Integer(8080));
//! assert_eq!(evaluate(&port, "0").unwrap_err().kind(), ErrorKind::OutOfRange);
//!
//! let code = Rule::from(
//!     Combinator::new()
//!         .length(3..=8)
//!         .rule(Rule::pattern("^[A-Z0-9]+$").unwrap()),
//! );
//! assert!(is_valid(&code, "AB12"));
//! assert!(!is_valid(&code, "ab"));
//! ```
//!
//! ## Named Rules
//!
//! [`NamedRuleValidator`](named::NamedRuleValidator) keeps a table of rules
//! by identifier, validates by name and classifies input by the first rule
//! that accepts it. Tables can be declared in JSON, see [`config`].
//!
//! ## Modules
//!
//! - [`foundation`]: values and error types
//! - [`validators`]: leaf checks (numbers, ranges, patterns, lengths)
//! - [`rule`]: the rule tree
//! - [`evaluator`]: rule evaluation
//! - [`named`]: named rule tables
//! - [`config`]: JSON rule definitions

// ValidationError owns the rejecting rule node. It is only built at the
// `evaluate` boundary; `is_valid` and alternation never construct one.
#![allow(clippy::result_large_err)]

pub mod config;
pub mod evaluator;
pub mod foundation;
pub mod named;
pub mod prelude;
pub mod rule;
pub mod validators;

pub use evaluator::{Evaluator, evaluate, is_valid};
pub use foundation::{ConfigError, Error, ErrorKind, Scalar, ValidationError, Value};
pub use rule::{Combinator, Rule};
