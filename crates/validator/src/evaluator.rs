//! Recursive rule evaluation
//!
//! [`Evaluator`] walks a [`Rule`] and either returns the [`Value`] the input
//! turns into or a [`ValidationError`] naming the rule node that rejected it.
//! It holds nothing but immutable options, so one evaluator can serve any
//! number of threads.
//!
//! # Error propagation
//!
//! - `OneOf` and a combinator's `any` discard the errors of their
//!   alternatives and report `InvalidValue` when all of them fail.
//! - A combinator's `all` and `rule` propagate the nested error unchanged.
//! - Predicate and constructor faults are reported as `InvalidValue`.

use std::sync::Arc;

use crate::foundation::{ErrorKind, ValidationError, ValidationResult, Value};
use crate::rule::{Combinator, Rule};
use crate::validators::length::{self, LengthMode, TextUnits};
use crate::validators::numeric::{parse_float, parse_integer};
use crate::validators::pattern;

// ============================================================================
// EVALUATOR
// ============================================================================

/// Evaluates rules against input strings.
///
/// The `length` family of combinator keys counts bytes. The `charlength`
/// family counts with the evaluator's character counter, Unicode scalar
/// values unless replaced with [`Evaluator::with_char_units`].
///
/// # Examples
///
/// ```
/// use string_validator::prelude::*;
///
/// let evaluator = Evaluator::new();
/// assert_eq!(evaluator.evaluate(&Rule::int_range(3, 45), "10").unwrap(), Value::Integer(10));
/// assert!(!evaluator.is_valid(&Rule::int_range(3, 45), "46"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    char_units: Option<Arc<dyn TextUnits>>,
}

impl Evaluator {
    /// Evaluator counting characters as Unicode scalar values.
    #[must_use]
    pub const fn new() -> Self {
        Self { char_units: None }
    }

    /// Replaces the counter used by the `charlength` family.
    #[must_use]
    pub fn with_char_units(mut self, units: impl TextUnits + 'static) -> Self {
        self.char_units = Some(Arc::new(units));
        self
    }

    /// Number of character units in `input`.
    #[must_use]
    pub fn count_chars(&self, input: &str) -> usize {
        match &self.char_units {
            Some(units) => units.count(input),
            None => LengthMode::Chars.count(input),
        }
    }

    /// Evaluates `rule` against `input`.
    pub fn evaluate(&self, rule: &Rule, input: &str) -> ValidationResult {
        self.eval(rule, input).map_err(|rejection| {
            tracing::trace!(
                code = rejection.kind.code(),
                rule = rejection.rule.kind_name(),
                "input rejected"
            );
            ValidationError::new(rejection.kind, input, rejection.rule.clone())
        })
    }

    /// Returns `true` iff [`evaluate`](Self::evaluate) succeeds.
    ///
    /// Rejections are never materialized into a [`ValidationError`].
    #[must_use]
    pub fn is_valid(&self, rule: &Rule, input: &str) -> bool {
        self.eval(rule, input).is_ok()
    }

    fn eval<'r>(&self, rule: &'r Rule, input: &str) -> Evaluated<'r> {
        let reject = |kind| Rejection { kind, rule };

        match rule {
            Rule::Integer => parse_integer(input).map(Value::Integer).map_err(reject),
            Rule::Float => parse_float(input).map(Value::Float).map_err(reject),
            Rule::Range(range) => range.check(input).map_err(reject),
            Rule::Pattern(regex) => pattern::check(regex, input).map_err(reject),
            Rule::Predicate(predicate) => match predicate.call(input) {
                Ok(Some(value)) => Ok(value),
                Ok(None) => Err(reject(ErrorKind::InvalidValue)),
                Err(fault) => {
                    tracing::debug!(error = %fault, "predicate failed");
                    Err(reject(ErrorKind::InvalidValue))
                }
            },
            Rule::OneOf(rules) => self
                .first_match(rules, input)
                .ok_or_else(|| reject(ErrorKind::InvalidValue)),
            Rule::Combinator(combinator) => self.eval_combinator(combinator, rule, input),
            Rule::Constructor(constructor) => constructor.build(input).map_err(|fault| {
                tracing::debug!(
                    error = %fault,
                    type_name = constructor.type_name(),
                    "constructor failed"
                );
                reject(ErrorKind::InvalidValue)
            }),
            Rule::Literal(scalar) => {
                if scalar.canonical_text() == input {
                    Ok(scalar.clone().into())
                } else {
                    Err(reject(ErrorKind::InvalidValue))
                }
            }
        }
    }

    fn first_match(&self, rules: &[Rule], input: &str) -> Option<Value> {
        rules.iter().find_map(|rule| self.eval(rule, input).ok())
    }

    fn eval_combinator<'r>(
        &self,
        c: &'r Combinator,
        rule: &'r Rule,
        input: &str,
    ) -> Evaluated<'r> {
        let reject = |kind| Rejection { kind, rule };

        let bytes = input.len();
        if let Some(bound) = &c.length {
            length::check_exact(bound, bytes).map_err(reject)?;
        }
        if let Some(min) = c.min_length {
            length::check_min(min, bytes).map_err(reject)?;
        }
        if let Some(max) = c.max_length {
            length::check_max(max, bytes).map_err(reject)?;
        }

        if c.char_length.is_some() || c.min_char_length.is_some() || c.max_char_length.is_some() {
            let chars = self.count_chars(input);
            if let Some(bound) = &c.char_length {
                length::check_exact(bound, chars).map_err(reject)?;
            }
            if let Some(min) = c.min_char_length {
                length::check_min(min, chars).map_err(reject)?;
            }
            if let Some(max) = c.max_char_length {
                length::check_max(max, chars).map_err(reject)?;
            }
        }

        let all = match &c.all {
            Some(rules) => Some(
                rules
                    .iter()
                    .map(|r| self.eval(r, input))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        let any = match &c.any {
            Some(rules) => Some(
                self.first_match(rules, input)
                    .ok_or_else(|| reject(ErrorKind::InvalidValue))?,
            ),
            None => None,
        };
        let nested = c.rule.as_ref().map(|r| self.eval(r, input)).transpose()?;

        Ok(nested
            .or(any)
            .or_else(|| all.map(Value::List))
            .unwrap_or_else(|| Value::String(input.to_owned())))
    }
}

/// A rejection that still borrows the rejecting node.
#[derive(Debug, Clone, Copy)]
struct Rejection<'r> {
    kind: ErrorKind,
    rule: &'r Rule,
}

type Evaluated<'r> = Result<Value, Rejection<'r>>;

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

/// Evaluates `rule` against `input` with the default [`Evaluator`].
///
/// # Examples
///
/// ```
/// use string_validator::prelude::*;
///
/// assert_eq!(evaluate(&Rule::Integer, "-213").unwrap(), Value::Integer(-213));
/// assert_eq!(evaluate(&Rule::Float, "a").unwrap_err().kind(), ErrorKind::NotFloat);
/// ```
pub fn evaluate(rule: &Rule, input: &str) -> ValidationResult {
    Evaluator::new().evaluate(rule, input)
}

/// Returns `true` iff `rule` accepts `input` under the default [`Evaluator`].
#[must_use]
pub fn is_valid(rule: &Rule, input: &str) -> bool {
    Evaluator::new().is_valid(rule, input)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Scalar;
    use pretty_assertions::assert_eq;

    fn kind_of(rule: &Rule, input: &str) -> ErrorKind {
        evaluate(rule, input).unwrap_err().kind()
    }

    #[test]
    fn integer_sentinel() {
        assert_eq!(evaluate(&Rule::Integer, "123").unwrap(), Value::Integer(123));
        assert_eq!(evaluate(&Rule::Integer, "0").unwrap(), Value::Integer(0));
        assert_eq!(kind_of(&Rule::Integer, "1.2"), ErrorKind::NotInteger);
        assert_eq!(kind_of(&Rule::Integer, "a"), ErrorKind::NotInteger);
    }

    #[test]
    fn float_sentinel() {
        assert_eq!(evaluate(&Rule::Float, "1.23").unwrap(), Value::Float(1.23));
        assert_eq!(evaluate(&Rule::Float, "123").unwrap(), Value::Float(123.0));
        assert_eq!(kind_of(&Rule::Float, "a"), ErrorKind::NotFloat);
    }

    #[test]
    fn integer_literal() {
        let r = Rule::literal(987);
        assert_eq!(evaluate(&r, "987").unwrap(), Value::Integer(987));
        assert_eq!(kind_of(&r, "986"), ErrorKind::InvalidValue);
    }

    #[test]
    fn string_literal() {
        let r = Rule::literal("hogehoge");
        assert_eq!(evaluate(&r, "hogehoge").unwrap(), Value::from("hogehoge"));
        assert_eq!(kind_of(&r, "123"), ErrorKind::InvalidValue);
    }

    #[test]
    fn error_carries_input_and_rule() {
        let r = Rule::int_range(3, 45);
        let err = evaluate(&r, "46").unwrap_err();
        assert_eq!(err.input(), "46");
        assert_eq!(err.rule().to_string(), "3..=45");
    }

    #[test]
    fn one_of_returns_first_success() {
        let r = Rule::one_of([
            Rule::literal(123),
            Rule::literal("abc"),
            Rule::pattern_ci("xyz").unwrap(),
        ]);
        assert_eq!(evaluate(&r, "123").unwrap(), Value::Integer(123));
        assert_eq!(evaluate(&r, "abc").unwrap(), Value::from("abc"));
        assert_eq!(evaluate(&r, "xxxXyZzzz").unwrap(), Value::from("xxxXyZzzz"));
        assert_eq!(kind_of(&r, "789"), ErrorKind::InvalidValue);
    }

    #[test]
    fn one_of_reports_itself_not_the_alternatives() {
        let r = Rule::one_of([Rule::Integer, Rule::Float]);
        let err = evaluate(&r, "x").unwrap_err();
        assert!(matches!(err.rule(), Rule::OneOf(rules) if rules.len() == 2));
    }

    #[test]
    fn empty_one_of_rejects_everything() {
        assert_eq!(kind_of(&Rule::one_of([]), ""), ErrorKind::InvalidValue);
    }

    #[test]
    fn any_key() {
        let r = Rule::from(Combinator::new().any([1, 2, 4, 8].map(Rule::literal)));
        for input in ["1", "2", "4", "8"] {
            assert!(is_valid(&r, input), "{input}");
        }
        assert_eq!(kind_of(&r, "5"), ErrorKind::InvalidValue);
        assert_eq!(kind_of(&r, "0"), ErrorKind::InvalidValue);
    }

    #[test]
    fn all_key_propagates_first_failure() {
        let r = Rule::from(Combinator::new().all([Rule::Integer, Rule::int_range(5, 10)]));
        assert_eq!(
            evaluate(&r, "7").unwrap(),
            Value::List(vec![Value::Integer(7), Value::Integer(7)])
        );
        assert_eq!(kind_of(&r, "8.5"), ErrorKind::NotInteger);
        assert_eq!(kind_of(&r, "11"), ErrorKind::OutOfRange);
    }

    #[test]
    fn rule_key_propagates_nested_error() {
        let r = Rule::from(Combinator::new().rule(Rule::pattern("abc").unwrap()));
        assert_eq!(evaluate(&r, "012abc345").unwrap(), Value::from("012abc345"));
        let err = evaluate(&r, "12345").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RegexpMismatch);
        assert!(matches!(err.rule(), Rule::Pattern(_)));
    }

    #[test]
    fn length_keys_count_bytes() {
        let exact = Rule::from(Combinator::new().length(3));
        assert!(is_valid(&exact, "123"));
        assert_eq!(kind_of(&exact, "1234"), ErrorKind::InvalidLength);
        assert_eq!(kind_of(&exact, "１２３"), ErrorKind::InvalidLength);

        let min = Rule::from(Combinator::new().min_length(3));
        assert_eq!(kind_of(&min, "12"), ErrorKind::TooShort);

        let max = Rule::from(Combinator::new().max_length(10));
        assert!(is_valid(&max, "1234567890"));
        assert_eq!(kind_of(&max, "12345678901"), ErrorKind::TooLong);
    }

    #[test]
    fn char_length_keys_count_characters() {
        let exact = Rule::from(Combinator::new().char_length(3..=10));
        assert!(is_valid(&exact, "１２３"));
        assert_eq!(kind_of(&exact, "１２"), ErrorKind::InvalidLength);

        let min = Rule::from(Combinator::new().min_char_length(3));
        assert_eq!(kind_of(&min, "１２"), ErrorKind::TooShort);

        let max = Rule::from(Combinator::new().max_char_length(10));
        assert!(is_valid(&max, "１２３４５６７８９０"));
        assert_eq!(kind_of(&max, "１２３４５６７８９０１"), ErrorKind::TooLong);
    }

    #[test]
    fn char_units_can_be_replaced() {
        let r = Rule::from(Combinator::new().max_char_length(3));
        let bytes = Evaluator::new().with_char_units(LengthMode::Bytes);
        assert!(is_valid(&r, "１２３"));
        assert!(!bytes.is_valid(&r, "１２３"));
    }

    #[test]
    fn lengths_checked_before_nested_rule() {
        let r = Rule::from(
            Combinator::new()
                .min_length(3)
                .rule(Rule::pattern(r"^\d+$").unwrap()),
        );
        assert_eq!(kind_of(&r, "12"), ErrorKind::TooShort);
        assert_eq!(kind_of(&r, "ab"), ErrorKind::TooShort);
        assert_eq!(kind_of(&r, "abc"), ErrorKind::RegexpMismatch);
        assert_eq!(evaluate(&r, "123").unwrap(), Value::from("123"));
    }

    #[test]
    fn result_precedence_rule_any_all_input() {
        let full = Combinator::new()
            .rule(Rule::predicate(|_: &str| Some(123_i64)))
            .any([Rule::literal("12345"), Rule::literal("abcde")])
            .all([Rule::Integer, Rule::constructor::<String>()]);
        assert_eq!(evaluate(&full.clone().into(), "12345").unwrap(), Value::Integer(123));

        let without_rule = Combinator {
            rule: None,
            ..full.clone()
        };
        assert_eq!(
            evaluate(&without_rule.clone().into(), "12345").unwrap(),
            Value::from("12345")
        );

        let only_all = Combinator {
            any: None,
            ..without_rule
        };
        let value = evaluate(&only_all.into(), "12345").unwrap();
        let items = value.as_list().unwrap();
        assert_eq!(items[0], Value::Integer(12345));
        assert_eq!(items[1].downcast_ref::<String>().map(String::as_str), Some("12345"));

        let plain = Rule::from(Combinator::new().max_length(5));
        assert_eq!(evaluate(&plain, "12345").unwrap(), Value::from("12345"));
    }

    #[test]
    fn empty_combinator_accepts_input() {
        assert_eq!(
            evaluate(&Combinator::new().into(), "anything").unwrap(),
            Value::from("anything")
        );
    }

    #[test]
    fn predicate_values_and_faults() {
        let p = Rule::predicate(|s: &str| (s == "xyz").then_some(123_i64));
        assert_eq!(evaluate(&p, "xyz").unwrap(), Value::Integer(123));
        assert_eq!(kind_of(&p, "abc"), ErrorKind::InvalidValue);

        let faulty = Rule::try_predicate(|_: &str| Err::<Option<i64>, _>("hoge"));
        assert_eq!(kind_of(&faulty, "abc"), ErrorKind::InvalidValue);

        let boolean = Rule::predicate(|s: &str| Some(s.is_empty()));
        assert_eq!(evaluate(&boolean, "x").unwrap(), Value::Bool(false));
    }

    #[test]
    fn predicate_called_once_per_evaluation() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let r = Rule::predicate(move |_: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(true)
        });
        evaluate(&r, "x").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn constructor_builds_objects() {
        let r = Rule::constructor::<std::net::Ipv4Addr>();
        let value = evaluate(&r, "192.168.0.1").unwrap();
        assert_eq!(
            value.downcast_ref::<std::net::Ipv4Addr>(),
            Some(&std::net::Ipv4Addr::new(192, 168, 0, 1))
        );
        assert_eq!(kind_of(&r, "192.168.0.256"), ErrorKind::InvalidValue);
    }

    #[test]
    fn float_and_bool_literals_use_canonical_text() {
        let f = Rule::Literal(Scalar::Float(3.0));
        assert!(is_valid(&f, "3.0"));
        assert!(!is_valid(&f, "3"));
        assert_eq!(evaluate(&Rule::literal(true), "true").unwrap(), Value::Bool(true));
    }
}
