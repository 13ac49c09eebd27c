//! The rule language
//!
//! A [`Rule`] is a closed, recursive sum type describing what an input string
//! must satisfy and what value it turns into. Rules are plain data: build them
//! once, share them freely (`Rule: Clone + Send + Sync`), and hand them to the
//! [`Evaluator`](crate::evaluator::Evaluator).
//!
//! # Examples
//!
//! ```
//! use string_validator::prelude::*;
//!
//! // Exactly five digits
//! let zip = Rule::from(
//!     Combinator::new()
//!         .length(5)
//!         .rule(Rule::pattern(r"^\d+$").unwrap()),
//! );
//! assert!(is_valid(&zip, "12345"));
//! assert!(!is_valid(&zip, "1234"));
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;

use crate::foundation::{ConfigError, Scalar, Value};
use crate::validators::pattern;
use crate::validators::{LengthBound, RangeRule};

/// Error type collaborators (predicates, constructors) may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ============================================================================
// RULE
// ============================================================================

/// A declarative, possibly nested, string rule.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Parse as a base-10 integer.
    Integer,
    /// Parse as a decimal float.
    Float,
    /// Inclusive range; the bound kind decides parsing.
    Range(RangeRule),
    /// Regular-expression search.
    Pattern(Regex),
    /// Arbitrary check that may produce any value.
    Predicate(Predicate),
    /// First alternative that accepts wins.
    OneOf(Vec<Rule>),
    /// Keyed nested constraints.
    Combinator(Arc<Combinator>),
    /// Builds an object from the input.
    Constructor(Constructor),
    /// Input must equal the scalar's canonical text.
    Literal(Scalar),
}

impl Rule {
    /// Range rule from two scalar bounds; see [`RangeRule::new`].
    pub fn range(lo: impl Into<Scalar>, hi: impl Into<Scalar>) -> Result<Self, ConfigError> {
        RangeRule::new(lo, hi).map(Self::Range)
    }

    /// Integer range `lo..=hi`.
    #[must_use]
    pub fn int_range(lo: i64, hi: i64) -> Self {
        Self::Range(RangeRule::Integer { lo, hi })
    }

    /// Float range `lo..=hi`.
    #[must_use]
    pub fn float_range(lo: f64, hi: f64) -> Self {
        Self::Range(RangeRule::Float { lo, hi })
    }

    /// Lexicographic text range `lo..=hi`.
    pub fn text_range(lo: impl Into<String>, hi: impl Into<String>) -> Self {
        Self::Range(RangeRule::Text {
            lo: lo.into(),
            hi: hi.into(),
        })
    }

    /// Compiles a case-sensitive pattern rule.
    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        pattern::compile(pattern, false).map(Self::Pattern)
    }

    /// Compiles a case-insensitive pattern rule.
    pub fn pattern_ci(pattern: &str) -> Result<Self, ConfigError> {
        pattern::compile(pattern, true).map(Self::Pattern)
    }

    /// Predicate rule; `None` rejects the input.
    pub fn predicate<F, T>(f: F) -> Self
    where
        F: Fn(&str) -> Option<T> + Send + Sync + 'static,
        T: Into<Value> + 'static,
    {
        Self::Predicate(Predicate::new(f))
    }

    /// Predicate rule whose errors are reported as `InvalidValue`.
    pub fn try_predicate<F, T, E>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Option<T>, E> + Send + Sync + 'static,
        T: Into<Value> + 'static,
        E: Into<BoxError> + 'static,
    {
        Self::Predicate(Predicate::fallible(f))
    }

    /// Ordered list of alternatives.
    pub fn one_of(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self::OneOf(rules.into_iter().collect())
    }

    /// Builds a `T` from the input with [`FromStr`].
    #[must_use]
    pub fn constructor<T>() -> Self
    where
        T: FromStr + Any + Send + Sync,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        Self::Constructor(Constructor::from_str::<T>())
    }

    /// Literal rule.
    pub fn literal(value: impl Into<Scalar>) -> Self {
        Self::Literal(value.into())
    }

    /// Short name of the variant, used in logs.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Range(_) => "range",
            Self::Pattern(_) => "pattern",
            Self::Predicate(_) => "predicate",
            Self::OneOf(_) => "one_of",
            Self::Combinator(_) => "combinator",
            Self::Constructor(_) => "constructor",
            Self::Literal(_) => "literal",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("Integer"),
            Self::Float => f.write_str("Float"),
            Self::Range(r) => write!(f, "{r}"),
            Self::Pattern(re) => write!(f, "/{}/", re.as_str()),
            Self::Predicate(_) => f.write_str("<predicate>"),
            Self::OneOf(rules) => {
                f.write_str("[")?;
                for (i, rule) in rules.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{rule}")?;
                }
                f.write_str("]")
            }
            Self::Combinator(c) => write!(f, "{c}"),
            Self::Constructor(c) => write!(f, "<{}>", c.type_name()),
            Self::Literal(s) => write!(f, "{s}"),
        }
    }
}

impl From<RangeRule> for Rule {
    fn from(range: RangeRule) -> Self {
        Self::Range(range)
    }
}

impl From<Regex> for Rule {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

impl From<Combinator> for Rule {
    fn from(combinator: Combinator) -> Self {
        Self::Combinator(Arc::new(combinator))
    }
}

impl From<Scalar> for Rule {
    fn from(scalar: Scalar) -> Self {
        Self::Literal(scalar)
    }
}

impl From<Vec<Rule>> for Rule {
    fn from(rules: Vec<Rule>) -> Self {
        Self::OneOf(rules)
    }
}

// ============================================================================
// PREDICATE
// ============================================================================

type PredicateFn = dyn Fn(&str) -> Result<Option<Value>, BoxError> + Send + Sync;

/// A caller-supplied check.
///
/// `Ok(None)` rejects the input. Any `Ok(Some(value))` accepts it and
/// becomes the result, `Value::Bool(false)` included. `Err` is never
/// propagated; the evaluator reports it as `InvalidValue`.
#[derive(Clone)]
pub struct Predicate {
    f: Arc<PredicateFn>,
}

impl Predicate {
    /// Wraps an infallible predicate.
    pub fn new<F, T>(f: F) -> Self
    where
        F: Fn(&str) -> Option<T> + Send + Sync + 'static,
        T: Into<Value> + 'static,
    {
        Self {
            f: Arc::new(move |input: &str| -> Result<Option<Value>, BoxError> {
                Ok(f(input).map(Into::into))
            }),
        }
    }

    /// Wraps a fallible predicate.
    pub fn fallible<F, T, E>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Option<T>, E> + Send + Sync + 'static,
        T: Into<Value> + 'static,
        E: Into<BoxError> + 'static,
    {
        Self {
            f: Arc::new(move |input: &str| -> Result<Option<Value>, BoxError> {
                f(input).map(|v| v.map(Into::into)).map_err(Into::into)
            }),
        }
    }

    /// Invokes the predicate.
    pub fn call(&self, input: &str) -> Result<Option<Value>, BoxError> {
        (self.f)(input)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

// ============================================================================
// CONSTRUCTOR
// ============================================================================

type BuildFn = dyn Fn(&str) -> Result<Value, BoxError> + Send + Sync;

/// Builds an object of some type from the input.
#[derive(Clone)]
pub struct Constructor {
    type_name: &'static str,
    build: Arc<BuildFn>,
}

impl Constructor {
    /// Constructor backed by `T`'s [`FromStr`] impl.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str<T>() -> Self
    where
        T: FromStr + Any + Send + Sync,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        Self::new(|input: &str| input.parse::<T>())
    }

    /// Constructor backed by an arbitrary fallible function.
    pub fn new<F, T, E>(f: F) -> Self
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        T: Any + Send + Sync,
        E: Into<BoxError> + 'static,
    {
        Self {
            type_name: type_name::<T>(),
            build: Arc::new(move |input: &str| -> Result<Value, BoxError> {
                f(input).map(Value::object).map_err(Into::into)
            }),
        }
    }

    /// Name of the constructed type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Attempts to build the object.
    pub fn build(&self, input: &str) -> Result<Value, BoxError> {
        (self.build)(input)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// COMBINATOR
// ============================================================================

/// Key of a [`Combinator`] entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CombinatorKey {
    /// Exact byte length or byte-length range.
    Length,
    /// Minimum byte length.
    MinLength,
    /// Maximum byte length.
    MaxLength,
    /// Exact character length or range.
    CharLength,
    /// Minimum character length.
    MinCharLength,
    /// Maximum character length.
    MaxCharLength,
    /// Every nested rule must accept.
    All,
    /// At least one nested rule must accept.
    Any,
    /// Nested rule.
    Rule,
}

impl CombinatorKey {
    /// Every key, in evaluation order.
    pub const EVALUATION_ORDER: [Self; 9] = [
        Self::Length,
        Self::MinLength,
        Self::MaxLength,
        Self::CharLength,
        Self::MinCharLength,
        Self::MaxCharLength,
        Self::All,
        Self::Any,
        Self::Rule,
    ];

    /// The textual key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::MinLength => "minlength",
            Self::MaxLength => "maxlength",
            Self::CharLength => "charlength",
            Self::MinCharLength => "mincharlength",
            Self::MaxCharLength => "maxcharlength",
            Self::All => "all",
            Self::Any => "any",
            Self::Rule => "rule",
        }
    }
}

impl FromStr for CombinatorKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::EVALUATION_ORDER
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::invalid_key(s))
    }
}

impl fmt::Display for CombinatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A conjunction of keyed constraints.
///
/// Present keys are checked in [`CombinatorKey::EVALUATION_ORDER`]: length
/// constraints first, then `all`, `any` and `rule`. The first failure decides
/// the error. On success the value of `rule` wins, then `any`, then the list
/// of `all` results, then the input itself.
///
/// # Examples
///
/// ```
/// use string_validator::prelude::*;
///
/// let rule = Rule::from(
///     Combinator::new()
///         .min_length(3)
///         .rule(Rule::pattern(r"^\d+$").unwrap()),
/// );
/// assert_eq!(evaluate(&rule, "12").unwrap_err().kind(), ErrorKind::TooShort);
/// assert!(is_valid(&rule, "123"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Combinator {
    pub(crate) length: Option<LengthBound>,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) char_length: Option<LengthBound>,
    pub(crate) min_char_length: Option<usize>,
    pub(crate) max_char_length: Option<usize>,
    pub(crate) all: Option<Vec<Rule>>,
    pub(crate) any: Option<Vec<Rule>>,
    pub(crate) rule: Option<Rule>,
}

impl Combinator {
    /// Empty combinator; accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a byte length equal to / within `bound`.
    #[must_use]
    pub fn length(mut self, bound: impl Into<LengthBound>) -> Self {
        self.length = Some(bound.into());
        self
    }

    /// Requires at least `min` bytes.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Requires at most `max` bytes.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Requires a character length equal to / within `bound`.
    #[must_use]
    pub fn char_length(mut self, bound: impl Into<LengthBound>) -> Self {
        self.char_length = Some(bound.into());
        self
    }

    /// Requires at least `min` characters.
    #[must_use]
    pub fn min_char_length(mut self, min: usize) -> Self {
        self.min_char_length = Some(min);
        self
    }

    /// Requires at most `max` characters.
    #[must_use]
    pub fn max_char_length(mut self, max: usize) -> Self {
        self.max_char_length = Some(max);
        self
    }

    /// Every rule must accept.
    #[must_use]
    pub fn all(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.all = Some(rules.into_iter().collect());
        self
    }

    /// At least one rule must accept.
    #[must_use]
    pub fn any(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.any = Some(rules.into_iter().collect());
        self
    }

    /// Delegates to a nested rule.
    #[must_use]
    pub fn rule(mut self, rule: impl Into<Rule>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Returns `true` if `key` is set.
    #[must_use]
    pub fn has(&self, key: CombinatorKey) -> bool {
        match key {
            CombinatorKey::Length => self.length.is_some(),
            CombinatorKey::MinLength => self.min_length.is_some(),
            CombinatorKey::MaxLength => self.max_length.is_some(),
            CombinatorKey::CharLength => self.char_length.is_some(),
            CombinatorKey::MinCharLength => self.min_char_length.is_some(),
            CombinatorKey::MaxCharLength => self.max_char_length.is_some(),
            CombinatorKey::All => self.all.is_some(),
            CombinatorKey::Any => self.any.is_some(),
            CombinatorKey::Rule => self.rule.is_some(),
        }
    }

    /// Keys that are set, in evaluation order.
    pub fn keys(&self) -> impl Iterator<Item = CombinatorKey> + '_ {
        CombinatorKey::EVALUATION_ORDER
            .into_iter()
            .filter(|key| self.has(*key))
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, key) in self.keys().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(key.as_str())?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinator_key_round_trips_through_text() {
        for key in CombinatorKey::EVALUATION_ORDER {
            assert_eq!(key.as_str().parse::<CombinatorKey>().unwrap(), key);
        }
    }

    #[test]
    fn unknown_combinator_key() {
        let err = "hoge".parse::<CombinatorKey>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRuleKey { ref key } if key == "hoge"));
        assert_eq!(err.to_string(), "Invalid key: hoge");
    }

    #[test]
    fn combinator_keys_follow_evaluation_order() {
        let c = Combinator::new()
            .rule(Rule::Integer)
            .max_length(4)
            .any([Rule::literal(1)]);
        let keys: Vec<_> = c.keys().collect();
        assert_eq!(
            keys,
            vec![CombinatorKey::MaxLength, CombinatorKey::Any, CombinatorKey::Rule]
        );
        assert_eq!(c.to_string(), "{maxlength, any, rule}");
    }

    #[test]
    fn rule_display() {
        let rule = Rule::one_of([
            Rule::literal(123),
            Rule::literal("abc"),
            Rule::pattern_ci("xyz").unwrap(),
        ]);
        assert_eq!(rule.to_string(), r#"[123, "abc", /xyz/]"#);
        assert_eq!(Rule::int_range(3, 45).to_string(), "3..=45");
    }

    #[test]
    fn constructor_records_type_name() {
        let c = Constructor::from_str::<std::net::Ipv4Addr>();
        assert!(c.type_name().ends_with("Ipv4Addr"));
        assert!(c.build("10.0.0.1").is_ok());
        assert!(c.build("10.0.0.256").is_err());
    }

    #[test]
    fn predicate_maps_return_values() {
        let p = Predicate::new(|s: &str| (s == "xyz").then_some(123_i64));
        assert_eq!(p.call("xyz").unwrap(), Some(Value::Integer(123)));
        assert_eq!(p.call("abc").unwrap(), None);

        let failing = Predicate::fallible(|_: &str| Err::<Option<i64>, _>("hoge"));
        assert!(failing.call("abc").is_err());
    }

    #[test]
    fn rules_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Rule>();
    }
}
