//! Validation against a table of named rules
//!
//! [`NamedRuleSet`] maps identifiers to rules and always iterates them in
//! byte-wise lexicographic order of the identifier, whatever the insertion
//! order was. [`NamedRuleValidator`] looks rules up by name and classifies an
//! input by the first named rule that accepts it.

use std::collections::BTreeMap;

use crate::evaluator::Evaluator;
use crate::foundation::{ConfigError, ConfigResult, Error, Value};
use crate::rule::Rule;

// ============================================================================
// NAMED RULE SET
// ============================================================================

/// Identifiers mapped to rules, ordered by identifier.
///
/// # Examples
///
/// ```
/// use string_validator::prelude::*;
///
/// let set: NamedRuleSet = [("hoge", Rule::Integer), ("fuga", Rule::literal("abc"))]
///     .into_iter()
///     .collect();
/// let names: Vec<_> = set.names().collect();
/// assert_eq!(names, ["fuga", "hoge"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NamedRuleSet {
    rules: BTreeMap<String, Rule>,
}

impl NamedRuleSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `rule` under `name`, replacing any previous rule of that name.
    pub fn insert(&mut self, name: impl Into<String>, rule: impl Into<Rule>) -> Option<Rule> {
        self.rules.insert(name.into(), rule.into())
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.insert(name, rule);
        self
    }

    /// Looks up a rule.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Identifiers in resolution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// `(identifier, rule)` pairs in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the set has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<N, R> FromIterator<(N, R)> for NamedRuleSet
where
    N: Into<String>,
    R: Into<Rule>,
{
    fn from_iter<I: IntoIterator<Item = (N, R)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(name, rule)| (name.into(), rule.into()))
                .collect(),
        }
    }
}

impl<N, R> Extend<(N, R)> for NamedRuleSet
where
    N: Into<String>,
    R: Into<Rule>,
{
    fn extend<I: IntoIterator<Item = (N, R)>>(&mut self, iter: I) {
        for (name, rule) in iter {
            self.insert(name, rule);
        }
    }
}

// ============================================================================
// NAMED RULE VALIDATOR
// ============================================================================

/// Validates and classifies input against a [`NamedRuleSet`].
///
/// # Examples
///
/// ```
/// use string_validator::prelude::*;
///
/// let validator = NamedRuleValidator::new(
///     NamedRuleSet::new()
///         .with("hoge", Rule::Integer)
///         .with("fuga", Rule::literal("abc")),
/// );
///
/// assert_eq!(validator.validate("hoge", "123").unwrap(), Value::Integer(123));
/// assert_eq!(validator.resolve_rule("abc"), Some("fuga"));
/// assert_eq!(validator.resolve_rule("xyz"), None);
/// assert!(validator.validate("hage", "123").unwrap_err().is_config());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NamedRuleValidator {
    rules: NamedRuleSet,
    evaluator: Evaluator,
}

impl NamedRuleValidator {
    /// Wraps `rules` with the default [`Evaluator`].
    #[must_use]
    pub fn new(rules: NamedRuleSet) -> Self {
        Self::with_evaluator(rules, Evaluator::new())
    }

    /// Wraps `rules` with a custom evaluator.
    #[must_use]
    pub fn with_evaluator(rules: NamedRuleSet, evaluator: Evaluator) -> Self {
        Self { rules, evaluator }
    }

    /// The underlying rule set.
    #[must_use]
    pub fn rules(&self) -> &NamedRuleSet {
        &self.rules
    }

    /// The evaluator used for every check.
    #[must_use]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    fn lookup(&self, name: &str) -> ConfigResult<&Rule> {
        self.rules.get(name).ok_or_else(|| {
            tracing::debug!(name, "lookup of unknown rule");
            ConfigError::unknown_rule(name)
        })
    }

    /// Validates `input` against the rule called `name`.
    ///
    /// Fails with [`Error::Config`] if no such rule exists, otherwise with
    /// the evaluator's [`Error::Validation`].
    pub fn validate(&self, name: &str, input: &str) -> Result<Value, Error> {
        let rule = self.lookup(name)?;
        Ok(self.evaluator.evaluate(rule, input)?)
    }

    /// Returns whether the rule called `name` accepts `input`.
    ///
    /// Validation failures become `Ok(false)`; an unknown name is still an
    /// error.
    pub fn is_valid(&self, name: &str, input: &str) -> ConfigResult<bool> {
        let rule = self.lookup(name)?;
        Ok(self.evaluator.is_valid(rule, input))
    }

    /// Name of the first rule, in identifier order, that accepts `input`.
    pub fn resolve_rule(&self, input: &str) -> Option<&str> {
        let resolved = self
            .rules
            .iter()
            .find(|(_, rule)| self.evaluator.is_valid(rule, input))
            .map(|(name, _)| name);
        tracing::debug!(?resolved, "resolved input against named rules");
        resolved
    }

    /// Names of every rule that accepts `input`, in identifier order.
    pub fn resolve_all(&self, input: &str) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|(_, rule)| self.evaluator.is_valid(rule, input))
            .map(|(name, _)| name)
            .collect()
    }
}

impl From<NamedRuleSet> for NamedRuleValidator {
    fn from(rules: NamedRuleSet) -> Self {
        Self::new(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ErrorKind;
    use pretty_assertions::assert_eq;

    fn sample() -> NamedRuleValidator {
        NamedRuleSet::new()
            .with("hoge", Rule::Integer)
            .with("fuga", Rule::literal("abc"))
            .into()
    }

    #[test]
    fn validate_by_name() {
        let v = sample();
        assert_eq!(v.validate("hoge", "123").unwrap(), Value::Integer(123));
        assert_eq!(v.validate("fuga", "abc").unwrap(), Value::from("abc"));
        assert_eq!(
            v.validate("hoge", "abc").unwrap_err().kind(),
            Some(ErrorKind::NotInteger)
        );
        assert_eq!(
            v.validate("fuga", "123").unwrap_err().kind(),
            Some(ErrorKind::InvalidValue)
        );
    }

    #[test]
    fn unknown_name_is_config_error() {
        let err = sample().validate("hage", "123").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::UnknownRule { ref name }) if name == "hage"
        ));
        assert_eq!(err.to_string(), "No such rule: hage");
    }

    #[test]
    fn is_valid_by_name() {
        let v = sample();
        assert!(v.is_valid("hoge", "123").unwrap());
        assert!(v.is_valid("fuga", "abc").unwrap());
        assert!(!v.is_valid("hoge", "abc").unwrap());
        assert!(!v.is_valid("fuga", "123").unwrap());
        assert!(v.is_valid("hage", "123").is_err());
    }

    #[test]
    fn resolve_rule_first_match() {
        let v = sample();
        assert_eq!(v.resolve_rule("123"), Some("hoge"));
        assert_eq!(v.resolve_rule("abc"), Some("fuga"));
        assert_eq!(v.resolve_rule("xyz"), None);
    }

    #[test]
    fn resolve_ties_break_by_name() {
        let v: NamedRuleValidator = NamedRuleSet::new()
            .with("b_int", Rule::Integer)
            .with("a_float", Rule::Float)
            .into();
        assert_eq!(v.resolve_rule("5"), Some("a_float"));
        assert_eq!(v.resolve_all("5"), vec!["a_float", "b_int"]);
        assert_eq!(v.resolve_all("5.5"), vec!["a_float"]);
    }

    #[test]
    fn insert_replaces_existing_rule() {
        let mut set = NamedRuleSet::new();
        assert!(set.insert("x", Rule::Integer).is_none());
        assert!(set.insert("x", Rule::Float).is_some());
        assert_eq!(set.len(), 1);
        assert!(matches!(set.get("x"), Some(Rule::Float)));
    }
}
