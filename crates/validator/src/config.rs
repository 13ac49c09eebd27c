//! Declarative rule definitions loaded from JSON
//!
//! A rule definition is a JSON value:
//!
//! | JSON | Rule |
//! |---|---|
//! | `123`, `1.5`, `true`, `"abc"` | literal |
//! | `[r1, r2, ...]` | one of |
//! | `{"type": "integer"}` / `{"type": "float"}` | type sentinel |
//! | `{"range": [lo, hi]}` | range |
//! | `{"pattern": "^a+$", "case_insensitive": true}` | pattern |
//! | any other object | combinator; every key must be a combinator key |
//!
//! Length values (`length`, `charlength`) are an integer or a two-element
//! `[min, max]` array. Predicates and constructors are code and have no JSON
//! form; add them with [`NamedRuleSet::insert`] after loading.
//!
//! # Examples
//!
//! ```
//! use string_validator::prelude::*;
//!
//! let validator = NamedRuleValidator::from_json(r#"{
//!     "rules": {
//!         "port": { "range": [1, 65535] },
//!         "code": { "length": [3, 8], "rule": { "pattern": "^[A-Z0-9]+$" } }
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(validator.resolve_rule("8080"), Some("port"));
//! assert_eq!(validator.resolve_rule("AB12"), Some("code"));
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Number, Value as JsonValue};

use crate::evaluator::Evaluator;
use crate::foundation::{ConfigError, ConfigResult, Scalar};
use crate::named::{NamedRuleSet, NamedRuleValidator};
use crate::rule::{Combinator, CombinatorKey, Rule};
use crate::validators::pattern;
use crate::validators::{LengthBound, LengthMode, RangeRule};

// ============================================================================
// VALIDATOR CONFIG
// ============================================================================

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Unit used by the `charlength` family.
    #[serde(default)]
    pub char_units: LengthMode,

    /// Rule definitions by name.
    #[serde(default)]
    pub rules: BTreeMap<String, JsonValue>,
}

impl ValidatorConfig {
    /// Parses a configuration document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Evaluator configured with [`char_units`](Self::char_units).
    #[must_use]
    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new().with_char_units(self.char_units)
    }

    /// Compiles every rule definition.
    pub fn rule_set(&self) -> ConfigResult<NamedRuleSet> {
        let mut set = NamedRuleSet::new();
        for (name, definition) in &self.rules {
            let rule = Rule::from_json_value(definition).inspect_err(|err| {
                tracing::warn!(rule = %name, error = %err, "rejected rule definition");
            })?;
            set.insert(name.clone(), rule);
        }
        tracing::debug!(rules = set.len(), char_units = ?self.char_units, "loaded rule set");
        Ok(set)
    }

    /// Builds a validator from this configuration.
    pub fn into_validator(self) -> ConfigResult<NamedRuleValidator> {
        let rules = self.rule_set()?;
        Ok(NamedRuleValidator::with_evaluator(rules, self.evaluator()))
    }
}

impl NamedRuleSet {
    /// Parses a JSON object mapping names to rule definitions.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let rules: BTreeMap<String, JsonValue> = serde_json::from_str(json)?;
        ValidatorConfig {
            rules,
            ..ValidatorConfig::default()
        }
        .rule_set()
    }
}

impl NamedRuleValidator {
    /// Builds a validator from a [`ValidatorConfig`] document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        ValidatorConfig::from_json(json)?.into_validator()
    }
}

// ============================================================================
// RULE DEFINITIONS
// ============================================================================

impl Rule {
    /// Compiles a JSON rule definition.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_validator::prelude::*;
    /// use serde_json::json;
    ///
    /// let definition = json!({ "minlength": 3, "rule": { "type": "integer" } });
    /// let rule = Rule::from_json_value(&definition).unwrap();
    /// assert_eq!(evaluate(&rule, "123").unwrap(), Value::Integer(123));
    ///
    /// let err = Rule::from_json_value(&json!({ "hoge": null })).unwrap_err();
    /// assert_eq!(err.to_string(), "Invalid key: hoge");
    /// ```
    pub fn from_json_value(value: &JsonValue) -> ConfigResult<Self> {
        match value {
            JsonValue::Null => Err(ConfigError::invalid_definition("null is not a rule")),
            JsonValue::Bool(b) => Ok(Self::literal(*b)),
            JsonValue::Number(n) => number_scalar(n).map(Self::Literal),
            JsonValue::String(s) => Ok(Self::literal(s.as_str())),
            JsonValue::Array(items) => rule_list(items).map(Self::OneOf),
            JsonValue::Object(map) => object_rule(map),
        }
    }
}

impl TryFrom<&JsonValue> for Rule {
    type Error = ConfigError;

    fn try_from(value: &JsonValue) -> Result<Self, Self::Error> {
        Self::from_json_value(value)
    }
}

fn number_scalar(n: &Number) -> ConfigResult<Scalar> {
    if let Some(i) = n.as_i64() {
        Ok(Scalar::Integer(i))
    } else if n.is_u64() {
        Err(ConfigError::invalid_definition(format!(
            "integer {n} does not fit in i64"
        )))
    } else {
        n.as_f64()
            .map(Scalar::Float)
            .ok_or_else(|| ConfigError::invalid_definition(format!("unsupported number {n}")))
    }
}

fn scalar(value: &JsonValue) -> ConfigResult<Scalar> {
    match value {
        JsonValue::Number(n) => number_scalar(n),
        JsonValue::String(s) => Ok(Scalar::String(s.clone())),
        JsonValue::Bool(b) => Ok(Scalar::Bool(*b)),
        other => Err(ConfigError::invalid_definition(format!(
            "expected a scalar, found {other}"
        ))),
    }
}

fn rule_list(items: &[JsonValue]) -> ConfigResult<Vec<Rule>> {
    items.iter().map(Rule::from_json_value).collect()
}

fn pair(value: &JsonValue, what: &str) -> ConfigResult<(JsonValue, JsonValue)> {
    match value.as_array().map(Vec::as_slice) {
        Some([lo, hi]) => Ok((lo.clone(), hi.clone())),
        _ => Err(ConfigError::invalid_definition(format!(
            "{what} must be a two-element array"
        ))),
    }
}

fn count(value: &JsonValue, key: CombinatorKey) -> ConfigResult<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            ConfigError::invalid_definition(format!("{key} must be a non-negative integer"))
        })
}

fn length_bound(value: &JsonValue, key: CombinatorKey) -> ConfigResult<LengthBound> {
    if value.is_array() {
        let (lo, hi) = pair(value, key.as_str())?;
        Ok(LengthBound::Range(count(&lo, key)?..=count(&hi, key)?))
    } else {
        count(value, key).map(LengthBound::Exact)
    }
}

fn rule_array(value: &JsonValue, key: CombinatorKey) -> ConfigResult<Vec<Rule>> {
    match value {
        JsonValue::Array(items) => rule_list(items),
        _ => Err(ConfigError::invalid_definition(format!(
            "{key} must be an array of rules"
        ))),
    }
}

fn only_key(map: &Map<String, JsonValue>, key: &str) -> ConfigResult<()> {
    if map.len() == 1 {
        Ok(())
    } else {
        Err(ConfigError::invalid_definition(format!(
            "`{key}` cannot be combined with other keys"
        )))
    }
}

fn object_rule(map: &Map<String, JsonValue>) -> ConfigResult<Rule> {
    if let Some(kind) = map.get("type") {
        only_key(map, "type")?;
        return match kind.as_str() {
            Some("integer") => Ok(Rule::Integer),
            Some("float") => Ok(Rule::Float),
            _ => Err(ConfigError::invalid_definition(format!(
                "unknown type {kind}, expected \"integer\" or \"float\""
            ))),
        };
    }

    if let Some(bounds) = map.get("range") {
        only_key(map, "range")?;
        let (lo, hi) = pair(bounds, "range")?;
        return RangeRule::new(scalar(&lo)?, scalar(&hi)?).map(Rule::Range);
    }

    if let Some(source) = map.get("pattern") {
        if let Some(extra) = map
            .keys()
            .find(|k| !matches!(k.as_str(), "pattern" | "case_insensitive"))
        {
            return Err(ConfigError::invalid_key(extra.as_str()));
        }
        let source = source
            .as_str()
            .ok_or_else(|| ConfigError::invalid_definition("pattern must be a string"))?;
        let case_insensitive = match map.get("case_insensitive") {
            None => false,
            Some(flag) => flag.as_bool().ok_or_else(|| {
                ConfigError::invalid_definition("case_insensitive must be a boolean")
            })?,
        };
        return pattern::compile(source, case_insensitive).map(Rule::Pattern);
    }

    combinator(map).map(Rule::from)
}

fn combinator(map: &Map<String, JsonValue>) -> ConfigResult<Combinator> {
    let mut c = Combinator::new();
    for (name, value) in map {
        let key: CombinatorKey = name.parse()?;
        c = match key {
            CombinatorKey::Length => c.length(length_bound(value, key)?),
            CombinatorKey::MinLength => c.min_length(count(value, key)?),
            CombinatorKey::MaxLength => c.max_length(count(value, key)?),
            CombinatorKey::CharLength => c.char_length(length_bound(value, key)?),
            CombinatorKey::MinCharLength => c.min_char_length(count(value, key)?),
            CombinatorKey::MaxCharLength => c.max_char_length(count(value, key)?),
            CombinatorKey::All => c.all(rule_array(value, key)?),
            CombinatorKey::Any => c.any(rule_array(value, key)?),
            CombinatorKey::Rule => c.rule(Rule::from_json_value(value)?),
        };
    }
    Ok(c)
}
