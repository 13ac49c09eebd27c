//! Integration tests for named rule tables.

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use string_validator::prelude::*;
use tracing_subscriber::EnvFilter;

#[fixture]
fn validator() -> NamedRuleValidator {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    NamedRuleSet::new()
        .with("hoge", Rule::Integer)
        .with("fuga", Rule::literal("abc"))
        .with(
            "piyo",
            Combinator::new()
                .min_length(3)
                .rule(Rule::pattern("^[a-z]+$").unwrap()),
        )
        .into()
}

#[rstest]
fn validate_returns_converted_value(validator: NamedRuleValidator) {
    assert_eq!(validator.validate("hoge", "123").unwrap(), Value::Integer(123));
    assert_eq!(validator.validate("fuga", "abc").unwrap(), Value::from("abc"));
    assert_eq!(validator.validate("piyo", "xyz").unwrap(), Value::from("xyz"));
}

#[rstest]
fn validate_reports_rule_error(validator: NamedRuleValidator) {
    let err = validator.validate("piyo", "xy").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.kind(), Some(ErrorKind::TooShort));
    assert_eq!(err.as_validation().map(ValidationError::input), Some("xy"));
}

#[rstest]
fn unknown_rule_is_distinct_from_rejection(validator: NamedRuleValidator) {
    let err = validator.validate("hage", "123").unwrap_err();
    assert!(err.is_config());
    assert_eq!(err.kind(), None);
    assert!(matches!(
        validator.is_valid("hage", "123"),
        Err(ConfigError::UnknownRule { .. })
    ));
}

#[rstest]
#[case("123", Some("hoge"))]
#[case("abc", Some("fuga"))]
#[case("xyz", Some("piyo"))]
#[case("XYZ", None)]
#[case("", None)]
fn resolve_rule(
    validator: NamedRuleValidator,
    #[case] input: &str,
    #[case] expected: Option<&str>,
) {
    assert_eq!(validator.resolve_rule(input), expected);
}

#[test]
fn resolution_ignores_insertion_order() {
    let names = ["zeta", "alpha", "mid", "Beta"];
    let forward: NamedRuleSet = names.iter().map(|n| (*n, Rule::Integer)).collect();
    let backward: NamedRuleSet = names.iter().rev().map(|n| (*n, Rule::Integer)).collect();

    assert_eq!(
        forward.names().collect::<Vec<_>>(),
        ["Beta", "alpha", "mid", "zeta"]
    );
    assert_eq!(
        forward.names().collect::<Vec<_>>(),
        backward.names().collect::<Vec<_>>()
    );

    let v = NamedRuleValidator::new(backward);
    assert_eq!(v.resolve_rule("7"), Some("Beta"));
    assert_eq!(v.resolve_all("7").len(), 4);
}

#[test]
fn empty_table_resolves_nothing() {
    let v = NamedRuleValidator::default();
    assert!(v.rules().is_empty());
    assert_eq!(v.resolve_rule("anything"), None);
    assert!(v.resolve_all("anything").is_empty());
}

#[test]
fn extend_and_lookup() {
    let mut set = NamedRuleSet::new();
    set.extend([("a", Rule::Float), ("b", Rule::Integer)]);
    assert!(set.contains("a"));
    assert!(!set.contains("c"));
    assert_eq!(set.len(), 2);

    let v = NamedRuleValidator::new(set);
    assert!(matches!(v.rule("b"), Some(Rule::Integer)));
    assert!(v.rule("c").is_none());
}
