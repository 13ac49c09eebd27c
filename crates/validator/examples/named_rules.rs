//! Classifying input with a table of named rules
//!
//! Run with `RUST_LOG=string_validator=debug` to see rule resolution.

use std::net::Ipv4Addr;

use string_validator::prelude::*;
use tracing_subscriber::EnvFilter;

const RULES: &str = r#"{
    "rules": {
        "port": { "range": [1, 65535] },
        "ratio": { "range": [0.0, 1.0] },
        "flag": ["on", "off", true, false],
        "slug": { "maxcharlength": 32, "rule": { "pattern": "^[a-z][a-z0-9-]*$" } }
    }
}"#;

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rules = ValidatorConfig::from_json(RULES)?.rule_set()?;
    rules.insert("ipv4", Rule::constructor::<Ipv4Addr>());
    let validator = NamedRuleValidator::new(rules);

    for input in ["8080", "0.25", "on", "my-service", "10.0.0.1", "Not Valid!"] {
        match validator.resolve_rule(input) {
            Some(name) => match validator.validate(name, input) {
                Ok(value) => println!("✓ {input:<12} -> {name:<6} {value:?}"),
                Err(e) => println!("✗ {input:<12} -> {name}: {e}"),
            },
            None => println!("✗ {input:<12} matches no rule"),
        }
    }

    match validator.validate("port", "70000") {
        Ok(value) => println!("unexpected: {value:?}"),
        Err(e) => println!("\nport 70000 rejected: {e} ({:?})", e.kind()),
    }

    Ok(())
}
