//! Regular-expression rules
//!
//! Matching is an unanchored search: `abc` accepts `"012abc345"`. Anchor the
//! pattern (`^...$` or `\A...\z`) to require a full match.

use regex::{Regex, RegexBuilder};

use crate::foundation::{ConfigError, ErrorKind, Value};

/// Compiles `pattern`, optionally ignoring case.
pub fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex, ConfigError> {
    Ok(RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()?)
}

/// Returns the input when `regex` finds a match in it.
pub fn check(regex: &Regex, input: &str) -> Result<Value, ErrorKind> {
    if regex.is_match(input) {
        Ok(Value::String(input.to_owned()))
    } else {
        Err(ErrorKind::RegexpMismatch)
    }
}
