//! Strict whole-string numeric parsing
//!
//! Both parsers reject surrounding whitespace and trailing garbage. The float
//! parser only accepts decimal notation (`-1.5`, `3`, `2.5e-3`), never
//! `inf`/`nan`, and rejects literals that overflow to infinity.

use crate::foundation::ErrorKind;

/// Parses `input` as a base-10 signed integer.
///
/// # Examples
///
/// ```
/// use string_validator::validators::numeric::parse_integer;
/// use string_validator::foundation::ErrorKind;
///
/// assert_eq!(parse_integer("-213"), Ok(-213));
/// assert_eq!(parse_integer("1.2"), Err(ErrorKind::NotInteger));
/// ```
pub fn parse_integer(input: &str) -> Result<i64, ErrorKind> {
    input.parse::<i64>().map_err(|_| ErrorKind::NotInteger)
}

/// Parses `input` as a finite decimal float.
pub fn parse_float(input: &str) -> Result<f64, ErrorKind> {
    if !input
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return Err(ErrorKind::NotFloat);
    }
    match input.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(f),
        _ => Err(ErrorKind::NotFloat),
    }
}
