//! Values produced by successful validation and scalars used inside rules.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// SCALAR
// ============================================================================

/// A scalar appearing inside a rule: a literal or a range bound.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Signed integer.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Text.
    String(String),
}

impl Scalar {
    /// Returns the scalar as a float if it is numeric.
    ///
    /// Integers beyond 2^53 round to the nearest float; range bounds accept
    /// that loss.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The canonical text a literal of this scalar must match.
    ///
    /// Integral floats keep a trailing `.0`, so `Scalar::Float(3.0)` matches
    /// `"3.0"` and not `"3"`.
    #[must_use]
    pub fn canonical_text(&self) -> String {
        match self {
            Self::Integer(n) => n.to_string(),
            Self::Float(f) => format_float(*f),
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
        }
    }
}

/// Shortest round-trip text of `f`, with `.0` on every integral finite value.
///
/// `f64`'s `Display` never switches to exponent notation, so the integral
/// case is plain digits at any magnitude.
pub(crate) fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            other => f.write_str(&other.canonical_text()),
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Integer(n) => Self::Integer(n),
            Scalar::Float(f) => Self::Float(f),
            Scalar::Bool(b) => Self::Bool(b),
            Scalar::String(s) => Self::String(s),
        }
    }
}

// ============================================================================
// VALUE
// ============================================================================

/// The typed value a rule derives from an accepted input.
///
/// `Object` holds whatever a constructor or predicate built; recover the
/// concrete type with [`Value::downcast_ref`].
#[derive(Clone)]
pub enum Value {
    /// Parsed integer.
    Integer(i64),
    /// Parsed float.
    Float(f64),
    /// Boolean returned by a predicate or a boolean literal.
    Bool(bool),
    /// Text, usually the accepted input itself.
    String(String),
    /// Per-element results of an `all` combinator.
    List(Vec<Value>),
    /// An arbitrary object.
    Object(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wraps an arbitrary object.
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Self::Object(Arc::new(value))
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float, if this is one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrows the wrapped object as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Object(obj) => obj.downcast_ref::<T>(),
            _ => None,
        }
    }

}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Object(_) => f.write_str("Object(..)"),
        }
    }
}

/// Objects compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_text_of_scalars() {
        assert_eq!(Scalar::Integer(-12).canonical_text(), "-12");
        assert_eq!(Scalar::Float(3.0).canonical_text(), "3.0");
        assert_eq!(Scalar::Float(8.7).canonical_text(), "8.7");
        assert_eq!(Scalar::Bool(true).canonical_text(), "true");
        assert_eq!(Scalar::from("abc").canonical_text(), "abc");
    }

    #[test]
    fn integral_floats_keep_fraction_at_any_magnitude() {
        assert_eq!(Scalar::Float(1e15).canonical_text(), "1000000000000000.0");
        assert_eq!(Scalar::Float(1e16).canonical_text(), "10000000000000000.0");
        assert_eq!(Scalar::Float(-1e17).canonical_text(), "-100000000000000000.0");
        assert_eq!(Scalar::Float(0.1).canonical_text(), "0.1");
        assert_eq!(Scalar::Float(f64::INFINITY).canonical_text(), "inf");
    }

    #[test]
    fn objects_compare_by_identity() {
        let a = Value::object(5_u8);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, Value::object(5_u8));
        assert_eq!(a.downcast_ref::<u8>(), Some(&5));
        assert_eq!(a.downcast_ref::<u16>(), None);
    }

    #[test]
    fn accessors_match_variant() {
        assert_eq!(Value::from(3_i64).as_i64(), Some(3));
        assert_eq!(Value::from(3_i64).as_f64(), None);
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from(false).as_bool(), Some(false));
        assert_eq!(Value::from(vec![Value::from(1_i64)]).as_list().map(<[_]>::len), Some(1));
    }
}
