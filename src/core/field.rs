//! Engine-native structured fields
//!
//! A [`Field`] is one typed key/value pair attached to a log record. Fields
//! are built with the typed constructors ([`Field::int`], [`Field::string`],
//! [`Field::bool`], [`Field::float64`], [`Field::any`]) and are encoded in
//! the order they were supplied.

use serde::Serialize;
use std::fmt;

/// Typed value carried by a [`Field`]
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Int(i64),
    String(String),
    Bool(bool),
    Float64(f64),
    /// Opaque value, encoded as-is
    Any(serde_json::Value),
}

impl FieldKind {
    /// Convert to serde_json::Value for JSON serialization
    ///
    /// Non-finite floats have no JSON number form and are encoded as their
    /// text rendering (`"NaN"`, `"+Inf"`, `"-Inf"`).
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldKind::Int(i) => serde_json::Value::Number((*i).into()),
            FieldKind::String(s) => serde_json::Value::String(s.clone()),
            FieldKind::Bool(b) => serde_json::Value::Bool(*b),
            FieldKind::Float64(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(non_finite(*f).to_string())),
            FieldKind::Any(v) => v.clone(),
        }
    }
}

fn non_finite(f: f64) -> &'static str {
    if f.is_nan() {
        "NaN"
    } else if f.is_sign_positive() {
        "+Inf"
    } else {
        "-Inf"
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Int(i) => write!(f, "{}", i),
            FieldKind::String(s) => write!(f, "{}", s),
            FieldKind::Bool(b) => write!(f, "{}", b),
            FieldKind::Float64(fl) => write!(f, "{}", fl),
            FieldKind::Any(v) => write!(f, "{}", v),
        }
    }
}

/// One named, typed unit of log context
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub kind: FieldKind,
}

impl Field {
    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Int(value),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::String(value.into()),
        }
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Bool(value),
        }
    }

    pub fn float64(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Float64(value),
        }
    }

    /// Opaque field from an already-converted JSON value
    pub fn any(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Any(value),
        }
    }

    /// Opaque field from any serializable value
    ///
    /// A value that fails to serialize is recorded as the error text so that
    /// building a field never fails.
    pub fn reflect<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|e| serde_json::Value::String(format!("<unencodable: {}>", e)));
        Self::any(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_typed_constructors() {
        assert_eq!(Field::int("n", 3).kind, FieldKind::Int(3));
        assert_eq!(
            Field::string("s", "x").kind,
            FieldKind::String("x".to_string())
        );
        assert_eq!(Field::bool("b", true).kind, FieldKind::Bool(true));
        assert_eq!(Field::float64("f", 1.5).kind, FieldKind::Float64(1.5));
        assert_eq!(Field::any("a", serde_json::json!([1, 2])).key, "a");
    }

    #[test]
    fn test_non_finite_floats_encode_as_text() {
        assert_eq!(
            FieldKind::Float64(f64::NAN).to_json_value(),
            serde_json::json!("NaN")
        );
        assert_eq!(
            FieldKind::Float64(f64::NEG_INFINITY).to_json_value(),
            serde_json::json!("-Inf")
        );
    }

    #[test]
    fn test_reflect_serializable() {
        let mut map = HashMap::new();
        map.insert("region", "eu-west-1");
        let field = Field::reflect("meta", &map);
        assert_eq!(field.kind.to_json_value()["region"], "eu-west-1");
    }

    #[test]
    fn test_reflect_unencodable_value() {
        // Maps with non-string keys cannot become JSON objects
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1);
        let field = Field::reflect("bad", &map);
        match field.kind {
            FieldKind::Any(serde_json::Value::String(s)) => assert!(s.starts_with("<unencodable")),
            other => panic!("unexpected kind: {:?}", other),
        }
    }
}
