//! Field values accepted by the facade
//!
//! [`FieldValue`] is a closed set: every value a caller can attach is one of
//! these variants, so each one maps to exactly one encoding rule in
//! [`encode_fields`](super::encode_fields).

use serde::Serialize;

/// Value of one named log attribute
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    Bool(bool),
    Float(f64),
    IntSeq(Vec<i64>),
    TextSeq(Vec<String>),
    BoolSeq(Vec<bool>),
    FloatSeq(Vec<f64>),
    /// Sequence of opaque values, expanded element by element
    AnySeq(Vec<serde_json::Value>),
    /// Anything else, encoded as a single opaque value
    Any(serde_json::Value),
}

impl FieldValue {
    /// Whether this value expands into one field per element
    pub fn is_sequence(&self) -> bool {
        matches!(
            self,
            FieldValue::IntSeq(_)
                | FieldValue::TextSeq(_)
                | FieldValue::BoolSeq(_)
                | FieldValue::FloatSeq(_)
                | FieldValue::AnySeq(_)
        )
    }

    /// Opaque value from anything serializable
    ///
    /// Serialization failures are kept as text describing the failure.
    pub fn any<T: Serialize + ?Sized>(value: &T) -> Self {
        FieldValue::Any(to_json(value))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| serde_json::Value::String(format!("<unencodable: {}>", e)))
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

macro_rules! impl_from_small_int {
    ($($t:ty),+) => {$(
        impl From<$t> for FieldValue {
            fn from(i: $t) -> Self {
                FieldValue::Int(i64::from(i))
            }
        }

        impl From<Vec<$t>> for FieldValue {
            fn from(v: Vec<$t>) -> Self {
                FieldValue::IntSeq(v.into_iter().map(i64::from).collect())
            }
        }
    )+};
}

impl_from_small_int!(i8, i16, i32, u8, u16, u32);

// Values above i64::MAX stay exact as opaque JSON numbers
macro_rules! impl_from_wide_unsigned {
    ($($t:ty),+) => {$(
        impl From<$t> for FieldValue {
            fn from(i: $t) -> Self {
                match i64::try_from(i) {
                    Ok(i) => FieldValue::Int(i),
                    Err(_) => FieldValue::Any(serde_json::Value::from(i)),
                }
            }
        }

        impl From<Vec<$t>> for FieldValue {
            fn from(v: Vec<$t>) -> Self {
                match v.iter().map(|&i| i64::try_from(i)).collect::<Result<Vec<i64>, _>>() {
                    Ok(ints) => FieldValue::IntSeq(ints),
                    Err(_) => FieldValue::AnySeq(v.into_iter().map(serde_json::Value::from).collect()),
                }
            }
        }
    )+};
}

impl_from_wide_unsigned!(u64, usize);

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<Vec<i64>> for FieldValue {
    fn from(v: Vec<i64>) -> Self {
        FieldValue::IntSeq(v)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        FieldValue::TextSeq(v)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(v: Vec<&str>) -> Self {
        FieldValue::TextSeq(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<bool>> for FieldValue {
    fn from(v: Vec<bool>) -> Self {
        FieldValue::BoolSeq(v)
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(v: Vec<f64>) -> Self {
        FieldValue::FloatSeq(v)
    }
}

impl From<Vec<serde_json::Value>> for FieldValue {
    fn from(v: Vec<serde_json::Value>) -> Self {
        FieldValue::AnySeq(v)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        FieldValue::Any(v)
    }
}

/// A key paired with its value, as passed to the leveled methods
#[derive(Debug, Clone, PartialEq)]
pub struct LogField {
    pub key: String,
    pub value: FieldValue,
}

impl LogField {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, FieldValue::Int(value))
    }

    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::Text(value.into()))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, FieldValue::Float(value))
    }

    pub fn int_seq(key: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(key, FieldValue::IntSeq(values))
    }

    pub fn text_seq<S: Into<String>>(key: impl Into<String>, values: Vec<S>) -> Self {
        Self::new(
            key,
            FieldValue::TextSeq(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn bool_seq(key: impl Into<String>, values: Vec<bool>) -> Self {
        Self::new(key, FieldValue::BoolSeq(values))
    }

    pub fn float_seq(key: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(key, FieldValue::FloatSeq(values))
    }

    /// Sequence of arbitrary serializable values
    pub fn any_seq<T: Serialize>(key: impl Into<String>, values: &[T]) -> Self {
        Self::new(key, FieldValue::AnySeq(values.iter().map(to_json).collect()))
    }

    /// Single opaque value of any serializable type
    pub fn any<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        Self::new(key, FieldValue::any(value))
    }
}
