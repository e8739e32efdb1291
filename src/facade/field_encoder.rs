//! Conversion of facade fields into engine fields
//!
//! Scalars map to one engine field under the same key. Sequences expand to
//! one field per element keyed `key0`, `key1`, ... since the engine has no
//! list-of-scalars field. Output order follows input order. Keys are not
//! deduplicated: two inputs producing the same output key are both passed
//! on and the engine keeps the later value.

use super::field_value::{FieldValue, LogField};
use crate::core::Field;

/// Encode caller fields into engine fields, preserving order
pub fn encode_fields(fields: Vec<LogField>) -> Vec<Field> {
    let mut encoded = Vec::with_capacity(fields.len());
    for field in fields {
        encode_field(field, &mut encoded);
    }
    encoded
}

fn encode_field(field: LogField, out: &mut Vec<Field>) {
    let LogField { key, value } = field;
    match value {
        FieldValue::Int(v) => out.push(Field::int(key, v)),
        FieldValue::Text(v) => out.push(Field::string(key, v)),
        FieldValue::Bool(v) => out.push(Field::bool(key, v)),
        FieldValue::Float(v) => out.push(Field::float64(key, v)),
        FieldValue::Any(v) => out.push(Field::any(key, v)),
        FieldValue::IntSeq(values) => expand(&key, values, |k, v| Field::int(k, v), out),
        FieldValue::TextSeq(values) => expand(&key, values, |k, v| Field::string(k, v), out),
        FieldValue::BoolSeq(values) => expand(&key, values, |k, v| Field::bool(k, v), out),
        FieldValue::FloatSeq(values) => expand(&key, values, |k, v| Field::float64(k, v), out),
        FieldValue::AnySeq(values) => expand(&key, values, |k, v| Field::any(k, v), out),
    }
}

fn expand<T>(key: &str, values: Vec<T>, make: fn(String, T) -> Field, out: &mut Vec<Field>) {
    out.reserve(values.len());
    for (idx, value) in values.into_iter().enumerate() {
        out.push(make(format!("{}{}", key, idx), value));
    }
}
