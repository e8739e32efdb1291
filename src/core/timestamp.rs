//! Timestamp encodings
//!
//! Numeric encodings are written as JSON numbers by the JSON encoder; the
//! textual ones as strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the record timestamp is rendered
///
/// # Examples
///
/// ```
/// use rust_log_facade::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// Seconds since the Unix epoch as a float: `1736332245.123456`
    #[default]
    EpochSeconds,

    /// Milliseconds since the Unix epoch: `1736332245123`
    EpochMillis,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::EpochSeconds => format!("{:.6}", epoch_seconds(datetime)),
            TimestampFormat::EpochMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
        }
    }

    /// JSON form of the timestamp
    #[must_use]
    pub fn to_json_value(&self, datetime: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimestampFormat::EpochSeconds => serde_json::Number::from_f64(epoch_seconds(datetime))
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            TimestampFormat::EpochMillis => {
                serde_json::Value::Number(datetime.timestamp_millis().into())
            }
            _ => serde_json::Value::String(self.format(datetime)),
        }
    }
}

fn epoch_seconds(datetime: &DateTime<Utc>) -> f64 {
    datetime.timestamp() as f64 + f64::from(datetime.timestamp_subsec_micros()) / 1_000_000.0
}
