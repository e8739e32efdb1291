//! Record encoders
//!
//! Provides the two line encodings used by the presets:
//! - Json: one JSON object per line, keys named by [`EncoderConfig`]
//! - Console: tab-separated, human-readable, fields as a trailing JSON object
//!
//! An empty key name omits that element from the output.

use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Line encoding for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Machine-parseable JSON lines
    ///
    /// Example: `{"level":"info","ts":1736332245.123,"caller":"src/main.rs:12","msg":"started"}`
    #[default]
    Json,

    /// Human-readable console lines
    ///
    /// Example: `2025-01-08T10:30:45.123Z	INFO	src/main.rs:12	started	{"port":8080}`
    Console,
}

/// How the level name is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelEncoding {
    /// `info`
    #[default]
    Lowercase,
    /// `INFO`
    Capital,
    /// `INFO` with terminal colors (plain capital without the `color` feature)
    CapitalColor,
}

impl LevelEncoding {
    pub fn encode(&self, level: LogLevel) -> String {
        match self {
            LevelEncoding::Lowercase => level.to_lowercase_str().to_string(),
            LevelEncoding::Capital => level.to_str().to_string(),
            LevelEncoding::CapitalColor => colorize(level),
        }
    }
}

#[cfg(feature = "color")]
fn colorize(level: LogLevel) -> String {
    use colored::Colorize;
    level.to_str().color(level.color_code()).to_string()
}

#[cfg(not(feature = "color"))]
fn colorize(level: LogLevel) -> String {
    level.to_str().to_string()
}

/// Key names and value encoders for every record element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub message_key: String,
    pub level_key: String,
    pub time_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub function_key: String,
    pub stacktrace_key: String,
    pub level_encoding: LevelEncoding,
    pub time_encoding: TimestampFormat,
    /// Element separator for the console encoding
    pub console_separator: String,
}

impl EncoderConfig {
    /// Keys and encoders for machine consumption
    pub fn production() -> Self {
        Self {
            message_key: "msg".to_string(),
            level_key: "level".to_string(),
            time_key: "ts".to_string(),
            name_key: "logger".to_string(),
            caller_key: "caller".to_string(),
            function_key: String::new(),
            stacktrace_key: "stacktrace".to_string(),
            level_encoding: LevelEncoding::Lowercase,
            time_encoding: TimestampFormat::EpochSeconds,
            console_separator: "\t".to_string(),
        }
    }

    /// Keys and encoders for humans reading a terminal
    pub fn development() -> Self {
        Self {
            message_key: "M".to_string(),
            level_key: "L".to_string(),
            time_key: "T".to_string(),
            name_key: "N".to_string(),
            caller_key: "C".to_string(),
            function_key: String::new(),
            stacktrace_key: "S".to_string(),
            level_encoding: LevelEncoding::Capital,
            time_encoding: TimestampFormat::Iso8601,
            console_separator: "\t".to_string(),
        }
    }

    /// Non-empty key names, in record order
    pub fn keys(&self) -> Vec<(&'static str, &str)> {
        [
            ("level", self.level_key.as_str()),
            ("time", self.time_key.as_str()),
            ("name", self.name_key.as_str()),
            ("caller", self.caller_key.as_str()),
            ("function", self.function_key.as_str()),
            ("message", self.message_key.as_str()),
            ("stacktrace", self.stacktrace_key.as_str()),
        ]
        .into_iter()
        .filter(|(_, key)| !key.is_empty())
        .collect()
    }

    /// Encode one record as a single line (without the trailing newline)
    pub fn encode(&self, encoding: Encoding, entry: &LogEntry) -> String {
        match encoding {
            Encoding::Json => self.encode_json(entry),
            Encoding::Console => self.encode_console(entry),
        }
    }

    fn encode_json(&self, entry: &LogEntry) -> String {
        let mut json_obj = serde_json::Map::new();

        if !self.level_key.is_empty() {
            json_obj.insert(
                self.level_key.clone(),
                serde_json::Value::String(self.level_encoding.encode(entry.level)),
            );
        }
        if !self.time_key.is_empty() {
            json_obj.insert(
                self.time_key.clone(),
                self.time_encoding.to_json_value(&entry.timestamp),
            );
        }
        if let (false, Some(name)) = (self.name_key.is_empty(), &entry.logger_name) {
            json_obj.insert(self.name_key.clone(), serde_json::Value::String(name.clone()));
        }
        if let Some(ref caller) = entry.caller {
            if !self.caller_key.is_empty() {
                json_obj.insert(
                    self.caller_key.clone(),
                    serde_json::Value::String(caller.short()),
                );
            }
            if let (false, Some(function)) = (self.function_key.is_empty(), &caller.function) {
                json_obj.insert(
                    self.function_key.clone(),
                    serde_json::Value::String(function.clone()),
                );
            }
        }
        if !self.message_key.is_empty() {
            json_obj.insert(
                self.message_key.clone(),
                serde_json::Value::String(entry.message.clone()),
            );
        }

        // Colliding keys keep the later value
        for field in &entry.fields {
            json_obj.insert(field.key.clone(), field.kind.to_json_value());
        }

        if let (false, Some(stack)) = (self.stacktrace_key.is_empty(), &entry.stacktrace) {
            json_obj.insert(
                self.stacktrace_key.clone(),
                serde_json::Value::String(stack.clone()),
            );
        }

        serde_json::Value::Object(json_obj).to_string()
    }

    fn encode_console(&self, entry: &LogEntry) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(7);

        if !self.time_key.is_empty() {
            parts.push(self.time_encoding.format(&entry.timestamp));
        }
        if !self.level_key.is_empty() {
            parts.push(self.level_encoding.encode(entry.level));
        }
        if let (false, Some(name)) = (self.name_key.is_empty(), &entry.logger_name) {
            parts.push(name.clone());
        }
        if let Some(ref caller) = entry.caller {
            if !self.caller_key.is_empty() {
                parts.push(caller.short());
            }
            if let (false, Some(function)) = (self.function_key.is_empty(), &caller.function) {
                parts.push(function.clone());
            }
        }
        if !self.message_key.is_empty() {
            parts.push(escape_console(&entry.message));
        }
        if !entry.fields.is_empty() {
            let mut fields = serde_json::Map::new();
            for field in &entry.fields {
                fields.insert(field.key.clone(), field.kind.to_json_value());
            }
            parts.push(serde_json::Value::Object(fields).to_string());
        }

        let mut line = parts.join(&self.console_separator);
        if let (false, Some(stack)) = (self.stacktrace_key.is_empty(), &entry.stacktrace) {
            line.push('\n');
            line.push_str(stack.trim_end());
        }
        line
    }
}

/// Escape line breaks and tabs so a message cannot forge extra console lines
/// or columns
fn escape_console(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::production()
    }
}
