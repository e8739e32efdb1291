//! Log entry structure

use super::caller::Caller;
use super::field::Field;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub logger_name: Option<String>,
    pub caller: Option<Caller>,
    pub stacktrace: Option<String>,
    pub fields: Vec<Field>,
}

impl LogEntry {
    /// The message is stored as given; escaping is up to each encoding
    pub fn new(level: LogLevel, message: &str) -> Self {
        Self {
            level,
            message: message.to_string(),
            timestamp: Utc::now(),
            logger_name: None,
            caller: None,
            stacktrace: None,
            fields: Vec::new(),
        }
    }

    pub fn with_logger_name(mut self, name: Option<String>) -> Self {
        self.logger_name = name;
        self
    }

    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn with_stacktrace(mut self, stacktrace: String) -> Self {
        self.stacktrace = Some(stacktrace);
        self
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }
}
