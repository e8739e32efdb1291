//! Sparse encoder overrides
//!
//! A [`Configuration`] is a patch over a preset's [`EncoderConfig`]: every
//! key left as `None` keeps the preset's value. `Some("")` is an explicit
//! request for an empty key, which the engine treats as "omit this element".

use crate::core::EncoderConfig;
use serde::{Deserialize, Serialize};

/// Key-name overrides and caller skip for [`Logger::new`](super::Logger::new)
///
/// # Example
///
/// ```
/// use rust_log_facade::Configuration;
///
/// let config = Configuration::new()
///     .with_message_key("message")
///     .with_caller_skip(1);
/// assert_eq!(config.message_key.as_deref(), Some("message"));
/// assert!(config.level_key.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub message_key: Option<String>,
    pub caller_key: Option<String>,
    pub name_key: Option<String>,
    pub function_key: Option<String>,
    pub level_key: Option<String>,
    pub stack_trace_key: Option<String>,
    pub timestamp_key: Option<String>,
    /// Extra frames to skip when attributing the call site
    ///
    /// A non-zero skip walks a captured backtrace, which needs line tables
    /// in the binary, e.g. `[profile.release] debug = "line-tables-only"`.
    /// Without them records fall back to the direct call site and the first
    /// such record prints a `[LOGGER ERROR]` diagnostic.
    pub caller_skip: usize,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_caller_key(mut self, key: impl Into<String>) -> Self {
        self.caller_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_name_key(mut self, key: impl Into<String>) -> Self {
        self.name_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_function_key(mut self, key: impl Into<String>) -> Self {
        self.function_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_level_key(mut self, key: impl Into<String>) -> Self {
        self.level_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_stack_trace_key(mut self, key: impl Into<String>) -> Self {
        self.stack_trace_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_timestamp_key(mut self, key: impl Into<String>) -> Self {
        self.timestamp_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_caller_skip(mut self, skip: usize) -> Self {
        self.caller_skip = skip;
        self
    }
}

/// Overwrite each key of `encoder` that `config` sets
///
/// Key names are not validated here; [`Config::build`](crate::core::Config::build)
/// rejects unusable combinations.
pub fn apply_config(encoder: &mut EncoderConfig, config: &Configuration) {
    let overrides = [
        (&mut encoder.message_key, &config.message_key),
        (&mut encoder.caller_key, &config.caller_key),
        (&mut encoder.name_key, &config.name_key),
        (&mut encoder.function_key, &config.function_key),
        (&mut encoder.level_key, &config.level_key),
        (&mut encoder.stacktrace_key, &config.stack_trace_key),
        (&mut encoder.time_key, &config.timestamp_key),
    ];
    for (target, value) in overrides {
        if let Some(value) = value {
            target.clone_from(value);
        }
    }
}
