//! Engine configuration and presets
//!
//! A [`Config`] is a complete description of an engine: level, encoding,
//! encoder key names, outputs and caller/stack-trace behaviour. Start from
//! [`Config::production`] or [`Config::development`], adjust, then
//! [`Config::build`].

use super::appender::Appender;
use super::encoder::{EncoderConfig, Encoding};
use super::engine::{Core, Engine};
use super::error::{LoggerError, Result};
use super::field::Field;
use super::log_level::LogLevel;
use crate::appenders::{ConsoleAppender, FileAppender};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Output path naming standard output
pub const STDOUT_PATH: &str = "stdout";
/// Output path naming standard error
pub const STDERR_PATH: &str = "stderr";

#[derive(Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum enabled level
    pub level: LogLevel,
    pub encoding: Encoding,
    pub encoder_config: EncoderConfig,
    /// `stdout`, `stderr` or file paths opened for append
    pub output_paths: Vec<String>,
    /// Skip caller attribution entirely
    pub disable_caller: bool,
    /// Never capture stack traces
    pub disable_stacktrace: bool,
    /// Records at or above this level carry a stack trace
    pub stacktrace_level: LogLevel,
    /// Logger name written under the name key
    pub name: Option<String>,
    #[serde(skip)]
    pub initial_fields: Vec<Field>,
    #[serde(skip)]
    appenders: Vec<Box<dyn Appender>>,
}

impl Config {
    /// JSON to stderr at Info, stack traces from Error
    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            encoding: Encoding::Json,
            encoder_config: EncoderConfig::production(),
            output_paths: vec![STDERR_PATH.to_string()],
            disable_caller: false,
            disable_stacktrace: false,
            stacktrace_level: LogLevel::Error,
            name: None,
            initial_fields: Vec::new(),
            appenders: Vec::new(),
        }
    }

    /// Console lines to stderr at Debug, stack traces from Warn
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            encoding: Encoding::Console,
            encoder_config: EncoderConfig::development(),
            output_paths: vec![STDERR_PATH.to_string()],
            disable_caller: false,
            disable_stacktrace: false,
            stacktrace_level: LogLevel::Warn,
            name: None,
            initial_fields: Vec::new(),
            appenders: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_encoder_config(mut self, encoder_config: EncoderConfig) -> Self {
        self.encoder_config = encoder_config;
        self
    }

    /// Replace the output paths
    #[must_use]
    pub fn with_output_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Add an appender alongside the output paths
    #[must_use]
    pub fn with_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Fields attached to every record
    #[must_use]
    pub fn with_initial_fields(mut self, fields: Vec<Field>) -> Self {
        self.initial_fields = fields;
        self
    }

    #[must_use]
    pub fn without_caller(mut self) -> Self {
        self.disable_caller = true;
        self
    }

    #[must_use]
    pub fn without_stacktrace(mut self) -> Self {
        self.disable_stacktrace = true;
        self
    }

    /// Validate the configuration, open every output and build the engine
    pub fn build(self) -> Result<Engine> {
        self.validate()?;

        let mut appenders: Vec<Box<dyn Appender>> = Vec::with_capacity(self.output_paths.len());
        for path in &self.output_paths {
            appenders.push(open_output(path)?);
        }
        appenders.extend(self.appenders);

        let core = Core {
            level: self.level,
            encoding: self.encoding,
            encoder: self.encoder_config,
            add_caller: !self.disable_caller,
            stacktrace_level: (!self.disable_stacktrace).then_some(self.stacktrace_level),
            appenders: parking_lot::Mutex::new(appenders),
            metrics: Default::default(),
        };

        Ok(Engine::from_core(core, self.name, self.initial_fields))
    }

    fn validate(&self) -> Result<()> {
        if self.encoding == Encoding::Json && self.encoder_config.message_key.is_empty() {
            return Err(LoggerError::config(
                "EncoderConfig",
                "message key must not be empty for JSON encoding",
            ));
        }

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (element, key) in self.encoder_config.keys() {
            if let Some(previous) = seen.insert(key, element) {
                return Err(LoggerError::config(
                    "EncoderConfig",
                    format!(
                        "key '{}' is used for both {} and {}",
                        key, previous, element
                    ),
                ));
            }
        }
        Ok(())
    }
}

fn open_output(path: &str) -> Result<Box<dyn Appender>> {
    match path {
        STDOUT_PATH => Ok(Box::new(ConsoleAppender::stdout())),
        STDERR_PATH => Ok(Box::new(ConsoleAppender::stderr())),
        "" => Err(LoggerError::config("Config", "output path must not be empty")),
        file => Ok(Box::new(FileAppender::new(file)?)),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::production()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("level", &self.level)
            .field("encoding", &self.encoding)
            .field("encoder_config", &self.encoder_config)
            .field("output_paths", &self.output_paths)
            .field("disable_caller", &self.disable_caller)
            .field("disable_stacktrace", &self.disable_stacktrace)
            .field("stacktrace_level", &self.stacktrace_level)
            .field("name", &self.name)
            .field(
                "appenders",
                &self.appenders.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
