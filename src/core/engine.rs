//! The structured-logging engine
//!
//! An [`Engine`] encodes each enabled record once and writes the line to
//! every appender. Derived instances ([`Engine::with_caller_skip`],
//! [`Engine::named`], [`Engine::with_fields`]) share appenders, level and
//! counters with the instance they came from.

use super::appender::Appender;
use super::caller::Caller;
use super::encoder::{EncoderConfig, Encoding};
use super::error::Result;
use super::field::Field;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::metrics::LoggerMetrics;
use parking_lot::Mutex;
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// State shared by an engine and everything derived from it
pub(crate) struct Core {
    pub(crate) level: LogLevel,
    pub(crate) encoding: Encoding,
    pub(crate) encoder: EncoderConfig,
    pub(crate) add_caller: bool,
    pub(crate) stacktrace_level: Option<LogLevel>,
    pub(crate) appenders: Mutex<Vec<Box<dyn Appender>>>,
    pub(crate) metrics: LoggerMetrics,
}

/// A built engine, safe to share across threads
///
/// Leveled methods are `#[track_caller]`: the record is attributed to the
/// first call site outside any `#[track_caller]` chain, plus the configured
/// caller skip.
#[derive(Clone)]
pub struct Engine {
    core: Arc<Core>,
    name: Option<String>,
    caller_skip: usize,
    fields: Vec<Field>,
}

impl Engine {
    pub(crate) fn from_core(core: Core, name: Option<String>, fields: Vec<Field>) -> Self {
        Self {
            core: Arc::new(core),
            name,
            caller_skip: 0,
            fields,
        }
    }

    /// Derived instance that skips `skip` more frames when attributing callers
    #[must_use]
    pub fn with_caller_skip(&self, skip: usize) -> Self {
        let mut derived = self.clone();
        derived.caller_skip += skip;
        derived
    }

    /// Derived instance with `name` appended to the logger name
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        let mut derived = self.clone();
        derived.name = match (&self.name, name.is_empty()) {
            (_, true) => self.name.clone(),
            (Some(parent), false) => Some(format!("{}.{}", parent, name)),
            (None, false) => Some(name.to_string()),
        };
        derived
    }

    /// Derived instance that adds `fields` to every record
    #[must_use]
    pub fn with_fields(&self, fields: Vec<Field>) -> Self {
        let mut derived = self.clone();
        derived.fields.extend(fields);
        derived
    }

    pub fn level(&self) -> LogLevel {
        self.core.level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.core.level
    }

    pub fn caller_skip(&self) -> usize {
        self.caller_skip
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn encoder_config(&self) -> &EncoderConfig {
        &self.core.encoder
    }

    pub fn encoding(&self) -> Encoding {
        self.core.encoding
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.core.metrics
    }

    #[track_caller]
    pub fn debug(&self, message: &str, fields: Vec<Field>) {
        self.write(LogLevel::Debug, message, fields, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: &str, fields: Vec<Field>) {
        self.write(LogLevel::Info, message, fields, Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, message: &str, fields: Vec<Field>) {
        self.write(LogLevel::Warn, message, fields, Location::caller());
    }

    #[track_caller]
    pub fn error(&self, message: &str, fields: Vec<Field>) {
        self.write(LogLevel::Error, message, fields, Location::caller());
    }

    /// Write the record, then panic with `message`
    #[track_caller]
    pub fn panic(&self, message: &str, fields: Vec<Field>) -> ! {
        self.write(LogLevel::Panic, message, fields, Location::caller());
        panic!("{}", message);
    }

    /// Write the record, flush every appender, then exit with status 1
    #[track_caller]
    pub fn fatal(&self, message: &str, fields: Vec<Field>) -> ! {
        self.write(LogLevel::Fatal, message, fields, Location::caller());
        self.terminate()
    }

    /// Flush every appender
    pub fn sync(&self) -> Result<()> {
        let mut appenders = self.core.appenders.lock();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    fn terminate(&self) -> ! {
        if let Err(e) = self.sync() {
            eprintln!("[LOGGER ERROR] Flush before exit failed: {}", e);
        }
        std::process::exit(1)
    }

    fn write(
        &self,
        level: LogLevel,
        message: &str,
        fields: Vec<Field>,
        location: &'static Location<'static>,
    ) {
        if !self.enabled(level) {
            self.core.metrics.record_filtered();
            return;
        }

        let encoder = &self.core.encoder;
        let mut all_fields = Vec::with_capacity(self.fields.len() + fields.len());
        all_fields.extend(self.fields.iter().cloned());
        all_fields.extend(fields);

        let mut entry = LogEntry::new(level, message)
            .with_logger_name(self.name.clone())
            .with_fields(all_fields);

        let want_function = !encoder.function_key.is_empty();
        if self.core.add_caller && (!encoder.caller_key.is_empty() || want_function) {
            entry = entry.with_caller(Caller::resolve(location, self.caller_skip, want_function));
        }

        if let Some(threshold) = self.core.stacktrace_level {
            if level >= threshold && !encoder.stacktrace_key.is_empty() {
                entry = entry.with_stacktrace(Backtrace::force_capture().to_string());
            }
        }

        let line = encoder.encode(self.core.encoding, &entry);

        let mut appenders = self.core.appenders.lock();
        let mut has_error = false;
        for (idx, appender) in appenders.iter_mut().enumerate() {
            if let Err(e) = appender.append(&line) {
                eprintln!(
                    "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                    idx,
                    appender.name(),
                    e
                );
                has_error = true;
            }
        }

        if has_error {
            self.core.metrics.record_dropped();
        } else {
            self.core.metrics.record_written();
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("name", &self.name)
            .field("level", &self.core.level)
            .field("encoding", &self.core.encoding)
            .field("caller_skip", &self.caller_skip)
            .field("fields", &self.fields.len())
            .finish()
    }
}
