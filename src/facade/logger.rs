//! The logging facade

use super::configuration::{apply_config, Configuration};
use super::field_encoder::encode_fields;
use super::field_value::LogField;
use crate::core::{Config, Engine, Result};

/// Leveled logging with typed fields
///
/// [`Logger`] is the production implementation; tests can substitute their
/// own. `panic` and `fatal` never return: the former unwinds after the
/// record is written, the latter terminates the process.
pub trait Log: Send + Sync {
    fn debug(&self, msg: &str, fields: Vec<LogField>);
    fn info(&self, msg: &str, fields: Vec<LogField>);
    fn error(&self, msg: &str, fields: Vec<LogField>);
    fn panic(&self, msg: &str, fields: Vec<LogField>) -> !;
    fn fatal(&self, msg: &str, fields: Vec<LogField>) -> !;
}

/// Facade over one exclusively owned [`Engine`]
///
/// # Example
///
/// ```
/// use rust_log_facade::{fields, Configuration, Logger};
///
/// let logger = Logger::new(Configuration::new().with_message_key("message")).unwrap();
/// logger.info("cache warmed", fields!["entries" => 512, "regions" => vec!["eu", "us"]]);
/// ```
#[derive(Debug)]
pub struct Logger {
    engine: Engine,
}

impl Logger {
    /// Human-readable development logger
    pub fn try_default() -> Result<Self> {
        Ok(Self::from_engine(Config::development().build()?))
    }

    /// JSON production logger with `config` applied over the preset keys
    ///
    /// A non-zero `config.caller_skip` needs line-table debuginfo; see
    /// [`Configuration::caller_skip`].
    pub fn new(config: Configuration) -> Result<Self> {
        Self::build(Config::production(), config)
    }

    /// Like [`Logger::new`], over a caller-chosen base configuration
    pub fn build(mut base: Config, config: Configuration) -> Result<Self> {
        apply_config(&mut base.encoder_config, &config);
        let engine = base.build()?;

        if config.caller_skip != 0 {
            return Ok(Self::from_engine(engine.with_caller_skip(config.caller_skip)));
        }
        Ok(Self::from_engine(engine))
    }

    pub fn from_engine(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Flush buffered output
    pub fn sync(&self) -> Result<()> {
        self.engine.sync()
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: Vec<LogField>) {
        self.engine.debug(msg, encode_fields(fields));
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: Vec<LogField>) {
        self.engine.info(msg, encode_fields(fields));
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: Vec<LogField>) {
        self.engine.error(msg, encode_fields(fields));
    }

    #[track_caller]
    pub fn panic(&self, msg: &str, fields: Vec<LogField>) -> ! {
        self.engine.panic(msg, encode_fields(fields))
    }

    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: Vec<LogField>) -> ! {
        self.engine.fatal(msg, encode_fields(fields))
    }
}

impl Log for Logger {
    #[track_caller]
    fn debug(&self, msg: &str, fields: Vec<LogField>) {
        Logger::debug(self, msg, fields);
    }

    #[track_caller]
    fn info(&self, msg: &str, fields: Vec<LogField>) {
        Logger::info(self, msg, fields);
    }

    #[track_caller]
    fn error(&self, msg: &str, fields: Vec<LogField>) {
        Logger::error(self, msg, fields);
    }

    #[track_caller]
    fn panic(&self, msg: &str, fields: Vec<LogField>) -> ! {
        Logger::panic(self, msg, fields)
    }

    #[track_caller]
    fn fatal(&self, msg: &str, fields: Vec<LogField>) -> ! {
        Logger::fatal(self, msg, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::LogLevel;
    use crate::facade::FieldValue;

    fn capture(config: Configuration) -> (Logger, MemoryAppender) {
        let sink = MemoryAppender::new();
        let base = Config::production()
            .with_level(LogLevel::Debug)
            .with_output_paths(Vec::<String>::new())
            .with_appender(Box::new(sink.clone()));
        (Logger::build(base, config).unwrap(), sink)
    }

    #[test]
    fn test_try_default_builds() {
        let logger = Logger::try_default().unwrap();
        assert_eq!(logger.engine().level(), LogLevel::Debug);
        assert_eq!(logger.engine().caller_skip(), 0);
    }

    #[test]
    fn test_new_without_skip() {
        let logger = Logger::new(Configuration::new()).unwrap();
        assert_eq!(logger.engine().caller_skip(), 0);
        assert_eq!(logger.engine().encoder_config().message_key, "msg");
    }

    #[test]
    fn test_new_with_skip() {
        let logger = Logger::new(Configuration::new().with_caller_skip(2)).unwrap();
        assert_eq!(logger.engine().caller_skip(), 2);
    }

    #[test]
    fn test_build_error_is_surfaced() {
        let result = Logger::new(Configuration::new().with_caller_key("msg"));
        assert!(result.is_err());
    }

    #[test]
    fn test_fields_are_encoded() {
        let (logger, sink) = capture(Configuration::new());
        logger.debug(
            "job done",
            vec![
                LogField::new("count", 3),
                LogField::new("tags", vec!["a", "b"]),
                LogField::new("ok", true),
            ],
        );

        let record = &sink.json_lines()[0];
        assert_eq!(record["level"], "debug");
        assert_eq!(record["count"], 3);
        assert_eq!(record["tags0"], "a");
        assert_eq!(record["tags1"], "b");
        assert_eq!(record["ok"], true);
        assert!(record.get("tags").is_none());
    }

    #[test]
    fn test_caller_is_facade_call_site() {
        let (logger, sink) = capture(Configuration::new());
        let line = line!() + 1;
        logger.info("attributed", vec![]);

        let record = &sink.json_lines()[0];
        assert_eq!(record["caller"], format!("facade/logger.rs:{}", line));
    }

    #[test]
    fn test_trait_object_dispatch() {
        let (logger, sink) = capture(Configuration::new());
        let log: &dyn Log = &logger;
        log.error("via trait", vec![LogField::new("code", FieldValue::Int(500))]);

        let record = &sink.json_lines()[0];
        assert_eq!(record["level"], "error");
        assert_eq!(record["code"], 500);
    }
}
