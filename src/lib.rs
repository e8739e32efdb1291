//! # Rust Log Facade
//!
//! A small, stable structured-logging interface over a preset-driven
//! logging engine.
//!
//! ## Features
//!
//! - **Typed Fields**: integers, text, booleans, floats, their sequences and
//!   any serializable value
//! - **Sequence Expansion**: `tags = ["a", "b"]` is written as `tags0`, `tags1`
//! - **Sparse Configuration**: override only the encoder keys you care about
//! - **Two Presets**: human-readable development output, JSON for production
//!
//! ## Example
//!
//! ```
//! use rust_log_facade::prelude::*;
//!
//! let logger = Logger::new(Configuration::new().with_message_key("message"))?;
//! logger.info(
//!     "order placed",
//!     vec![
//!         LogField::int("order_id", 1042),
//!         LogField::text_seq("items", vec!["book", "lamp"]),
//!     ],
//! );
//! # Ok::<(), rust_log_facade::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod facade;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender};
    pub use crate::core::{
        Appender, Config, EncoderConfig, Encoding, Engine, Field, LogLevel, LoggerError, Result,
    };
    pub use crate::facade::{Configuration, FieldValue, Log, LogField, Logger};
}

pub use appenders::{ConsoleAppender, FileAppender, MemoryAppender};
pub use core::{
    Appender, Caller, Config, EncoderConfig, Encoding, Engine, Field, FieldKind, LevelEncoding,
    LogEntry, LogLevel, LoggerError, LoggerMetrics, Result, TimestampFormat,
};
pub use facade::{apply_config, encode_fields, Configuration, FieldValue, Log, LogField, Logger};
