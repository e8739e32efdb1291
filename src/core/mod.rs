//! Engine types: levels, fields, encoders, configuration and the engine itself

pub mod appender;
pub mod caller;
pub mod config;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod field;
pub mod log_entry;
pub mod log_level;
pub mod metrics;
pub mod timestamp;

pub use appender::Appender;
pub use caller::Caller;
pub use config::{Config, STDERR_PATH, STDOUT_PATH};
pub use encoder::{EncoderConfig, Encoding, LevelEncoding};
pub use engine::Engine;
pub use error::{LoggerError, Result};
pub use field::{Field, FieldKind};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
