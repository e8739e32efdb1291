//! Appender trait for log output destinations

use super::error::Result;

/// Destination for encoded records
///
/// `append` receives one fully encoded record without its trailing newline.
pub trait Appender: Send + Sync {
    fn append(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
