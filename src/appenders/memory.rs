//! In-memory appender for capturing output

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects encoded records in memory
///
/// Clones share the same buffer, so a handle kept by the caller observes
/// everything written through the engine that owns the other clone.
///
/// # Example
///
/// ```
/// use rust_log_facade::appenders::MemoryAppender;
/// use rust_log_facade::core::Config;
///
/// let capture = MemoryAppender::new();
/// let engine = Config::production()
///     .with_output_paths(Vec::<String>::new())
///     .with_appender(Box::new(capture.clone()))
///     .build()
///     .unwrap();
///
/// engine.info("hello", Vec::new());
/// assert_eq!(capture.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured records
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Captured records parsed as JSON, skipping lines that are not JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
