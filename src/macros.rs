//! Logging macros for building field lists.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::{fields, info, Logger};
//!
//! let logger = Logger::try_default().unwrap();
//!
//! // Explicit field list
//! logger.info("Server started", fields!["port" => 8080, "tls" => true]);
//!
//! // Same thing through the leveled macro
//! info!(logger, "Server started", "port" => 8080, "tls" => true);
//! ```

/// Build a `Vec<LogField>` from `key => value` pairs.
///
/// Values go through `Into<FieldValue>`, so scalars, vectors of scalars and
/// `serde_json::Value`s are accepted directly.
///
/// # Examples
///
/// ```
/// use rust_log_facade::{fields, FieldValue};
///
/// let fields = fields!["user" => "ada", "roles" => vec!["admin", "ops"]];
/// assert_eq!(fields.len(), 2);
/// assert!(fields[1].value.is_sequence());
///
/// let none = fields![];
/// assert!(none.is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::LogField>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::LogField::new($key, $value)),+]
    };
}

/// Log a debug-level message with optional fields.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::Logger;
/// # let logger = Logger::try_default().unwrap();
/// use rust_log_facade::debug;
/// debug!(logger, "Cache miss");
/// debug!(logger, "Cache miss", "key" => "user:42");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.debug($msg, ::std::vec![$($crate::LogField::new($key, $value)),*])
    };
}

/// Log an info-level message with optional fields.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::Logger;
/// # let logger = Logger::try_default().unwrap();
/// use rust_log_facade::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing batch", "items" => 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.info($msg, ::std::vec![$($crate::LogField::new($key, $value)),*])
    };
}

/// Log an error-level message with optional fields.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::Logger;
/// # let logger = Logger::try_default().unwrap();
/// use rust_log_facade::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Request failed", "status" => 500, "retryable" => false);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $logger.error($msg, ::std::vec![$($crate::LogField::new($key, $value)),*])
    };
}
