//! Integration tests for the logging facade
//!
//! These tests verify:
//! - Field encoding end to end, including sequence expansion
//! - Sparse key overrides over the production preset
//! - Caller attribution with and without caller skip
//! - Development and production construction paths
//! - Panic and fatal termination behaviour
//! - Substituting the facade with a test double

use rust_log_facade::appenders::MemoryAppender;
use rust_log_facade::core::{Config, LogLevel};
use rust_log_facade::{fields, Configuration, Log, LogField, Logger, LoggerError};
use parking_lot::Mutex;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn capture(config: Configuration) -> (Logger, MemoryAppender) {
    let sink = MemoryAppender::new();
    let base = Config::production()
        .with_output_paths(Vec::<String>::new())
        .with_appender(Box::new(sink.clone()));
    let logger = Logger::build(base, config).expect("Failed to build logger");
    (logger, sink)
}

/// Logs from a fixed place and returns the line of its `info` call
#[inline(never)]
fn log_through_helper(logger: &Logger) -> u32 {
    let line = line!() + 1;
    logger.info("through helper", vec![]);
    line
}

#[test]
fn test_scenario_field_sequence() {
    let (logger, sink) = capture(Configuration::new());
    logger.info(
        "batch",
        vec![
            LogField::new("count", 3),
            LogField::new("tags", vec!["a", "b"]),
            LogField::new("ok", true),
        ],
    );

    let line = &sink.lines()[0];
    let record: serde_json::Value = serde_json::from_str(line).expect("valid JSON");
    assert_eq!(record["count"], 3);
    assert_eq!(record["tags0"], "a");
    assert_eq!(record["tags1"], "b");
    assert_eq!(record["ok"], true);

    // Fields follow the message, in input order
    let positions: Vec<usize> = ["\"msg\"", "\"count\"", "\"tags0\"", "\"tags1\"", "\"ok\""]
        .iter()
        .map(|key| line.find(key).expect("key present"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_message_key_override() {
    let (logger, sink) = capture(Configuration::new().with_message_key("message"));
    logger.info("renamed", vec![]);

    let record = &sink.json_lines()[0];
    assert_eq!(record["message"], "renamed");
    assert!(record.get("msg").is_none());
}

#[test]
fn test_new_with_message_key_msg() {
    let (logger, sink) = capture(Configuration::new().with_message_key("msg"));
    logger.info("hello", vec![]);
    assert_eq!(sink.json_lines()[0]["msg"], "hello");
}

#[test]
fn test_json_message_keeps_line_breaks() {
    let (logger, sink) = capture(Configuration::new());
    logger.info("line one\nline two\ttab", vec![]);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(!lines[0].contains('\n'));
    assert_eq!(sink.json_lines()[0]["msg"], "line one\nline two\ttab");
}

#[test]
fn test_collection_lengths_as_fields() {
    let (logger, sink) = capture(Configuration::new());
    let items = vec!["a", "b", "c"];
    let sizes: Vec<usize> = vec![10, 20];
    logger.info("batch", fields!["n" => items.len(), "sizes" => sizes, "big" => u64::MAX]);

    let record = &sink.json_lines()[0];
    assert_eq!(record["n"], 3);
    assert_eq!(record["sizes0"], 10);
    assert_eq!(record["sizes1"], 20);
    assert_eq!(record["big"], u64::MAX);
}

#[test]
fn test_all_key_overrides_in_output() {
    let config = Configuration::new()
        .with_level_key("severity")
        .with_timestamp_key("time")
        .with_caller_key("source")
        .with_function_key("func")
        .with_name_key("component")
        .with_stack_trace_key("trace");
    let sink = MemoryAppender::new();
    let base = Config::production()
        .with_name("billing")
        .with_output_paths(Vec::<String>::new())
        .with_appender(Box::new(sink.clone()));
    let logger = Logger::build(base, config).expect("Failed to build logger");

    logger.error("charge failed", vec![]);

    let record = &sink.json_lines()[0];
    assert_eq!(record["severity"], "error");
    assert!(record["time"].is_number());
    assert!(record["source"].as_str().unwrap().contains("integration_tests.rs"));
    assert!(record["func"].is_string());
    assert_eq!(record["component"], "billing");
    assert!(record["trace"].is_string());
    for default_key in ["level", "ts", "caller", "logger", "stacktrace"] {
        assert!(record.get(default_key).is_none(), "{} still present", default_key);
    }
}

#[test]
fn test_duplicate_override_fails_construction() {
    let result = Logger::new(Configuration::new().with_level_key("ts"));
    match result {
        Err(LoggerError::InvalidConfiguration { message, .. }) => assert!(message.contains("'ts'")),
        other => panic!("expected invalid configuration, got {:?}", other),
    }
}

#[test]
fn test_unopenable_output_fails_construction() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("missing").join("app.log");
    let base = Config::production().with_output_paths([missing.to_string_lossy().to_string()]);

    let result = Logger::build(base, Configuration::new());
    assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
}

#[test]
fn test_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("facade.log");
    let base = Config::production().with_output_paths([log_file.to_string_lossy().to_string()]);

    let logger = Logger::build(base, Configuration::new()).expect("Failed to build logger");
    for i in 0..5 {
        logger.info("tick", fields!["i" => i]);
    }
    logger.sync().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    for (i, line) in lines.iter().enumerate() {
        let record: serde_json::Value = serde_json::from_str(line).expect("valid JSON");
        assert_eq!(record["i"], i as i64);
    }
}

#[test]
fn test_caller_without_skip() {
    let (logger, sink) = capture(Configuration::new());
    let expected = line!() + 1;
    logger.info("direct", vec![]);

    let caller = sink.json_lines()[0]["caller"].as_str().unwrap().to_string();
    assert!(caller.ends_with(&format!("integration_tests.rs:{}", expected)), "{}", caller);
}

#[test]
fn test_caller_skip_zero_reports_helper() {
    let (logger, sink) = capture(Configuration::new());
    let helper_line = log_through_helper(&logger);

    let caller = sink.json_lines()[0]["caller"].as_str().unwrap().to_string();
    assert!(caller.ends_with(&format!("integration_tests.rs:{}", helper_line)), "{}", caller);
}

#[test]
fn test_caller_skip_one_reports_outer_frame() {
    let (logger, sink) = capture(Configuration::new().with_caller_skip(1));
    assert_eq!(logger.engine().caller_skip(), 1);

    let expected = line!() + 1;
    let helper_line = log_through_helper(&logger);

    let caller = sink.json_lines()[0]["caller"].as_str().unwrap().to_string();
    assert!(caller.ends_with(&format!("integration_tests.rs:{}", expected)), "{}", caller);
    assert_ne!(expected, helper_line);
}

#[test]
fn test_default_twice_gives_independent_instances() {
    let first = Logger::try_default().expect("development preset builds");
    let second = Logger::try_default().expect("development preset builds");

    first.debug("first", vec![]);
    second.info("second", vec![]);

    assert_eq!(first.engine().metrics().written_count(), 1);
    assert_eq!(second.engine().metrics().written_count(), 1);
}

#[test]
fn test_development_console_output() {
    let sink = MemoryAppender::new();
    let engine = Config::development()
        .with_output_paths(Vec::<String>::new())
        .with_appender(Box::new(sink.clone()))
        .build()
        .expect("Failed to build engine");
    let logger = Logger::from_engine(engine);

    logger.debug("listening", fields!["port" => 8080]);

    let line = &sink.lines()[0];
    let parts: Vec<&str> = line.split('\t').collect();
    assert_eq!(parts[1], "DEBUG");
    assert!(parts[2].contains("integration_tests.rs:"), "{}", parts[2]);
    assert_eq!(parts[3], "listening");
    assert_eq!(parts[4], r#"{"port":8080}"#);
}

#[test]
fn test_disabled_level_writes_nothing() {
    let sink = MemoryAppender::new();
    let base = Config::production()
        .with_level(LogLevel::Error)
        .with_output_paths(Vec::<String>::new())
        .with_appender(Box::new(sink.clone()));
    let logger = Logger::build(base, Configuration::new()).expect("Failed to build logger");

    logger.debug("quiet", vec![]);
    logger.info("quiet", vec![]);
    logger.error("loud", vec![]);

    assert_eq!(sink.len(), 1);
    assert_eq!(logger.engine().metrics().filtered_count(), 2);
}

#[test]
fn test_panic_writes_then_unwinds() {
    let (logger, sink) = capture(Configuration::new());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        logger.panic("invariant broken", fields!["shard" => 4]);
    }));

    let payload = result.expect_err("panic must unwind");
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert_eq!(message, "invariant broken");

    let record = &sink.json_lines()[0];
    assert_eq!(record["level"], "panic");
    assert_eq!(record["shard"], 4);
    assert!(record["stacktrace"].is_string());
}

#[test]
#[should_panic(expected = "boom")]
fn test_panic_message_propagates() {
    let (logger, _sink) = capture(Configuration::new());
    logger.panic("boom", vec![]);
}

const FATAL_CHILD_ENV: &str = "RUST_LOG_FACADE_FATAL_CHILD";

#[test]
fn test_fatal_exits_process() {
    if std::env::var_os(FATAL_CHILD_ENV).is_some() {
        let logger = Logger::new(Configuration::new()).expect("Failed to build logger");
        logger.fatal("cannot continue", fields!["reason" => "disk gone"]);
    }

    let exe = std::env::current_exe().expect("test binary path");
    let output = Command::new(exe)
        .args(["test_fatal_exits_process", "--exact", "--nocapture", "--test-threads=1"])
        .env(FATAL_CHILD_ENV, "1")
        .output()
        .expect("Failed to spawn child");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let record = stderr
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .find(|value| value["msg"] == "cannot continue")
        .expect("fatal record on stderr");
    assert_eq!(record["level"], "fatal");
    assert_eq!(record["reason"], "disk gone");
}

/// Records calls instead of writing them
#[derive(Default)]
struct RecordingLog {
    calls: Mutex<Vec<(&'static str, String, Vec<LogField>)>>,
}

impl Log for RecordingLog {
    fn debug(&self, msg: &str, fields: Vec<LogField>) {
        self.calls.lock().push(("debug", msg.to_string(), fields));
    }

    fn info(&self, msg: &str, fields: Vec<LogField>) {
        self.calls.lock().push(("info", msg.to_string(), fields));
    }

    fn error(&self, msg: &str, fields: Vec<LogField>) {
        self.calls.lock().push(("error", msg.to_string(), fields));
    }

    fn panic(&self, msg: &str, _fields: Vec<LogField>) -> ! {
        panic!("{}", msg)
    }

    fn fatal(&self, msg: &str, _fields: Vec<LogField>) -> ! {
        panic!("fatal: {}", msg)
    }
}

fn handle_request(log: &dyn Log, user: &str) {
    log.info("request", fields!["user" => user, "scopes" => vec!["read", "write"]]);
    log.error("denied", fields!["user" => user]);
}

#[test]
fn test_capability_set_accepts_test_double() {
    let double = RecordingLog::default();
    handle_request(&double, "ada");

    let calls = double.calls.lock();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "info");
    assert_eq!(calls[0].2[1], LogField::new("scopes", vec!["read", "write"]));
    assert_eq!(calls[1].1, "denied");

    let (logger, sink) = capture(Configuration::new());
    handle_request(&logger, "ada");
    let records = sink.json_lines();
    assert_eq!(records[0]["scopes1"], "write");
    assert_eq!(records[1]["msg"], "denied");
}
