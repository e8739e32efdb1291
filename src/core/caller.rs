//! Call-site attribution
//!
//! Emit methods on [`Engine`](super::Engine) are `#[track_caller]`, so the
//! compiler hands us the first call site outside the logging layers. A
//! non-zero caller skip walks further out from that site using a captured
//! backtrace. When the backtrace carries no file/line information (stripped
//! binaries) the tracked call site is used as-is.

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};

static UNRESOLVED_SKIP_REPORTED: AtomicBool = AtomicBool::new(false);

/// Source location a record is attributed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub file: String,
    pub line: u32,
    pub function: Option<String>,
}

impl Caller {
    /// Resolve the caller `skip` frames above `location`
    ///
    /// The function name is only known from a backtrace, so it is looked up
    /// when `want_function` is set even if `skip` is zero. Walking frames
    /// needs line tables in the binary (`debug = "line-tables-only"` or
    /// more); without them the tracked location is used and a non-zero skip
    /// is reported once on stderr.
    pub fn resolve(location: &'static Location<'static>, skip: usize, want_function: bool) -> Self {
        if skip == 0 && !want_function {
            return Self::from_location(location);
        }

        let trace = Backtrace::force_capture().to_string();
        match Self::from_trace(&trace, location, skip) {
            Some(caller) => caller,
            None => {
                if skip > 0 {
                    report_unresolved_skip(&UNRESOLVED_SKIP_REPORTED, skip);
                }
                Self::from_location(location)
            }
        }
    }

    /// The frame `skip` levels above the one at `location` in a rendered trace
    pub(crate) fn from_trace(trace: &str, location: &Location<'_>, skip: usize) -> Option<Self> {
        let frames = parse_frames(trace);
        let frame = locate(&frames, location).and_then(|idx| frames.get(idx + skip))?;
        match (&frame.file, frame.line) {
            (Some(file), Some(line)) => Some(Self {
                file: file.clone(),
                line,
                function: Some(frame.symbol.clone()),
            }),
            _ => None,
        }
    }

    pub fn from_location(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
            function: None,
        }
    }

    /// `dir/file.rs:line`, keeping only the last two path components
    pub fn short(&self) -> String {
        let normalized = self.file.replace('\\', "/");
        let mut parts = normalized.rsplitn(3, '/');
        let file = parts.next().unwrap_or_default();
        match parts.next() {
            Some(dir) if !dir.is_empty() => format!("{}/{}:{}", dir, file, self.line),
            _ => format!("{}:{}", file, self.line),
        }
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
    pub symbol: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

/// Parse the rendered form of a captured backtrace
///
/// Symbol lines look like `  12: crate::module::function` (inlined frames
/// omit the index), location lines like `at /path/to/file.rs:42:9`.
pub(crate) fn parse_frames(trace: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();
    for raw in trace.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                let (file, line_no) = split_location(location);
                frame.file = Some(file);
                frame.line = line_no;
            }
            continue;
        }
        let symbol = match line.split_once(": ") {
            Some((index, rest)) if index.chars().all(|c| c.is_ascii_digit()) => rest,
            _ => line,
        };
        frames.push(Frame {
            symbol: strip_hash(symbol).to_string(),
            file: None,
            line: None,
        });
    }
    frames
}

fn split_location(location: &str) -> (String, Option<u32>) {
    // file:line:column, where the file itself may contain ':' (Windows drives)
    let mut parts = location.rsplitn(3, ':');
    let column = parts.next();
    let line = parts.next();
    let file = parts.next();
    match (file, line, column) {
        (Some(file), Some(line), Some(_)) => (file.to_string(), line.parse().ok()),
        _ => (location.to_string(), None),
    }
}

/// Drop the trailing `::h0123456789abcdef` disambiguator of mangled symbols
fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.chars().all(|c| c.is_ascii_hexdigit()) => {
            head
        }
        _ => symbol,
    }
}

/// Print the unresolved-skip diagnostic unless `reported` is already set
fn report_unresolved_skip(reported: &AtomicBool, skip: usize) -> bool {
    if reported.swap(true, Ordering::Relaxed) {
        return false;
    }
    eprintln!(
        "[LOGGER ERROR] Caller skip of {} ignored: backtrace has no line tables, \
         records are attributed to the direct call site",
        skip
    );
    true
}

fn locate(frames: &[Frame], location: &Location<'_>) -> Option<usize> {
    let wanted = location.file().replace('\\', "/");
    frames.iter().position(|frame| {
        frame.line == Some(location.line())
            && frame
                .file
                .as_ref()
                .is_some_and(|file| file.replace('\\', "/").ends_with(&wanted))
    })
}
