//! Logger setup for binaries and tests.
//!
//! The library itself only uses the `log` macros. Two ways to see them:
//!
//! - [`init_logger`]: plain `env_logger` on stderr.
//! - [`init_capture`]: records are kept in a bounded in-memory ring instead of
//!   being printed, for programs that own the terminal (the inspector TUI).
//!   Pull them out with [`drain_captured`].
//!
//! Both honour `RUST_LOG` and default to `info`. Only the first call of either
//! installs a logger; later calls print a warning and do nothing.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

/// Messages kept by [`init_capture`] before the oldest are dropped.
pub const DEFAULT_CAPTURE_CAPACITY: usize = 256;

/// Initialize `env_logger` on stderr.
pub fn init_logger() {
    let result = env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init();
    if result.is_err() {
        eprintln!("[lathe] Warning: a logger is already set.");
    }
}

// ── Capture ─────────────────────────────────────────────────────────────

/// One captured log record.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedLog {
    pub level: log::Level,
    pub target: String,
    pub message: String,
    /// Seconds since [`init_capture`].
    pub timestamp_secs: f32,
}

struct LogRing {
    entries: VecDeque<CapturedLog>,
    capacity: usize,
}

impl LogRing {
    fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, entry: CapturedLog) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    fn drain(&mut self, max: usize) -> Vec<CapturedLog> {
        let n = max.min(self.entries.len());
        self.entries.drain(..n).collect()
    }
}

/// Uses `env_logger` for filtering only; accepted records go to the ring.
struct CaptureLogger {
    filter: env_logger::Logger,
    ring: Mutex<LogRing>,
    start: Instant,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.filter.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.filter.matches(record) {
            return;
        }
        let entry = CapturedLog {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
            timestamp_secs: self.start.elapsed().as_secs_f32(),
        };
        if let Ok(mut ring) = self.ring.lock() {
            ring.push(entry);
        }
    }

    fn flush(&self) {}
}

static CAPTURE_LOGGER: OnceLock<CaptureLogger> = OnceLock::new();

/// Install a logger that keeps the last `capacity` records in memory.
pub fn init_capture(capacity: usize) {
    let filter = env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .build();
    let max_level = filter.filter();

    let logger = CAPTURE_LOGGER.get_or_init(|| CaptureLogger {
        filter,
        ring: Mutex::new(LogRing::new(capacity.max(1))),
        start: Instant::now(),
    });

    if log::set_logger(logger).is_err() {
        eprintln!("[lathe] Warning: a logger is already set. Log capture disabled.");
        return;
    }
    log::set_max_level(max_level);
}

/// Remove and return up to `max` of the oldest captured records.
///
/// Empty if [`init_capture`] was never called.
pub fn drain_captured(max: usize) -> Vec<CapturedLog> {
    let Some(logger) = CAPTURE_LOGGER.get() else {
        return Vec::new();
    };
    match logger.ring.lock() {
        Ok(mut ring) => ring.drain(max),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> CapturedLog {
        CapturedLog {
            level: log::Level::Info,
            target: "lathe".to_string(),
            message: message.to_string(),
            timestamp_secs: 0.0,
        }
    }

    #[test]
    fn ring_drops_oldest_when_full() {
        let mut ring = LogRing::new(2);
        ring.push(entry("a"));
        ring.push(entry("b"));
        ring.push(entry("c"));
        let drained: Vec<String> = ring.drain(10).into_iter().map(|e| e.message).collect();
        assert_eq!(drained, vec!["b", "c"]);
    }

    #[test]
    fn drain_takes_oldest_first_and_leaves_the_rest() {
        let mut ring = LogRing::new(8);
        for m in ["a", "b", "c"] {
            ring.push(entry(m));
        }
        assert_eq!(ring.drain(2).len(), 2);
        assert_eq!(ring.drain(2)[0].message, "c");
        assert!(ring.drain(2).is_empty());
    }

    #[test]
    fn init_logger_twice_does_not_panic() {
        init_logger();
        init_logger();
    }
}
