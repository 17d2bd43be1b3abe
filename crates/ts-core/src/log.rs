//! Injected log sinks.
//!
//! Simulation crates never log through process-wide state directly.  They
//! receive an `Arc<dyn LogSink>` and call [`LogSink::emit`]; the application
//! decides where the lines go.
//!
//! | Sink            | Destination                                         |
//! |-----------------|-----------------------------------------------------|
//! | [`TracingSink`] | `tracing` events (install a subscriber in `main`)   |
//! | [`MemorySink`]  | an in-memory `Vec<LogLine>`, for tests              |
//! | [`NullSink`]    | nowhere                                             |

use std::fmt;
use std::sync::Mutex;

/// Severity of a log line.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Debug => "DEBUG",
            Level::Info  => "INFO",
            Level::Warn  => "WARN",
            Level::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Destination for simulation log lines.
pub trait LogSink: Send + Sync {
    /// Record one message at `level`.
    fn emit(&self, level: Level, message: &str);

    /// Whether a message at `level` would be kept.
    ///
    /// Callers use this to skip formatting per-record debug lines.  Default:
    /// everything is kept.
    fn enabled(&self, _level: Level) -> bool {
        true
    }
}

// ── TracingSink ───────────────────────────────────────────────────────────────

/// Forwards every line to the matching `tracing` macro under the
/// `traffic` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, level: Level, message: &str) {
        match level {
            Level::Debug => tracing::debug!(target: "traffic", "{message}"),
            Level::Info  => tracing::info!(target: "traffic", "{message}"),
            Level::Warn  => tracing::warn!(target: "traffic", "{message}"),
            Level::Error => tracing::error!(target: "traffic", "{message}"),
        }
    }

    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Debug => tracing::enabled!(target: "traffic", tracing::Level::DEBUG),
            Level::Info  => tracing::enabled!(target: "traffic", tracing::Level::INFO),
            Level::Warn  => tracing::enabled!(target: "traffic", tracing::Level::WARN),
            Level::Error => tracing::enabled!(target: "traffic", tracing::Level::ERROR),
        }
    }
}

// ── MemorySink ────────────────────────────────────────────────────────────────

/// One captured line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level:   Level,
    pub message: String,
}

/// Captures lines in memory.  Share it as an `Arc` and inspect after a run.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<LogLine>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every captured line, in emission order.
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of captured lines at exactly `level`.
    pub fn count(&self, level: Level) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|l| l.level == level)
            .count()
    }

    /// `true` if some line at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|l| l.level == level && l.message.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl LogSink for MemorySink {
    fn emit(&self, level: Level, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(LogLine { level, message: message.to_owned() });
    }
}

// ── NullSink ──────────────────────────────────────────────────────────────────

/// Drops every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn emit(&self, _level: Level, _message: &str) {}

    fn enabled(&self, _level: Level) -> bool {
        false
    }
}
