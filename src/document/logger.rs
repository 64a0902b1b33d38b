use std::sync::Mutex;

/// Severity of a document log message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Per-texture diagnostics (skip decisions, encoder command lines).
    Debug,
    /// Per-texture results.
    Info,
    /// Advisory conditions that do not fail a run.
    Warn,
    /// Failures about to be returned to the caller.
    Error,
}

/// Diagnostic sink attached to a [`crate::Document`].
///
/// Transforms report progress through the document's logger rather than through their return
/// values, so embedding callers can route or capture it.
pub trait Logger: Send + Sync {
    /// Emit `msg` at `level`.
    fn log(&self, level: LogLevel, msg: &str);

    /// Emit a debug message.
    fn debug(&self, msg: &str) {
        self.log(LogLevel::Debug, msg);
    }

    /// Emit an info message.
    fn info(&self, msg: &str) {
        self.log(LogLevel::Info, msg);
    }

    /// Emit a warning.
    fn warn(&self, msg: &str) {
        self.log(LogLevel::Warn, msg);
    }

    /// Emit an error message.
    fn error(&self, msg: &str) {
        self.log(LogLevel::Error, msg);
    }
}

/// Default logger: forwards every message to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, msg: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "squoosh_gltf", "{msg}"),
            LogLevel::Info => tracing::info!(target: "squoosh_gltf", "{msg}"),
            LogLevel::Warn => tracing::warn!(target: "squoosh_gltf", "{msg}"),
            LogLevel::Error => tracing::error!(target: "squoosh_gltf", "{msg}"),
        }
    }
}

/// One message recorded by [`MemoryLogger`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity.
    pub level: LogLevel,
    /// Message text.
    pub message: String,
}

/// Logger that keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    /// Create an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded messages, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Messages recorded at exactly `level`, oldest first.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, msg: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(LogEntry {
                level,
                message: msg.to_string(),
            });
    }
}
