//! In-memory logger that records every call.
//!
//! Useful for asserting on debug output in tests without touching stdout.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::logger::{DebugLogger, LogArg};

/// Which logger operation produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Log,
    Error,
    Warn,
    Info,
    Debug,
}

/// One recorded logger call, with each argument rendered to a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub args: Vec<String>,
}

impl LogRecord {
    pub fn new<I, S>(level: LogLevel, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            level,
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Logger that keeps every call in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    /// Create a new shared, empty logger.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of all recorded calls, oldest first.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Recorded calls made through `log`.
    pub fn logged(&self) -> Vec<Vec<String>> {
        self.at_level(LogLevel::Log)
    }

    /// Recorded calls made through `error`.
    pub fn errors(&self) -> Vec<Vec<String>> {
        self.at_level(LogLevel::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn at_level(&self, level: LogLevel) -> Vec<Vec<String>> {
        self.lock()
            .iter()
            .filter(|record| record.level == level)
            .map(|record| record.args.clone())
            .collect()
    }

    fn record(&self, level: LogLevel, args: &[LogArg<'_>]) {
        let rendered = args.iter().map(ToString::to_string).collect();
        self.lock().push(LogRecord {
            level,
            args: rendered,
        });
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DebugLogger for MemoryLogger {
    fn log(&self, args: &[LogArg<'_>]) {
        self.record(LogLevel::Log, args);
    }

    fn error(&self, args: &[LogArg<'_>]) {
        self.record(LogLevel::Error, args);
    }

    fn warn(&self, args: &[LogArg<'_>]) {
        self.record(LogLevel::Warn, args);
    }

    fn info(&self, args: &[LogArg<'_>]) {
        self.record(LogLevel::Info, args);
    }

    fn debug(&self, args: &[LogArg<'_>]) {
        self.record(LogLevel::Debug, args);
    }
}
