//! Default logger writing to the standard output and error streams.

use std::io::{self, Write};
use std::sync::{Arc, OnceLock};

use crate::logger::{render_args, DebugLogger, LogArg, LogLevel, SharedLogger};

/// Console-backed logger.
///
/// `log`, `info` and `debug` go to stdout; `error` and `warn` go to stderr.
/// Each call becomes exactly one line with no buffering or level filtering.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

/// Standard stream a console call is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

impl ConsoleTarget {
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Log | LogLevel::Info | LogLevel::Debug => Self::Stdout,
            LogLevel::Error | LogLevel::Warn => Self::Stderr,
        }
    }
}

/// Write one rendered call followed by a newline.
pub(crate) fn write_line<W: Write>(mut writer: W, args: &[LogArg<'_>]) -> io::Result<()> {
    writeln!(writer, "{}", render_args(args))
}

/// Write one call to whichever of `stdout` / `stderr` the level routes to.
pub(crate) fn write_routed<O: Write, E: Write>(
    level: LogLevel,
    args: &[LogArg<'_>],
    stdout: O,
    stderr: E,
) -> io::Result<()> {
    match ConsoleTarget::for_level(level) {
        ConsoleTarget::Stdout => write_line(stdout, args),
        ConsoleTarget::Stderr => write_line(stderr, args),
    }
}

impl ConsoleLogger {
    fn emit(&self, level: LogLevel, args: &[LogArg<'_>]) {
        // Write failures are dropped; logging never fails a stream.
        let _ = write_routed(level, args, io::stdout(), io::stderr());
    }
}

impl DebugLogger for ConsoleLogger {
    fn log(&self, args: &[LogArg<'_>]) {
        self.emit(LogLevel::Log, args);
    }

    fn error(&self, args: &[LogArg<'_>]) {
        self.emit(LogLevel::Error, args);
    }

    fn warn(&self, args: &[LogArg<'_>]) {
        self.emit(LogLevel::Warn, args);
    }

    fn info(&self, args: &[LogArg<'_>]) {
        self.emit(LogLevel::Info, args);
    }

    fn debug(&self, args: &[LogArg<'_>]) {
        self.emit(LogLevel::Debug, args);
    }
}

/// The process-wide console logger instance.
pub fn default_logger() -> SharedLogger {
    static DEFAULT: OnceLock<SharedLogger> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(ConsoleLogger)).clone()
}
