//! Logging sinks for debug notifications.
//!
//! # Data Flow
//! ```text
//! operator handler (next / error / complete)
//!     → DebugLogger::log / DebugLogger::error
//!     → sink implementation:
//!         - console.rs (stdout / stderr, the process default)
//!         - trace_sink.rs (tracing events under `stream_debug`)
//!         - memory.rs (recorded calls, for assertions)
//! ```
//!
//! # Design Decisions
//! - Two mandatory operations (`log`, `error`); `warn`, `info` and `debug`
//!   fall back to them unless a sink cares about the distinction
//! - Arguments are forwarded in call order, never reformatted per level
//! - Sinks are shared behind `Arc` and must be `Send + Sync`

pub mod console;
pub mod memory;
pub mod trace_sink;

use std::fmt;
use std::sync::Arc;

pub use console::{default_logger, ConsoleLogger, ConsoleTarget};
pub use memory::{LogLevel, LogRecord, MemoryLogger};
pub use trace_sink::TracingLogger;

/// A single argument of a logging call.
#[derive(Debug, Clone, Copy)]
pub enum LogArg<'a> {
    /// Text written verbatim (labels, completion messages).
    Text(&'a str),
    /// A stream value or error, rendered through its `Debug` impl.
    Value(&'a dyn fmt::Debug),
}

impl fmt::Display for LogArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogArg::Text(text) => f.write_str(text),
            LogArg::Value(value) => write!(f, "{:?}", value),
        }
    }
}

/// Capability used by the debug operator to report notifications.
pub trait DebugLogger: Send + Sync {
    /// Record a value or completion notification.
    fn log(&self, args: &[LogArg<'_>]);

    /// Record an error notification.
    fn error(&self, args: &[LogArg<'_>]);

    fn warn(&self, args: &[LogArg<'_>]) {
        self.error(args)
    }

    fn info(&self, args: &[LogArg<'_>]) {
        self.log(args)
    }

    fn debug(&self, args: &[LogArg<'_>]) {
        self.log(args)
    }
}

/// Logger handle shared between the global store and every operator.
pub type SharedLogger = Arc<dyn DebugLogger>;

/// Render arguments in order, separated by a single space.
pub fn render_args(args: &[LogArg<'_>]) -> String {
    let mut line = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(&arg.to_string());
    }
    line
}
