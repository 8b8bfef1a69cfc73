//! Logger that forwards notifications as `tracing` events.
//!
//! Lets debug output flow through whatever subscriber the application has
//! installed instead of writing to the console directly.

use crate::logger::{render_args, DebugLogger, LogArg};

/// `tracing` backed logger. Events are emitted under the `stream_debug` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl DebugLogger for TracingLogger {
    fn log(&self, args: &[LogArg<'_>]) {
        tracing::info!(target: "stream_debug", "{}", render_args(args));
    }

    fn error(&self, args: &[LogArg<'_>]) {
        tracing::error!(target: "stream_debug", "{}", render_args(args));
    }

    fn warn(&self, args: &[LogArg<'_>]) {
        tracing::warn!(target: "stream_debug", "{}", render_args(args));
    }

    fn info(&self, args: &[LogArg<'_>]) {
        tracing::info!(target: "stream_debug", "{}", render_args(args));
    }

    fn debug(&self, args: &[LogArg<'_>]) {
        tracing::debug!(target: "stream_debug", "{}", render_args(args));
    }
}
