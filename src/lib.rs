//! Debug taps for async streams.
//!
//! A [`debug`] operator observes the values, errors and completion of a
//! stream and reports them to a configurable logger, optionally labelled and
//! optionally suppressed, without altering the stream itself.

pub mod config;
pub mod logger;
pub mod operator;

pub use config::{
    create_default_global_debug_config, reset_global_debug_config, set_global_debug_config,
    DebugContext, GlobalDebugConfig, GlobalDebugConfigUpdate,
};
pub use logger::{default_logger, ConsoleLogger, DebugLogger, LogArg, SharedLogger};
pub use operator::{debug, debug_in, DebugOperator, DebugOptions, DebugOverrides, DebugStreamExt};
