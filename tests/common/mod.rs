//! Shared utilities for integration tests.

use std::sync::Arc;

use stream_debug::logger::MemoryLogger;
use stream_debug::{reset_global_debug_config, set_global_debug_config, GlobalDebugConfigUpdate};

/// Reset the process-wide store and install a recording logger.
pub fn install_memory_logger() -> Arc<MemoryLogger> {
    reset_global_debug_config();
    let logger = MemoryLogger::new();
    set_global_debug_config(GlobalDebugConfigUpdate::new().logger(logger.clone()));
    logger
}

/// Build an expected argument list.
#[allow(dead_code)]
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
