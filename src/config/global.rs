//! Process-wide default configuration for debug operators.
//!
//! The store is read once per operator construction. Updates replace the
//! whole snapshot atomically, so an operator never observes a half-applied
//! merge and operators that were already built keep the config they resolved.

use std::fmt;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use crate::logger::{default_logger, SharedLogger};

/// Defaults shared by every debug operator.
#[derive(Clone)]
pub struct GlobalDebugConfig {
    /// Sink used by default handlers.
    pub logger: SharedLogger,

    /// Prepended to every operator label (or used as the label when none is given).
    pub prefix: Option<String>,

    /// Turn every operator without an explicit override into a passthrough.
    pub should_ignore: bool,
}

impl fmt::Debug for GlobalDebugConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalDebugConfig")
            .field("prefix", &self.prefix)
            .field("should_ignore", &self.should_ignore)
            .finish_non_exhaustive()
    }
}

impl Default for GlobalDebugConfig {
    fn default() -> Self {
        create_default_global_debug_config()
    }
}

/// Baseline configuration: console logger, no prefix, not ignored.
pub fn create_default_global_debug_config() -> GlobalDebugConfig {
    GlobalDebugConfig {
        logger: default_logger(),
        prefix: None,
        should_ignore: false,
    }
}

/// Partial update merged over the current [`GlobalDebugConfig`].
///
/// Fields left as `None` keep their current value. `prefix` is doubly
/// optional so an update can clear the prefix (`Some(None)`).
#[derive(Clone, Default)]
pub struct GlobalDebugConfigUpdate {
    pub logger: Option<SharedLogger>,
    pub prefix: Option<Option<String>>,
    pub should_ignore: Option<bool>,
}

impl GlobalDebugConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(Some(prefix.into()));
        self
    }

    pub fn clear_prefix(mut self) -> Self {
        self.prefix = Some(None);
        self
    }

    pub fn should_ignore(mut self, should_ignore: bool) -> Self {
        self.should_ignore = Some(should_ignore);
        self
    }

    /// Shallow merge: provided fields win, absent ones are copied from `base`.
    pub fn merged_over(&self, base: &GlobalDebugConfig) -> GlobalDebugConfig {
        GlobalDebugConfig {
            logger: self.logger.clone().unwrap_or_else(|| base.logger.clone()),
            prefix: match &self.prefix {
                Some(prefix) => prefix.clone(),
                None => base.prefix.clone(),
            },
            should_ignore: self.should_ignore.unwrap_or(base.should_ignore),
        }
    }
}

impl fmt::Debug for GlobalDebugConfigUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalDebugConfigUpdate")
            .field("logger", &self.logger.as_ref().map(|_| ".."))
            .field("prefix", &self.prefix)
            .field("should_ignore", &self.should_ignore)
            .finish()
    }
}

/// Owner of a [`GlobalDebugConfig`] with atomic replace-on-write.
///
/// The process-wide instance is [`DebugContext::global`]; separate contexts
/// can be created and handed to [`crate::operator::debug_in`].
pub struct DebugContext {
    config: ArcSwap<GlobalDebugConfig>,
}

impl DebugContext {
    /// Create a context holding the baseline configuration.
    pub fn new() -> Self {
        Self::with_config(create_default_global_debug_config())
    }

    pub fn with_config(config: GlobalDebugConfig) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
        }
    }

    /// The process-wide context used by [`crate::operator::debug`].
    pub fn global() -> &'static DebugContext {
        static GLOBAL: OnceLock<DebugContext> = OnceLock::new();
        GLOBAL.get_or_init(DebugContext::new)
    }

    /// Consistent snapshot of the current configuration.
    pub fn snapshot(&self) -> Arc<GlobalDebugConfig> {
        self.config.load_full()
    }

    /// Merge `update` over the current configuration.
    pub fn update(&self, update: GlobalDebugConfigUpdate) {
        let previous = self.config.rcu(|current| update.merged_over(current));
        tracing::debug!(
            previous_prefix = ?previous.prefix,
            update = ?update,
            "Debug configuration updated"
        );
    }

    /// Replace the configuration wholesale.
    pub fn replace(&self, config: GlobalDebugConfig) {
        tracing::debug!(config = ?config, "Debug configuration replaced");
        self.config.store(Arc::new(config));
    }

    /// Restore [`create_default_global_debug_config`].
    pub fn reset(&self) {
        self.replace(create_default_global_debug_config());
    }
}

impl Default for DebugContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DebugContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugContext")
            .field("config", &*self.config.load())
            .finish()
    }
}

/// Merge `update` over the process-wide configuration.
///
/// Only operators constructed afterwards see the change.
pub fn set_global_debug_config(update: GlobalDebugConfigUpdate) {
    DebugContext::global().update(update);
}

/// Snapshot of the process-wide configuration.
pub fn global_debug_config() -> Arc<GlobalDebugConfig> {
    DebugContext::global().snapshot()
}

/// Restore the process-wide configuration to its baseline.
pub fn reset_global_debug_config() {
    DebugContext::global().reset();
}
