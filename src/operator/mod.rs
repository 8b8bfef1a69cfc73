//! The debug operator.
//!
//! # Data Flow
//! ```text
//! debug(options)
//!     → snapshot of the DebugContext store (logger, prefix, should_ignore)
//!     → label-aware defaults (build_defaults)
//!     → caller overrides merged on top, field by field
//!     → DebugOperator (reusable)
//!
//! operator.apply(source) / operator.apply_try(source)
//!     → stream.rs adapter: next / error / complete taps, items passed through
//! ```
//!
//! # Design Decisions
//! - Defaults are recomputed on every factory call, never cached
//! - Label logic runs before overrides are applied
//! - An ignored operator wraps the source without any handlers

pub mod stream;

use std::fmt;
use std::sync::Arc;

use crate::config::{DebugContext, GlobalDebugConfig};
use crate::logger::{LogArg, SharedLogger};

pub use stream::{DebugStreamExt, Debugged, TryDebugged};

/// Called with every value the source emits.
pub type NextHandler<T> = Arc<dyn Fn(&T) + Send + Sync>;
/// Called with every error the source emits.
pub type ErrorHandler<E> = Arc<dyn Fn(&E) + Send + Sync>;
/// Called once when the source ends.
pub type CompleteHandler = Arc<dyn Fn() + Send + Sync>;

/// Fully resolved configuration of one operator.
pub struct DebugOperatorConfig<T, E> {
    pub should_ignore: bool,
    /// Effective label, or the label override when one was given.
    pub label: Option<String>,
    pub next: NextHandler<T>,
    pub error: ErrorHandler<E>,
    pub complete: CompleteHandler,
}

impl<T, E> Clone for DebugOperatorConfig<T, E> {
    fn clone(&self) -> Self {
        Self {
            should_ignore: self.should_ignore,
            label: self.label.clone(),
            next: self.next.clone(),
            error: self.error.clone(),
            complete: self.complete.clone(),
        }
    }
}

impl<T, E> fmt::Debug for DebugOperatorConfig<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugOperatorConfig")
            .field("should_ignore", &self.should_ignore)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Caller-supplied partial configuration. Every field that is set wins over
/// the computed default.
pub struct DebugOverrides<T, E> {
    pub should_ignore: Option<bool>,
    pub label: Option<String>,
    pub next: Option<NextHandler<T>>,
    pub error: Option<ErrorHandler<E>>,
    pub complete: Option<CompleteHandler>,
}

impl<T, E> Default for DebugOverrides<T, E> {
    fn default() -> Self {
        Self {
            should_ignore: None,
            label: None,
            next: None,
            error: None,
            complete: None,
        }
    }
}

impl<T, E> DebugOverrides<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_ignore(mut self, should_ignore: bool) -> Self {
        self.should_ignore = Some(should_ignore);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn next<F>(mut self, next: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.next = Some(Arc::new(next));
        self
    }

    pub fn error<F>(mut self, error: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(error));
        self
    }

    pub fn complete<F>(mut self, complete: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.complete = Some(Arc::new(complete));
        self
    }

    /// Overlay these overrides on `defaults`.
    pub fn merged_over(self, defaults: DebugOperatorConfig<T, E>) -> DebugOperatorConfig<T, E> {
        DebugOperatorConfig {
            should_ignore: self.should_ignore.unwrap_or(defaults.should_ignore),
            label: self.label.or(defaults.label),
            next: self.next.unwrap_or(defaults.next),
            error: self.error.unwrap_or(defaults.error),
            complete: self.complete.unwrap_or(defaults.complete),
        }
    }
}

impl<T, E> fmt::Debug for DebugOverrides<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugOverrides")
            .field("should_ignore", &self.should_ignore)
            .field("label", &self.label)
            .field("next", &self.next.is_some())
            .field("error", &self.error.is_some())
            .field("complete", &self.complete.is_some())
            .finish()
    }
}

/// Builds overrides from the logger that is current when the operator is constructed.
pub type OverridesFn<T, E> = Box<dyn FnOnce(&SharedLogger) -> DebugOverrides<T, E> + Send>;

/// What a caller can pass to [`debug`].
pub enum DebugOptions<T, E> {
    /// Use every default.
    Defaults,
    /// Use the defaults for this label.
    Label(String),
    /// Defaults for `overrides.label`, then the overrides on top.
    Overrides(DebugOverrides<T, E>),
    /// Unlabeled defaults, then whatever the closure returns on top.
    FromLogger(OverridesFn<T, E>),
}

impl<T, E> DebugOptions<T, E> {
    pub fn from_logger<F>(f: F) -> Self
    where
        F: FnOnce(&SharedLogger) -> DebugOverrides<T, E> + Send + 'static,
    {
        DebugOptions::FromLogger(Box::new(f))
    }
}

impl<T, E> Default for DebugOptions<T, E> {
    fn default() -> Self {
        DebugOptions::Defaults
    }
}

impl<T, E> From<&str> for DebugOptions<T, E> {
    fn from(label: &str) -> Self {
        DebugOptions::Label(label.to_string())
    }
}

impl<T, E> From<String> for DebugOptions<T, E> {
    fn from(label: String) -> Self {
        DebugOptions::Label(label)
    }
}

impl<T, E> From<DebugOverrides<T, E>> for DebugOptions<T, E> {
    fn from(overrides: DebugOverrides<T, E>) -> Self {
        DebugOptions::Overrides(overrides)
    }
}

impl<T, E> fmt::Debug for DebugOptions<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugOptions::Defaults => f.write_str("Defaults"),
            DebugOptions::Label(label) => f.debug_tuple("Label").field(label).finish(),
            DebugOptions::Overrides(overrides) => f.debug_tuple("Overrides").field(overrides).finish(),
            DebugOptions::FromLogger(_) => f.write_str("FromLogger(..)"),
        }
    }
}

/// Combine the global prefix with a local label.
///
/// Empty strings count as absent.
pub fn effective_label(prefix: Option<&str>, label: Option<&str>) -> Option<String> {
    let prefix = prefix.filter(|p| !p.is_empty());
    let label = label.filter(|l| !l.is_empty());

    match (prefix, label) {
        (Some(prefix), Some(label)) => Some(format!("{} {}", prefix, label)),
        (Some(prefix), None) => Some(prefix.to_string()),
        (None, Some(label)) => Some(label.to_string()),
        (None, None) => None,
    }
}

fn build_defaults<T, E>(global: &GlobalDebugConfig, label: Option<&str>) -> DebugOperatorConfig<T, E>
where
    T: fmt::Debug + 'static,
    E: fmt::Debug + 'static,
{
    let label = effective_label(global.prefix.as_deref(), label);

    let next: NextHandler<T> = {
        let logger = global.logger.clone();
        match label.clone() {
            Some(label) => Arc::new(move |value: &T| {
                logger.log(&[LogArg::Text(&label), LogArg::Value(value)])
            }),
            None => Arc::new(move |value: &T| logger.log(&[LogArg::Value(value)])),
        }
    };

    let error: ErrorHandler<E> = {
        let logger = global.logger.clone();
        match label.clone() {
            Some(label) => Arc::new(move |err: &E| {
                logger.error(&[LogArg::Text(&label), LogArg::Value(err)])
            }),
            None => Arc::new(move |err: &E| logger.error(&[LogArg::Value(err)])),
        }
    };

    let complete: CompleteHandler = match &label {
        Some(label) => {
            let logger = global.logger.clone();
            let message = format!("{} completed", label);
            Arc::new(move || logger.log(&[LogArg::Text(&message)]))
        }
        None => Arc::new(|| {}),
    };

    DebugOperatorConfig {
        should_ignore: global.should_ignore,
        label,
        next,
        error,
        complete,
    }
}

/// Default configuration for `label` against the process-wide store.
pub fn create_default_config<T, E>(label: Option<&str>) -> DebugOperatorConfig<T, E>
where
    T: fmt::Debug + 'static,
    E: fmt::Debug + 'static,
{
    create_default_config_in(DebugContext::global(), label)
}

/// Default configuration for `label` against `context`.
pub fn create_default_config_in<T, E>(
    context: &DebugContext,
    label: Option<&str>,
) -> DebugOperatorConfig<T, E>
where
    T: fmt::Debug + 'static,
    E: fmt::Debug + 'static,
{
    build_defaults(&context.snapshot(), label)
}

/// Build a debug operator from the process-wide defaults.
///
/// ```
/// use futures_util::{stream, StreamExt};
/// use stream_debug::operator::debug;
///
/// let operator = debug::<u32, std::io::Error>("numbers");
/// let source = stream::iter(vec![Ok(1), Ok(2), Ok(3)]);
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let values: Vec<Result<u32, std::io::Error>> =
///     runtime.block_on(operator.apply_try(source).collect());
/// assert_eq!(values.len(), 3);
/// ```
pub fn debug<T, E>(options: impl Into<DebugOptions<T, E>>) -> DebugOperator<T, E>
where
    T: fmt::Debug + 'static,
    E: fmt::Debug + 'static,
{
    debug_in(DebugContext::global(), options)
}

/// Build a debug operator from the defaults held by `context`.
pub fn debug_in<T, E>(context: &DebugContext, options: impl Into<DebugOptions<T, E>>) -> DebugOperator<T, E>
where
    T: fmt::Debug + 'static,
    E: fmt::Debug + 'static,
{
    let global = context.snapshot();

    let config = match options.into() {
        DebugOptions::Defaults => build_defaults(&global, None),
        DebugOptions::Label(label) => build_defaults(&global, Some(&label)),
        DebugOptions::Overrides(overrides) => {
            let defaults = build_defaults(&global, overrides.label.as_deref());
            overrides.merged_over(defaults)
        }
        DebugOptions::FromLogger(f) => {
            let defaults = build_defaults(&global, None);
            f(&global.logger).merged_over(defaults)
        }
    };

    tracing::trace!(
        label = ?config.label,
        should_ignore = config.should_ignore,
        "Debug operator resolved"
    );

    DebugOperator { config }
}

/// A reusable stream transformer produced by [`debug`].
pub struct DebugOperator<T, E> {
    config: DebugOperatorConfig<T, E>,
}

impl<T, E> DebugOperator<T, E> {
    pub fn config(&self) -> &DebugOperatorConfig<T, E> {
        &self.config
    }

    pub fn is_ignored(&self) -> bool {
        self.config.should_ignore
    }

    /// Tap a stream of plain values. The error handler is never called.
    pub fn apply<S>(&self, source: S) -> Debugged<S, T, E>
    where
        S: futures_util::Stream<Item = T>,
    {
        Debugged::new(source, self.taps())
    }

    /// Tap a stream of `Result`s: `Ok` goes to `next`, `Err` goes to `error`.
    pub fn apply_try<S>(&self, source: S) -> TryDebugged<S, T, E>
    where
        S: futures_util::Stream<Item = Result<T, E>>,
    {
        TryDebugged::new(source, self.taps())
    }

    fn taps(&self) -> Option<stream::Taps<T, E>> {
        if self.config.should_ignore {
            None
        } else {
            Some(stream::Taps::new(&self.config))
        }
    }
}

impl<T, E> Clone for DebugOperator<T, E> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
        }
    }
}

impl<T, E> fmt::Debug for DebugOperator<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugOperator")
            .field("config", &self.config)
            .finish()
    }
}
