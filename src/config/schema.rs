//! Settings file schema.
//!
//! Settings describe the process-wide debug defaults in a form that can be
//! deserialized from TOML. All fields have defaults so an empty file is valid.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::global::GlobalDebugConfigUpdate;
use crate::logger::{default_logger, SharedLogger, TracingLogger};

/// Root settings for debug operators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Label prefix applied to every operator.
    pub prefix: Option<String>,

    /// Disable every operator that does not override the flag.
    pub should_ignore: bool,

    /// Where default handlers write.
    pub sink: SinkKind,
}

impl DebugSettings {
    /// Convert into a full update of the global store.
    ///
    /// Every field is set, so applying settings also clears a prefix that
    /// the file no longer names.
    pub fn into_update(self) -> GlobalDebugConfigUpdate {
        GlobalDebugConfigUpdate {
            logger: Some(self.sink.logger()),
            prefix: Some(self.prefix),
            should_ignore: Some(self.should_ignore),
        }
    }
}

/// Logger backend selected by settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// stdout / stderr.
    #[default]
    Console,
    /// `tracing` events under the `stream_debug` target.
    Tracing,
}

impl SinkKind {
    pub fn logger(self) -> SharedLogger {
        match self {
            SinkKind::Console => default_logger(),
            SinkKind::Tracing => Arc::new(TracingLogger::new()),
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Console => f.write_str("console"),
            SinkKind::Tracing => f.write_str("tracing"),
        }
    }
}

impl FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(SinkKind::Console),
            "tracing" => Ok(SinkKind::Tracing),
            other => Err(format!("unknown sink '{}', expected 'console' or 'tracing'", other)),
        }
    }
}
