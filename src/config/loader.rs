//! Settings loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::global::DebugContext;
use crate::config::schema::DebugSettings;
use crate::config::validation::{validate_settings, ValidationError};

/// Environment variable overriding the label prefix.
pub const PREFIX_ENV: &str = "STREAM_DEBUG_PREFIX";

/// Environment variable overriding the suppression flag (`1`/`true`/`0`/`false`).
pub const IGNORE_ENV: &str = "STREAM_DEBUG_IGNORE";

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl DebugSettings {
    /// Parse and validate settings from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: DebugSettings = toml::from_str(content)?;
        validate_settings(&settings).map_err(SettingsError::Validation)?;
        Ok(settings)
    }

    /// Apply `STREAM_DEBUG_PREFIX` and `STREAM_DEBUG_IGNORE` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using an arbitrary variable lookup.
    ///
    /// Unrecognised values for the ignore flag are logged and skipped.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prefix) = lookup(PREFIX_ENV) {
            self.prefix = if prefix.is_empty() { None } else { Some(prefix) };
        }

        if let Some(raw) = lookup(IGNORE_ENV) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.should_ignore = true,
                "0" | "false" | "no" => self.should_ignore = false,
                _ => tracing::warn!(value = %raw, "Ignoring invalid {} value", IGNORE_ENV),
            }
        }

        self
    }
}

/// Load and validate settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<DebugSettings, SettingsError> {
    let content = fs::read_to_string(path)?;
    DebugSettings::from_toml_str(&content)
}

/// Push `settings` into the store held by `context`.
pub fn apply_settings(context: &DebugContext, settings: DebugSettings) {
    tracing::info!(
        prefix = ?settings.prefix,
        should_ignore = settings.should_ignore,
        sink = %settings.sink,
        "Applying debug settings"
    );
    context.update(settings.into_update());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SinkKind;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_from_toml_str() {
        let settings =
            DebugSettings::from_toml_str("prefix = \"svc\"\nshould_ignore = true\nsink = \"tracing\"")
                .unwrap();
        assert_eq!(settings.prefix.as_deref(), Some("svc"));
        assert!(settings.should_ignore);
        assert_eq!(settings.sink, SinkKind::Tracing);
    }

    #[test]
    fn test_parse_error() {
        let err = DebugSettings::from_toml_str("prefix = ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message() {
        let err = DebugSettings::from_toml_str("prefix = \"a\\nb\"").unwrap_err();
        assert!(matches!(err, SettingsError::Validation(_)));
        assert!(err.to_string().starts_with("Validation failed: prefix must not contain line breaks"));
    }

    #[test]
    fn test_env_overrides() {
        let settings = DebugSettings::default()
            .with_overrides_from(lookup(&[(PREFIX_ENV, "env"), (IGNORE_ENV, "TRUE")]));
        assert_eq!(settings.prefix.as_deref(), Some("env"));
        assert!(settings.should_ignore);
    }

    #[test]
    fn test_empty_env_prefix_clears_and_bad_flag_is_skipped() {
        let base = DebugSettings {
            prefix: Some("file".into()),
            should_ignore: true,
            sink: SinkKind::Console,
        };
        let settings = base.with_overrides_from(lookup(&[(PREFIX_ENV, ""), (IGNORE_ENV, "maybe")]));
        assert!(settings.prefix.is_none());
        assert!(settings.should_ignore);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_settings(Path::new("/nonexistent/stream-debug.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_apply_settings_updates_context() {
        let ctx = DebugContext::new();
        apply_settings(
            &ctx,
            DebugSettings {
                prefix: Some("applied".into()),
                should_ignore: false,
                sink: SinkKind::Console,
            },
        );
        assert_eq!(ctx.snapshot().prefix.as_deref(), Some("applied"));
    }
}
