//! Settings validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DebugSettings → Result<(), Vec<ValidationError>>
//! - Runs before settings reach the global store

use thiserror::Error;

use crate::config::schema::DebugSettings;

/// A semantic problem with otherwise well-formed settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Labels are written on a single line.
    #[error("prefix must not contain line breaks: {0:?}")]
    PrefixLineBreak(String),

    /// Whitespace-only prefixes would produce invisible labels.
    #[error("prefix must not be blank")]
    PrefixBlank,
}

/// Check settings before they are accepted.
pub fn validate_settings(settings: &DebugSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(prefix) = &settings.prefix {
        if prefix.contains('\n') || prefix.contains('\r') {
            errors.push(ValidationError::PrefixLineBreak(prefix.clone()));
        }
        if !prefix.is_empty() && prefix.trim().is_empty() {
            errors.push(ValidationError::PrefixBlank);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_prefix(prefix: &str) -> DebugSettings {
        DebugSettings {
            prefix: Some(prefix.to_string()),
            ..DebugSettings::default()
        }
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&DebugSettings::default()).is_ok());
        assert!(validate_settings(&with_prefix("api")).is_ok());
    }

    #[test]
    fn test_empty_prefix_is_accepted() {
        assert!(validate_settings(&with_prefix("")).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let errors = validate_settings(&with_prefix(" \n ")).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::PrefixLineBreak(" \n ".to_string()),
                ValidationError::PrefixBlank,
            ]
        );
    }
}
