use std::time::Duration;

use thiserror::Error;

/// Application-ready pipeline tuning derived from config files, environment
/// variables and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Quiet period a query burst must respect before a lookup is issued.
    pub debounce_window: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            debounce_window: Duration::from_millis(300),
        }
    }
}

/// Error produced while validating raw configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value for {key}: {reason} (value: {value})")]
pub struct SettingsError {
    key: &'static str,
    value: String,
    reason: String,
}

impl SettingsError {
    pub(super) fn invalid<V, R>(key: &'static str, value: V, reason: R) -> Self
    where
        V: Into<String>,
        R: Into<String>,
    {
        Self {
            key,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_300ms() {
        assert_eq!(
            PipelineSettings::default().debounce_window,
            Duration::from_millis(300)
        );
    }

    #[test]
    fn error_names_key_value_and_reason() {
        let error = SettingsError::invalid("pipeline.debounce_window_ms", "0", "must be positive");
        assert_eq!(
            error.to_string(),
            "invalid value for pipeline.debounce_window_ms: must be positive (value: 0)"
        );
    }
}
