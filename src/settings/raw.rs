use std::time::Duration;

use serde::Deserialize;

use super::resolved::{PipelineSettings, SettingsError};

/// Windows above this are assumed to be a unit mistake.
const MAX_WINDOW_MS: u64 = 60_000;

/// Mirror of the configuration file representation before validation is
/// applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawSettings {
    pipeline: PipelineSection,
}

/// Pipeline tuning options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PipelineSection {
    debounce_window_ms: Option<u64>,
}

impl RawSettings {
    /// Validate the raw values into application-ready settings.
    pub(super) fn resolve(self) -> Result<PipelineSettings, SettingsError> {
        let mut settings = PipelineSettings::default();
        if let Some(window_ms) = self.pipeline.debounce_window_ms {
            if window_ms == 0 {
                return Err(SettingsError::invalid(
                    "pipeline.debounce_window_ms",
                    window_ms.to_string(),
                    "debounce window must be positive",
                ));
            }
            if window_ms > MAX_WINDOW_MS {
                return Err(SettingsError::invalid(
                    "pipeline.debounce_window_ms",
                    window_ms.to_string(),
                    "debounce window must not exceed 60000",
                ));
            }
            settings.debounce_window = Duration::from_millis(window_ms);
        }
        Ok(settings)
    }
}
