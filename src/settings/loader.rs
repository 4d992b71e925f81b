use std::path::PathBuf;

use anyhow::{Result, anyhow};

use super::raw::RawSettings;
use super::resolved::PipelineSettings;
use super::sources::build_config;

/// Load pipeline settings by combining config files and environment
/// variables.
pub fn load(paths: &[PathBuf]) -> Result<PipelineSettings> {
    let builder = build_config(paths)?;
    let raw: RawSettings = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.resolve().map_err(Into::into)
}
