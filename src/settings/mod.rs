//! Pipeline configuration loading and resolution.
//!
//! `load` is the primary entry point: it layers the default configuration
//! file locations, any explicitly supplied paths and the `SIFT` environment
//! namespace, then validates the result into a [`PipelineSettings`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::{PipelineSettings, SettingsError};
