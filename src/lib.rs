//! Core crate exports for the `sift` debounced search pipeline.
//!
//! Callers push raw query strings into a [`QueryChannel`]; a
//! [`SearchPipeline`] debounces them, drops adjacent duplicates, runs each
//! surviving query against a [`SearchProvider`] and publishes the latest
//! [`ResultState`] for any number of observers. The root module re-exports
//! the types embedders need so a pipeline can be wired up without digging
//! through the module hierarchy.

pub mod app_dirs;
mod channel;
mod pipeline;
mod provider;
pub mod settings;
mod state;

pub use channel::QueryChannel;
pub use pipeline::SearchPipeline;
pub use provider::{SearchProvider, StaticSearchProvider};
pub use settings::{PipelineSettings, SettingsError};
pub use state::{LookupError, ResultState};
