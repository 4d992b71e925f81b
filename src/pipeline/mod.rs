mod commands;
mod debounce;
mod worker;

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;

use sift_stream::Latest;

use self::commands::PipelineCommand;
use crate::channel::QueryChannel;
use crate::provider::SearchProvider;
use crate::settings::PipelineSettings;
use crate::state::ResultState;

/// Debounce → dedupe → switch-latest lookup pipeline over a
/// [`QueryChannel`].
///
/// The pipeline subscribes to the channel once at construction time and
/// keeps running until it is disposed: bursts of raw queries collapse to
/// their last element, a settled query equal to the previously forwarded
/// one is suppressed, and each surviving query triggers a provider lookup
/// whose outcome is published only while it is still the latest issued one.
/// A lookup failure is published as [`ResultState::Failed`] and never stops
/// the pipeline.
pub struct SearchPipeline {
    commands: Sender<PipelineCommand>,
    output: Arc<Latest<ResultState>>,
    worker: Option<JoinHandle<()>>,
}

impl SearchPipeline {
    /// Build a pipeline with the default settings.
    #[must_use]
    pub fn new(queries: &QueryChannel, provider: Arc<dyn SearchProvider>) -> Self {
        Self::with_settings(queries, provider, PipelineSettings::default())
    }

    /// Build a pipeline with explicit settings.
    #[must_use]
    pub fn with_settings(
        queries: &QueryChannel,
        provider: Arc<dyn SearchProvider>,
        settings: PipelineSettings,
    ) -> Self {
        let output = Arc::new(Latest::new(ResultState::Empty));
        let (commands, worker) =
            worker::spawn(provider, settings.debounce_window, Arc::clone(&output));

        let ingest = commands.clone();
        queries.source().observe(move |query: &String| {
            ingest.send(PipelineCommand::Query(query.clone())).is_ok()
        });

        Self {
            commands,
            output,
            worker: Some(worker),
        }
    }

    /// Subscribe to the pipeline output.
    ///
    /// The receiver yields the current [`ResultState`] immediately, then
    /// every subsequent published value, and terminates once the pipeline
    /// is disposed.
    #[must_use]
    pub fn results(&self) -> Receiver<ResultState> {
        self.output.subscribe()
    }

    /// Snapshot the current output without subscribing.
    #[must_use]
    pub fn current(&self) -> ResultState {
        self.output.get()
    }

    /// Tear the pipeline down.
    ///
    /// The worker stops, a pending debounce timer is cancelled, in-flight
    /// lookups are ignored on completion and the output stream terminates.
    /// Consumes the pipeline, so a second dispose is unrepresentable; a
    /// pipeline dropped without calling this is torn down the same way.
    pub fn dispose(self) {
        drop(self);
    }

    fn shutdown(&mut self) {
        let _ = self.commands.send(PipelineCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for SearchPipeline {
    fn drop(&mut self) {
        self.shutdown();
    }
}
