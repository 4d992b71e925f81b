use crate::state::LookupError;

/// Commands understood by the pipeline worker thread.
///
/// Everything the worker reacts to arrives through this one channel so that
/// raw-query arrivals and lookup completions are serialized onto a single
/// timeline.
#[derive(Debug)]
pub(crate) enum PipelineCommand {
    /// A raw query arrived from the ingestion channel.
    Query(String),
    /// A lookup thread finished.
    LookupDone {
        /// Generation id assigned when the lookup was issued.
        id: u64,
        /// Provider outcome, success or failure.
        outcome: Result<Vec<String>, LookupError>,
    },
    /// Stop the worker thread.
    Shutdown,
}
