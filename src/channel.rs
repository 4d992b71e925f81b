use std::sync::Arc;

use sift_stream::Broadcast;

/// Write-only ingestion handle for raw query strings.
///
/// `push` fans the query out to whatever is observing the channel at that
/// moment; nothing is buffered for replay and callers never block. A
/// [`SearchPipeline`](crate::SearchPipeline) subscribes at construction
/// time, so queries pushed before the pipeline exists are never seen by it.
pub struct QueryChannel {
    raw: Arc<Broadcast<String>>,
}

impl QueryChannel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            raw: Arc::new(Broadcast::new()),
        }
    }

    /// Append a raw query to the event source.
    ///
    /// Pushing after [`close`](Self::close) is a documented no-op; the
    /// query is dropped with a warning.
    pub fn push(&self, query: impl Into<String>) {
        if self.raw.is_closed() {
            log::warn!("query pushed after channel close; dropping");
            return;
        }
        self.raw.notify(&query.into());
    }

    /// Terminate the source. Observers are detached and further pushes are
    /// dropped.
    pub fn close(&self) {
        self.raw.close();
    }

    pub(crate) fn source(&self) -> &Broadcast<String> {
        &self.raw
    }
}

impl Default for QueryChannel {
    fn default() -> Self {
        Self::new()
    }
}
