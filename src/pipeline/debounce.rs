use std::time::{Duration, Instant};

/// Deadline bookkeeping for the debounce window.
///
/// Every arrival replaces the pending query and pushes the deadline out to
/// one full window from now, so a burst collapses to its last element and
/// nothing is released until the burst has been quiet for a whole window.
#[derive(Debug)]
pub(crate) struct DebounceTimer {
    window: Duration,
    pending: Option<String>,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    /// Record an arrival, restarting the quiet window.
    pub(crate) fn note(&mut self, query: String) {
        self.pending = Some(query);
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Time left until the pending query is due, or `None` when nothing is
    /// pending. Returns `Duration::ZERO` once the deadline has passed.
    pub(crate) fn ready_in(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Release the pending query and clear the deadline.
    pub(crate) fn fire(&mut self) -> Option<String> {
        self.deadline = None;
        self.pending.take()
    }
}
