use thiserror::Error;

/// Failure raised by a [`SearchProvider`](crate::SearchProvider) lookup.
///
/// The error is a plain cloneable value so the latest pipeline output can
/// be replayed to observers that subscribe after the failure was published.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("search lookup failed: {message}")]
pub struct LookupError {
    message: String,
}

impl LookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human readable description of the underlying failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Latest observable outcome of the pipeline.
///
/// Exactly one value is current at any instant; transitions are totally
/// ordered by the pipeline worker. A failure replaces any previously
/// published items rather than coalescing with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultState {
    /// No lookup has settled yet.
    Empty,
    /// Items returned by the most recent successful lookup, in provider
    /// order.
    Ready(Vec<String>),
    /// The most recent lookup failed.
    Failed(LookupError),
}

impl ResultState {
    /// Items to render for this state. `Empty` and `Failed` expose an empty
    /// slice.
    #[must_use]
    pub fn items(&self) -> &[String] {
        match self {
            Self::Ready(items) => items,
            Self::Empty | Self::Failed(_) => &[],
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&LookupError> {
        match self {
            Self::Failed(error) => Some(error),
            Self::Empty | Self::Ready(_) => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl Default for ResultState {
    fn default() -> Self {
        Self::Empty
    }
}
