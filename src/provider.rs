use crate::state::LookupError;

/// Collaborator performing the actual lookup for a settled query.
///
/// Implementations run on a dedicated lookup thread owned by the pipeline,
/// so they may block for as long as they need. No timeout is imposed; a
/// lookup that never returns is simply superseded by the next settled
/// query.
pub trait SearchProvider: Send + Sync {
    /// Look up `query`, returning matching entries in display order.
    ///
    /// The empty query means "match everything". Case handling is the
    /// provider's concern; the pipeline forwards queries verbatim.
    fn search(&self, query: &str) -> Result<Vec<String>, LookupError>;
}

/// Reference provider filtering a fixed entry list by case-insensitive
/// substring match.
pub struct StaticSearchProvider {
    entries: Vec<String>,
}

impl StaticSearchProvider {
    pub fn new(entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }
}

impl SearchProvider for StaticSearchProvider {
    fn search(&self, query: &str) -> Result<Vec<String>, LookupError> {
        let needle = query.to_lowercase();
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
