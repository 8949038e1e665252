use serde::Deserialize;

use super::RepositoryItem;

/// A response of the repository search API.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    /// Retrieved repositories, in response order
    pub(crate) items: Vec<RepositoryItem>,
}

impl SearchResult {
    /// Creates a new `SearchResult` instance with the given repository items.
    pub fn new(items: Vec<RepositoryItem>) -> Self {
        Self { items }
    }

    /// Retrieves the list of repository items.
    pub fn items(&self) -> &[RepositoryItem] {
        &self.items
    }

    /// Returns `true` if there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
