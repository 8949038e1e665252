use crate::{SearchResult, StdResult};

/// A trait for fetching the repositories retained for the report.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryFetcher: Sync + Send {
    /// Fetches the repositories from the API and keeps the ones matching the requested languages.
    ///
    /// A connectivity failure yields an empty result instead of an error.
    async fn fetch(&self) -> StdResult<SearchResult>;
}
