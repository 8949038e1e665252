use crate::{LanguageSet, SearchRepositoriesRequest, SearchResult, StdResult};

/// A trait for querying the repository hosting API.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryApi: Sync + Send {
    /// Searches repositories.
    async fn search_repositories(
        &self,
        request: &SearchRepositoriesRequest,
    ) -> StdResult<SearchResult>;

    /// Fetches the language breakdown of a repository.
    async fn fetch_languages(&self, languages_url: &str) -> StdResult<LanguageSet>;
}
