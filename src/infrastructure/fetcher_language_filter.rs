use std::sync::Arc;

use anyhow::Context;
use log::{debug, error, info};

use crate::{
    FetcherError, RepositoryApi, RepositoryFetcher, RepositoryItem, RequestedLanguages,
    SearchRepositoriesRequest, SearchResult, StdResult,
};

/// Fetches searched repositories and keeps the ones written in every requested language.
pub struct LanguageFilterFetcher {
    /// The API queried for repositories and their languages.
    api: Arc<dyn RepositoryApi>,

    /// The languages a repository must contain.
    requested_languages: RequestedLanguages,

    /// The search sent to the API.
    request: SearchRepositoriesRequest,
}

impl LanguageFilterFetcher {
    /// Creates a new `LanguageFilterFetcher` instance.
    pub fn new(
        api: Arc<dyn RepositoryApi>,
        requested_languages: RequestedLanguages,
        request: SearchRepositoriesRequest,
    ) -> Self {
        Self {
            api,
            requested_languages,
            request,
        }
    }

    async fn filter_items(&self, items: Vec<RepositoryItem>) -> StdResult<Vec<RepositoryItem>> {
        let mut retained = Vec::with_capacity(items.len());
        for item in items {
            let languages_url = item.languages_url()?;
            let languages = self
                .api
                .fetch_languages(languages_url)
                .await
                .with_context(|| format!("Failed to fetch the languages of {item}"))?;
            if languages.contains_all(&self.requested_languages) {
                debug!("Retained {item} with languages {languages}");
                retained.push(item);
            } else {
                debug!("Discarded {item} with languages {languages}");
            }
        }

        Ok(retained)
    }
}

#[async_trait::async_trait]
impl RepositoryFetcher for LanguageFilterFetcher {
    async fn fetch(&self) -> StdResult<SearchResult> {
        info!("Requesting data from repositories: {}", self.request);
        let search_result = match self.api.search_repositories(&self.request).await {
            Ok(search_result) => search_result,
            Err(e) if FetcherError::is_connectivity_error(&e) => {
                error!(
                    "It was not possible to load data from the repositories on GitHub ({e}). Please check your internet connection and try again."
                );
                return Ok(SearchResult::default());
            }
            Err(e) => return Err(e),
        };

        let items = search_result.items;
        let total_searched = items.len();
        let retained = self.filter_items(items).await?;
        info!(
            "Request made successfully: retained {}/{total_searched} repositories with languages {}",
            retained.len(),
            self.requested_languages
        );

        Ok(SearchResult::new(retained))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use mockall::predicate::eq;
    use serde_json::json;

    use crate::{LanguageSet, MockRepositoryApi};

    use super::*;

    fn item(name: &str, stars: u64) -> RepositoryItem {
        serde_json::from_value(json!({
            "name": name,
            "stargazers_count": stars,
            "languages_url": languages_url(name)
        }))
        .unwrap()
    }

    fn languages_url(name: &str) -> String {
        format!("https://api.github.com/repos/org-1/{name}/languages")
    }

    fn names(search_result: &SearchResult) -> Vec<String> {
        search_result
            .items()
            .iter()
            .map(|item| item.name().unwrap().to_string())
            .collect()
    }

    fn api_returning(items: Vec<RepositoryItem>) -> MockRepositoryApi {
        let mut api = MockRepositoryApi::new();
        api.expect_search_repositories()
            .with(eq(SearchRepositoriesRequest::default()))
            .returning(move |_| Ok(SearchResult::new(items.clone())))
            .times(1);

        api
    }

    fn fetcher(api: MockRepositoryApi, requested_languages: &[&str]) -> LanguageFilterFetcher {
        LanguageFilterFetcher::new(
            Arc::new(api),
            RequestedLanguages::new(requested_languages),
            SearchRepositoriesRequest::default(),
        )
    }

    #[tokio::test]
    async fn fetch_keeps_repositories_containing_all_requested_languages() {
        let api = {
            let mut api = api_returning(vec![item("a", 500), item("b", 900)]);
            api.expect_fetch_languages()
                .withf(|url| *url == languages_url("a"))
                .returning(|_| Ok(LanguageSet::from([("Python", 10), ("C", 5), ("Go", 1)])))
                .times(1);
            api.expect_fetch_languages()
                .withf(|url| *url == languages_url("b"))
                .returning(|_| Ok(LanguageSet::from([("Python", 10)])))
                .times(1);

            api
        };

        let search_result = fetcher(api, &["python", "c"]).fetch().await.unwrap();

        assert_eq!(vec!["a"], names(&search_result));
    }

    #[tokio::test]
    async fn fetch_matches_languages_case_insensitively() {
        let api = {
            let mut api = api_returning(vec![item("a", 500)]);
            api.expect_fetch_languages()
                .returning(|_| Ok(LanguageSet::from([("JavaScript", 10), ("python", 5)])))
                .times(1);

            api
        };

        let search_result = fetcher(api, &["Python", "JAVASCRIPT"])
            .fetch()
            .await
            .unwrap();

        assert_eq!(vec!["a"], names(&search_result));
    }

    #[tokio::test]
    async fn fetch_keeps_everything_without_requested_languages() {
        let api = {
            let mut api = api_returning(vec![item("a", 100), item("b", 500)]);
            api.expect_fetch_languages()
                .returning(|_| Ok(LanguageSet::default()))
                .times(2);

            api
        };

        let search_result = fetcher(api, &[]).fetch().await.unwrap();

        assert_eq!(vec!["a", "b"], names(&search_result));
    }

    #[tokio::test]
    async fn fetch_does_not_skip_items_following_a_discarded_one() {
        let api = {
            let mut api = api_returning(vec![item("a", 1), item("b", 2), item("c", 3)]);
            api.expect_fetch_languages()
                .withf(|url| *url != languages_url("b"))
                .returning(|_| Ok(LanguageSet::from([("Rust", 10)])))
                .times(2);
            api.expect_fetch_languages()
                .withf(|url| *url == languages_url("b"))
                .returning(|_| Ok(LanguageSet::from([("Python", 10)])))
                .times(1);

            api
        };

        let search_result = fetcher(api, &["rust"]).fetch().await.unwrap();

        assert_eq!(vec!["a", "c"], names(&search_result));
    }

    #[tokio::test]
    async fn fetch_returns_empty_result_on_connectivity_failure() {
        let api = {
            let mut api = MockRepositoryApi::new();
            api.expect_search_repositories()
                .returning(|_| {
                    Err(anyhow!(FetcherError::Connectivity(
                        "connection refused".to_string()
                    )))
                })
                .times(1);
            api.expect_fetch_languages().never();

            api
        };

        let search_result = fetcher(api, &["python"]).fetch().await.unwrap();

        assert!(search_result.is_empty());
    }

    #[tokio::test]
    async fn fetch_fails_on_other_search_failures() {
        let api = {
            let mut api = MockRepositoryApi::new();
            api.expect_search_repositories()
                .returning(|_| Err(anyhow!(FetcherError::Parse("invalid JSON".to_string()))))
                .times(1);

            api
        };

        fetcher(api, &["python"])
            .fetch()
            .await
            .expect_err("Fetch should fail on a parsing error");
    }

    #[tokio::test]
    async fn fetch_fails_if_a_language_lookup_fails() {
        let api = {
            let mut api = api_returning(vec![item("a", 1), item("b", 2)]);
            api.expect_fetch_languages()
                .returning(|_| {
                    Err(anyhow!(FetcherError::Connectivity(
                        "connection reset".to_string()
                    )))
                })
                .times(1);

            api
        };

        fetcher(api, &["python"])
            .fetch()
            .await
            .expect_err("Fetch should fail if a language lookup fails");
    }

    #[tokio::test]
    async fn fetch_fails_on_item_without_languages_url() {
        let api = {
            let item: RepositoryItem =
                serde_json::from_value(json!({ "name": "a", "stargazers_count": 1 })).unwrap();
            let mut api = api_returning(vec![item]);
            api.expect_fetch_languages().never();

            api
        };

        fetcher(api, &[])
            .fetch()
            .await
            .expect_err("Fetch should fail without a languages URL");
    }
}
