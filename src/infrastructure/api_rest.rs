use std::collections::HashMap;

use reqwest::Client;

use crate::{
    FetcherError, LanguageSet, RepositoryApi, SearchRepositoriesRequest, SearchResult, StdResult,
};

/// The REST production endpoint for GitHub.
pub const GITHUB_REST_ENDPOINT: &str = "https://api.github.com";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Queries the GitHub REST API.
pub struct RestRepositoryApi {
    client: Client,
    endpoint: String,
}

impl RestRepositoryApi {
    /// Creates a new `RestRepositoryApi` instance targeting the given endpoint.
    pub fn try_new(endpoint: &str) -> StdResult<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search/repositories", self.endpoint)
    }
}

#[async_trait::async_trait]
impl RepositoryApi for RestRepositoryApi {
    async fn search_repositories(
        &self,
        request: &SearchRepositoriesRequest,
    ) -> StdResult<SearchResult> {
        let response = self
            .client
            .get(self.search_url())
            .query(&request.query_pairs())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(FetcherError::from)?;
        let search_result = response
            .json::<SearchResult>()
            .await
            .map_err(FetcherError::from)?;

        Ok(search_result)
    }

    async fn fetch_languages(&self, languages_url: &str) -> StdResult<LanguageSet> {
        let response = self
            .client
            .get(languages_url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(FetcherError::from)?;
        let languages = response
            .json::<HashMap<String, u64>>()
            .await
            .map_err(FetcherError::from)?;

        Ok(languages.into())
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;

    fn mock_search_json_value(server: &MockServer) -> serde_json::Value {
        json!({
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {
                    "name": "repository-1",
                    "stargazers_count": 100,
                    "languages_url": server.url("/repos/org-1/repository-1/languages")
                },
                {
                    "name": "repository-2",
                    "stargazers_count": 200,
                    "languages_url": server.url("/repos/org-1/repository-2/languages")
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_search_repositories() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/search/repositories")
                .query_param("q", "language:python")
                .query_param("sort", "starts");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(mock_search_json_value(&server));
        });
        let api = RestRepositoryApi::try_new(&server.base_url()).unwrap();

        let search_result = api
            .search_repositories(&SearchRepositoriesRequest::default())
            .await
            .unwrap();

        mock.assert();
        let names = search_result
            .items()
            .iter()
            .map(|item| item.name().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(vec!["repository-1", "repository-2"], names);
    }

    #[tokio::test]
    async fn test_search_repositories_fails_on_unexpected_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/search/repositories");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "message": "no items here" }));
        });
        let api = RestRepositoryApi::try_new(&server.base_url()).unwrap();

        let error = api
            .search_repositories(&SearchRepositoriesRequest::default())
            .await
            .expect_err("Expected a parsing error");

        assert!(matches!(
            error.downcast_ref::<FetcherError>(),
            Some(FetcherError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_search_repositories_fails_on_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/search/repositories");
            then.status(403)
                .json_body(json!({ "message": "API rate limit exceeded" }));
        });
        let api = RestRepositoryApi::try_new(&server.base_url()).unwrap();

        let error = api
            .search_repositories(&SearchRepositoriesRequest::default())
            .await
            .expect_err("Expected a remote error");

        assert!(matches!(
            error.downcast_ref::<FetcherError>(),
            Some(FetcherError::Remote(_))
        ));
    }

    #[tokio::test]
    async fn test_search_repositories_fails_with_connectivity_error() {
        let api = RestRepositoryApi::try_new("http://127.0.0.1:1").unwrap();

        let error = api
            .search_repositories(&SearchRepositoriesRequest::default())
            .await
            .expect_err("Expected a connectivity error");

        assert!(FetcherError::is_connectivity_error(&error));
    }

    #[tokio::test]
    async fn test_fetch_languages() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/repos/org-1/repository-1/languages");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "Python": 12000, "C": 300 }));
        });
        let api = RestRepositoryApi::try_new(&server.base_url()).unwrap();

        let languages = api
            .fetch_languages(&server.url("/repos/org-1/repository-1/languages"))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(LanguageSet::from([("python", 12000), ("c", 300)]), languages);
    }
}
