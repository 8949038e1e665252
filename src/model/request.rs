use std::fmt::Display;

/// The language the search is restricted to by default.
pub const DEFAULT_SEARCH_LANGUAGE: &str = "python";

/// The sort order sent with the search by default.
pub const DEFAULT_SEARCH_SORT: &str = "starts";

/// A repository search request being made to the GitHub API
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct SearchRepositoriesRequest {
    /// The language the search is restricted to.
    pub(crate) language: String,

    /// The sort order of the results.
    pub(crate) sort: String,
}

impl SearchRepositoriesRequest {
    /// Creates a new `SearchRepositoriesRequest` with the given language and sort order.
    pub fn new(language: &str, sort: &str) -> Self {
        Self {
            language: language.to_string(),
            sort: sort.to_string(),
        }
    }

    /// Retrieves the text query.
    pub fn query(&self) -> String {
        format!("language:{}", self.language)
    }

    /// Retrieves the query string parameters of the request.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("q", self.query()), ("sort", self.sort.clone())]
    }
}

impl Default for SearchRepositoriesRequest {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_LANGUAGE, DEFAULT_SEARCH_SORT)
    }
}

impl Display for SearchRepositoriesRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchRepositoriesRequest: query={}, sort={}",
            self.query(),
            self.sort
        )
    }
}
