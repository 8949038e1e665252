use thiserror::Error;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// Fetcher error
#[derive(Error, Debug)]
pub enum FetcherError {
    /// The remote host could not be reached
    #[error("Connectivity error: {0}")]
    Connectivity(String),
    /// Parse error
    #[error("Parsing error: {0}")]
    Parse(String),
    /// Remote error
    #[error("Remote error: {0}")]
    Remote(String),
}

impl FetcherError {
    /// Returns `true` if the error was raised because the remote host could not be reached.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, FetcherError::Connectivity(_))
    }

    /// Returns `true` if the given error is (or wraps) a connectivity `FetcherError`.
    pub fn is_connectivity_error(error: &anyhow::Error) -> bool {
        error
            .downcast_ref::<FetcherError>()
            .is_some_and(FetcherError::is_connectivity)
    }
}

impl From<reqwest::Error> for FetcherError {
    fn from(error: reqwest::Error) -> Self {
        let message = error.to_string();
        if error.is_connect() {
            FetcherError::Connectivity(message)
        } else if error.is_decode() {
            FetcherError::Parse(message)
        } else {
            FetcherError::Remote(message)
        }
    }
}
