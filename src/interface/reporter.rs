use std::path::PathBuf;

use crate::StdResult;

/// A trait for producing the full popularity report.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryReporter {
    /// Fetches the repositories and renders every artifact of the report.
    ///
    /// Returns the directories written by the renderers, empty if nothing was rendered.
    async fn report(&self) -> StdResult<Vec<PathBuf>>;
}
