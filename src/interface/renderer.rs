use std::path::PathBuf;

use crate::{SearchResult, StdResult};

/// A trait for rendering the retained repositories to artifacts on disk.
#[cfg_attr(test, mockall::automock)]
pub trait ResultRenderer: Sync + Send {
    /// Renders the search result and returns the directory the artifacts were written to.
    ///
    /// Returns `None` without writing anything when the result is empty.
    fn render(&self, result: &SearchResult) -> StdResult<Option<PathBuf>>;
}
