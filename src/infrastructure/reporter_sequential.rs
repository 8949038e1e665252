use std::{path::PathBuf, sync::Arc};

use crate::{RepositoryFetcher, RepositoryReporter, ResultRenderer, StdResult};

/// A reporter fetching the repositories once, then running each renderer in turn.
pub struct SequentialReporter {
    fetcher: Arc<dyn RepositoryFetcher>,
    renderers: Vec<Arc<dyn ResultRenderer>>,
}

impl SequentialReporter {
    /// Creates a new `SequentialReporter` instance with the given fetcher and renderers.
    pub fn new(
        fetcher: Arc<dyn RepositoryFetcher>,
        renderers: Vec<Arc<dyn ResultRenderer>>,
    ) -> Self {
        Self { fetcher, renderers }
    }
}

#[async_trait::async_trait]
impl RepositoryReporter for SequentialReporter {
    async fn report(&self) -> StdResult<Vec<PathBuf>> {
        let search_result = self.fetcher.fetch().await?;
        let mut rendered_directories = vec![];
        for renderer in &self.renderers {
            if let Some(directory) = renderer.render(&search_result)? {
                rendered_directories.push(directory);
            }
        }

        Ok(rendered_directories)
    }
}
