use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow};

use crate::StdResult;

/// The name of the directory, under the user's home, receiving the artifacts by default.
pub const DEFAULT_OUTPUT_DIRECTORY_NAME: &str = "data";

/// The directory where the report artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirectory {
    path: PathBuf,
}

impl OutputDirectory {
    /// Creates a new `OutputDirectory` at the given path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default `OutputDirectory`, located in the home directory of the user.
    pub fn try_from_home() -> StdResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow!("Unable to locate the home directory of the user"))?;

        Ok(Self::new(home.join(DEFAULT_OUTPUT_DIRECTORY_NAME)))
    }

    /// Retrieves the path of the directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the directory if missing and returns its path.
    pub fn ensure(&self) -> StdResult<&Path> {
        fs::create_dir_all(&self.path).with_context(|| {
            format!(
                "Failed to create the output directory {}",
                self.path.display()
            )
        })?;

        Ok(&self.path)
    }
}
