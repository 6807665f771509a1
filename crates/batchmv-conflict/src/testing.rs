//! In-memory filesystem double for unit tests

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::bail;
use async_trait::async_trait;

use batchmv_core::ports::IFileSystem;

/// Fake filesystem backed by a set of existing paths
///
/// Paths listed as failing return a probe error, simulating permission
/// denied on an existence check.
#[derive(Debug, Default)]
pub(crate) struct MockFileSystem {
    existing: HashSet<PathBuf>,
    failing: HashSet<PathBuf>,
}

impl MockFileSystem {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_existing<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.existing.extend(paths.into_iter().map(Into::into));
        self
    }

    pub(crate) fn with_failing(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }
}

#[async_trait]
impl IFileSystem for MockFileSystem {
    async fn exists(&self, path: &Path) -> anyhow::Result<bool> {
        if self.failing.contains(path) {
            bail!("permission denied: {}", path.display());
        }
        Ok(self.existing.contains(path))
    }
}
