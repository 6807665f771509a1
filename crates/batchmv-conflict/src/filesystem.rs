//! Local filesystem adapter (secondary/driven adapter)
//!
//! Implements [`IFileSystem`] using `tokio::fs`. Existence is checked with
//! `symlink_metadata` so dangling symlinks count as existing — a rename
//! onto one would still clobber it.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;

use batchmv_core::ports::IFileSystem;

/// Adapter that bridges the [`IFileSystem`] port to the real filesystem.
///
/// Zero-sized: every operation derives its context from the path argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystemAdapter;

impl LocalFileSystemAdapter {
    /// Create a new `LocalFileSystemAdapter`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IFileSystem for LocalFileSystemAdapter {
    async fn exists(&self, path: &Path) -> anyhow::Result<bool> {
        match tokio::fs::symlink_metadata(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("probe {}", path.display())),
        }
    }
}
