//! Filesystem probe port (driven/secondary port)
//!
//! The conflict engine consumes exactly one filesystem capability: existence
//! queries for arbitrary paths. It never reads file contents and never
//! writes — applying renames is the downstream executor's job.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because probe failures are adapter-specific
//!   (permission denied, unreachable mount, ...). The detector converts
//!   failures into per-change conflicts rather than aborting the batch.
//! - Probes may be called repeatedly for the same path during resolution;
//!   the engine caches per unique target, so adapters need not.

use std::path::Path;

use async_trait::async_trait;

/// Existence queries against the filesystem the batch will be applied to
#[async_trait]
pub trait IFileSystem: Send + Sync {
    /// Returns whether anything (file, directory, symlink) exists at `path`
    ///
    /// A dangling symlink counts as existing: the rename would still clobber
    /// it.
    async fn exists(&self, path: &Path) -> anyhow::Result<bool>;
}
