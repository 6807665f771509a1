//! Proposed rename changes
//!
//! A [`Change`] is one proposed rename in a batch: an existing source file
//! mapped to a proposed target path. Changes are created by the upstream
//! name-generation stage and mutated in place only by the conflict resolver
//! (target rewritten, status updated). The detector never mutates a Change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Lifecycle status of a proposed rename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    /// Fresh from the name-generation stage, not yet validated
    Unresolved,
    /// Flagged with a conflict the resolver could not repair
    ConflictDetected,
    /// Target was rewritten by the resolver
    Resolved,
    /// Safe to apply as-is
    Ok,
}

/// One proposed rename operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Path to the existing file (absolute or relative to `base_dir`)
    source: PathBuf,
    /// Directory the batch run is rooted at
    base_dir: PathBuf,
    /// Proposed new path (may be relative to `base_dir` or absolute)
    target: String,
    /// Lifecycle status
    status: ChangeStatus,
}

impl Change {
    /// Creates a new unvalidated change
    pub fn new(
        source: impl Into<PathBuf>,
        base_dir: impl Into<PathBuf>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            base_dir: base_dir.into(),
            target: target.into(),
            status: ChangeStatus::Unresolved,
        }
    }

    /// Returns the source path as given
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns the batch base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the proposed target path as given
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the lifecycle status
    pub fn status(&self) -> ChangeStatus {
        self.status
    }

    /// Returns the source resolved against the base directory
    ///
    /// `PathBuf::join` replaces the base when the argument is absolute, so
    /// absolute sources pass through unchanged.
    pub fn resolved_source(&self) -> PathBuf {
        self.base_dir.join(&self.source)
    }

    /// Returns the proposed target resolved against the base directory
    pub fn resolved_target(&self) -> PathBuf {
        self.base_dir.join(&self.target)
    }

    /// True when the proposed target resolves to the identical source path
    ///
    /// Such a change is a no-op: not an error, but excluded from execution.
    pub fn is_no_op(&self) -> bool {
        self.resolved_source() == self.resolved_target()
    }

    /// Rewrites the proposed target. Reserved for the conflict resolver.
    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = target.into();
    }

    /// Updates the lifecycle status. Reserved for the conflict resolver.
    pub fn set_status(&mut self, status: ChangeStatus) {
        self.status = status;
    }
}
