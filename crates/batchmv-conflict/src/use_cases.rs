//! Batch validation use cases - orchestrate detection and resolution
//!
//! Integrates the detector and resolver into the workflow a renaming front
//! end consumes: validate the batch, optionally auto-fix, re-validate, and
//! hand back the corrected batch with a summary of what remains.

use std::sync::Arc;

use tracing::{info, warn};

use batchmv_core::{
    config::EngineConfig,
    domain::{Change, ChangeStatus, ConflictReport},
    ports::IFileSystem,
};

use crate::{
    detector::ConflictDetector, error::ConflictError, resolver::ConflictResolver,
};

/// Result of one full validate(-and-fix) pass over a batch
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// The final conflict report (post-resolution when fixing was enabled)
    pub report: ConflictReport,
    /// Changes whose targets were rewritten
    pub rewritten: usize,
    /// Changes still flagged with a conflict
    pub unresolved: usize,
}

impl BatchOutcome {
    /// True when every change can be executed (no-ops aside)
    pub fn is_applicable(&self) -> bool {
        self.unresolved == 0
    }
}

/// Orchestrates conflict detection + optional automatic resolution
pub struct ValidateBatchUseCase {
    detector: ConflictDetector,
    resolver: Option<ConflictResolver>,
}

impl ValidateBatchUseCase {
    /// Creates the use case; `fix` enables automatic resolution
    pub fn new(filesystem: Arc<dyn IFileSystem>, config: &EngineConfig, fix: bool) -> Self {
        let detector = ConflictDetector::from_config(Arc::clone(&filesystem), config);
        let resolver = fix.then(|| ConflictResolver::from_config(filesystem, config));
        Self { detector, resolver }
    }

    /// Validates the batch, auto-fixing when enabled
    ///
    /// Without fixing, the batch is returned untouched alongside its
    /// report. With fixing, targets are rewritten in place and the
    /// post-resolution report is returned; unfixable conflicts remain in it
    /// for the caller to surface.
    pub async fn run(&self, batch: &mut [Change]) -> Result<BatchOutcome, ConflictError> {
        let report = self.detector.detect(batch).await;

        let report = match &self.resolver {
            Some(resolver) if report.has_fixable() => {
                info!(conflicts = report.total(), "Auto-fixing conflicts");
                resolver.resolve(batch, &report).await?
            }
            Some(resolver) => {
                // Nothing fixable, but resolve still finalizes statuses and
                // re-verifies the post-condition.
                resolver.resolve(batch, &report).await?
            }
            None => report,
        };

        let rewritten = batch
            .iter()
            .filter(|c| c.status() == ChangeStatus::Resolved)
            .count();
        let unresolved = batch
            .iter()
            .filter(|c| c.status() == ChangeStatus::ConflictDetected)
            .count();
        if unresolved > 0 {
            warn!(unresolved, "Batch contains conflicts requiring intervention");
        }

        Ok(BatchOutcome {
            report,
            rewritten,
            unresolved,
        })
    }
}
