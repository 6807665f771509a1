//! Conflict resolution
//!
//! Rewrites offending targets in place so that re-running detection on the
//! corrected batch reports no fixable conflicts. Every fix is
//! deterministic: sanitize the filename, disambiguate with a numeric
//! suffix, truncate to the platform length limit — in that order, so a
//! suffix never pushes a name back over the limit.
//!
//! Unfixable kinds are left flagged: an empty filename has no safe
//! synthetic replacement, and a failed filesystem probe means availability
//! cannot be verified. Same-file renames are not conflicts and are never
//! touched.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use batchmv_core::{
    config::EngineConfig,
    domain::{Change, ChangeStatus, ConflictKind, ConflictReport, Platform},
    ports::IFileSystem,
};

use crate::{detector::ConflictDetector, error::ConflictError, namer, rules};

/// Bound on numeric disambiguation attempts per change
const MAX_SUFFIX_ATTEMPTS: u32 = 1000;

/// Repairs fixable conflicts by rewriting targets in place
pub struct ConflictResolver {
    filesystem: Arc<dyn IFileSystem>,
    detector: ConflictDetector,
    placeholder_stem: String,
}

impl ConflictResolver {
    /// Creates a resolver for the given platform's rules
    pub fn new(filesystem: Arc<dyn IFileSystem>, platform: Platform) -> Self {
        let detector = ConflictDetector::new(Arc::clone(&filesystem), platform);
        Self {
            filesystem,
            detector,
            placeholder_stem: "unnamed".to_string(),
        }
    }

    /// Creates a resolver from engine configuration
    pub fn from_config(filesystem: Arc<dyn IFileSystem>, config: &EngineConfig) -> Self {
        let detector = ConflictDetector::from_config(Arc::clone(&filesystem), config);
        Self {
            filesystem,
            detector,
            placeholder_stem: config.placeholder_stem.clone(),
        }
    }

    /// Overrides the stem used when sanitization empties a filename
    #[must_use]
    pub fn with_placeholder_stem(mut self, stem: impl Into<String>) -> Self {
        self.placeholder_stem = stem.into();
        self
    }

    /// Rewrites every fixable flagged target, then re-detects
    ///
    /// Changes flagged in `report` under a fixable kind are rewritten in
    /// batch order; each final target is claimed so no resolution can
    /// introduce a new duplicate. Returns the post-resolution report, which
    /// can still contain unfixable kinds (`empty_filename`, `probe_failed`)
    /// and informational `same_file_rename` entries.
    pub async fn resolve(
        &self,
        batch: &mut [Change],
        report: &ConflictReport,
    ) -> Result<ConflictReport, ConflictError> {
        // Resolved source paths implicated under any fixable kind
        let flagged: HashSet<PathBuf> = report
            .iter()
            .filter(|c| c.kind().is_fixable())
            .flat_map(|c| c.sources().iter().cloned())
            .collect();

        // Sources being renamed away; a candidate landing on one is safe
        let source_keys: HashSet<String> = batch
            .iter()
            .filter(|c| !c.is_no_op())
            .map(|c| self.detector.normalize(&c.resolved_source()))
            .collect();

        // Unflagged changes keep their targets: claim them up front so a
        // rewrite can never collide with them.
        let mut claimed: HashSet<String> = batch
            .iter()
            .filter(|c| !flagged.contains(&c.resolved_source()))
            .map(|c| self.detector.normalize(&c.resolved_target()))
            .collect();

        let mut probe_cache: HashMap<String, Result<bool, String>> = HashMap::new();

        for change in batch.iter_mut() {
            if !flagged.contains(&change.resolved_source()) {
                continue;
            }

            let original = change.target().to_string();
            let segment = rules::filename_segment(self.detector.platform(), &original);
            let dir_part = namer::sanitize_dir_part(
                self.detector.platform(),
                &original[..original.len() - segment.len()],
            );
            let parent = change
                .resolved_target()
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();

            let base = namer::sanitize(
                self.detector.platform(),
                segment,
                &self.placeholder_stem,
            );
            let (stem, ext) = namer::split_extension(&base);

            let mut outcome = None;
            let mut probe_failed = false;
            for n in 0..MAX_SUFFIX_ATTEMPTS {
                let suffix = if n == 0 {
                    String::new()
                } else {
                    namer::suffix(n)
                };
                let name = namer::fit_filename(
                    self.detector.platform(),
                    &parent,
                    stem,
                    &suffix,
                    ext,
                );
                let candidate = format!("{dir_part}{name}");
                let candidate_path = change.base_dir().join(&candidate);
                let key = self.detector.normalize(&candidate_path);

                if claimed.contains(&key) {
                    continue;
                }
                if source_keys.contains(&key) {
                    outcome = Some((candidate, key));
                    break;
                }
                match self.probe(&mut probe_cache, &key, &candidate_path).await {
                    Ok(false) => {
                        outcome = Some((candidate, key));
                        break;
                    }
                    Ok(true) => continue,
                    Err(cause) => {
                        warn!(
                            target = %candidate_path.display(),
                            cause = %cause,
                            "Probe failed while resolving, leaving change flagged"
                        );
                        probe_failed = true;
                        break;
                    }
                }
            }

            match outcome {
                Some((candidate, key)) => {
                    claimed.insert(key);
                    if candidate != original {
                        debug!(
                            source = %change.source().display(),
                            from = %original,
                            to = %candidate,
                            "Rewrote conflicting target"
                        );
                        change.set_target(candidate);
                        change.set_status(ChangeStatus::Resolved);
                    }
                }
                None if probe_failed => {
                    // Availability could not be verified; leave the change
                    // flagged for re-detection to report.
                    change.set_status(ChangeStatus::ConflictDetected);
                }
                None => {
                    return Err(ConflictError::NameExhausted {
                        target: original,
                        attempts: MAX_SUFFIX_ATTEMPTS,
                    });
                }
            }
        }

        // Post-condition check: the corrected batch must be conflict-free
        // for every fixable kind, and anything unfixable surfaces here.
        let remaining = self.detector.detect(batch).await;

        for change in batch.iter_mut() {
            let source = change.resolved_source();
            if implicated(&remaining, &source) {
                change.set_status(ChangeStatus::ConflictDetected);
            } else if change.status() != ChangeStatus::Resolved {
                change.set_status(ChangeStatus::Ok);
            }
        }

        info!(
            rewritten = batch
                .iter()
                .filter(|c| c.status() == ChangeStatus::Resolved)
                .count(),
            remaining = remaining.total(),
            "Conflict resolution complete"
        );
        Ok(remaining)
    }

    async fn probe(
        &self,
        cache: &mut HashMap<String, Result<bool, String>>,
        key: &str,
        path: &Path,
    ) -> Result<bool, String> {
        match cache.entry(key.to_string()) {
            Entry::Occupied(e) => e.get().clone(),
            Entry::Vacant(v) => {
                let result = self
                    .filesystem
                    .exists(path)
                    .await
                    .map_err(|e| format!("{e:#}"));
                v.insert(result.clone());
                result
            }
        }
    }
}

/// Whether a source is implicated in any real (non-informational) conflict
fn implicated(report: &ConflictReport, source: &Path) -> bool {
    report
        .kinds()
        .filter(|kind| *kind != ConflictKind::SameFileRename)
        .any(|kind| report.implicates(kind, source))
}
