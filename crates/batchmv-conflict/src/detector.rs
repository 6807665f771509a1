//! Conflict detection over a batch of proposed renames
//!
//! Scans the full batch and produces a [`ConflictReport`] from three
//! inputs: the platform rule set, the batch itself (target collisions), and
//! the live filesystem (existing-file collisions). Detection is read-only:
//! it never mutates a [`Change`] and is idempotent given an unchanged
//! filesystem.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use batchmv_core::{
    config::EngineConfig,
    domain::{Change, Conflict, ConflictKind, ConflictReport, Platform},
    ports::IFileSystem,
};

use crate::rules;

/// Detects every conflict that would make a batch unsafe to apply
pub struct ConflictDetector {
    filesystem: Arc<dyn IFileSystem>,
    platform: Platform,
    case_insensitive: bool,
}

impl ConflictDetector {
    /// Creates a detector for the given platform's rules
    ///
    /// Target comparison follows the platform default (case-insensitive on
    /// Windows); override with [`Self::with_case_insensitive`].
    pub fn new(filesystem: Arc<dyn IFileSystem>, platform: Platform) -> Self {
        Self {
            filesystem,
            platform,
            case_insensitive: platform.case_insensitive(),
        }
    }

    /// Creates a detector from engine configuration
    pub fn from_config(filesystem: Arc<dyn IFileSystem>, config: &EngineConfig) -> Self {
        Self {
            filesystem,
            platform: config.effective_platform(),
            case_insensitive: config.effective_case_insensitive(),
        }
    }

    /// Overrides case folding for target comparison
    #[must_use]
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// The platform whose rules this detector applies
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Collision key for a resolved path: case-folded only when the
    /// filesystem is known case-insensitive, otherwise exact
    pub(crate) fn normalize(&self, path: &Path) -> String {
        let s = path.to_string_lossy();
        if self.case_insensitive {
            s.to_lowercase()
        } else {
            s.into_owned()
        }
    }

    /// Produces the complete conflict report for a batch
    ///
    /// Pure predicate checks run data-parallel across the batch; the
    /// collision map and filesystem probes then run sequentially over the
    /// collected targets, probing each unique target at most once.
    pub async fn detect(&self, batch: &[Change]) -> ConflictReport {
        let mut report = ConflictReport::new();

        // No-op renames are skip markers, excluded from every other check
        let active: Vec<bool> = batch.iter().map(|c| !c.is_no_op()).collect();
        for change in batch.iter().filter(|c| c.is_no_op()) {
            debug!(source = %change.source().display(), "Skipping same-file rename");
            report.add(Conflict::new(
                ConflictKind::SameFileRename,
                change.resolved_source(),
                change.resolved_target(),
                "source and target are identical",
            ));
        }

        // Per-change rule predicates; collect preserves batch order
        let findings: Vec<Vec<(ConflictKind, String)>> = batch
            .par_iter()
            .zip(active.par_iter())
            .map(|(change, active)| {
                if *active {
                    predicate_findings(self.platform, change)
                } else {
                    Vec::new()
                }
            })
            .collect();

        for (change, found) in batch.iter().zip(findings) {
            for (kind, cause) in found {
                report.add(Conflict::new(
                    kind,
                    change.resolved_source(),
                    change.resolved_target(),
                    cause,
                ));
            }
        }

        // Target collision map, keyed by normalized target, first-seen order
        let mut order: Vec<String> = Vec::new();
        let mut contributors: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, change) in batch.iter().enumerate() {
            if !active[i] {
                continue;
            }
            let key = self.normalize(&change.resolved_target());
            let entry = contributors.entry(key.clone()).or_default();
            if entry.is_empty() {
                order.push(key);
            }
            entry.push(i);
        }

        for key in &order {
            let indices = &contributors[key];
            if indices.len() > 1 {
                let sources = indices
                    .iter()
                    .map(|&i| batch[i].resolved_source())
                    .collect();
                report.add(Conflict::with_sources(
                    ConflictKind::DuplicateTarget,
                    sources,
                    batch[indices[0]].resolved_target(),
                    format!("{} changes share this target", indices.len()),
                ));
            }
        }

        // Existence probes, cached per unique normalized target. A target
        // matching a batch source is not a collision: that source is being
        // renamed away. Probe failures become per-change conflicts so one
        // bad path cannot block the rest of the batch.
        let source_keys: HashSet<String> = batch
            .iter()
            .enumerate()
            .filter(|(i, _)| active[*i])
            .map(|(_, c)| self.normalize(&c.resolved_source()))
            .collect();

        let mut cache: HashMap<String, Result<bool, String>> = HashMap::new();
        for (i, change) in batch.iter().enumerate() {
            if !active[i] {
                continue;
            }
            let target = change.resolved_target();
            let key = self.normalize(&target);
            if contributors[&key].len() > 1 {
                continue; // already flagged as a duplicate target
            }
            let probed = match cache.entry(key.clone()) {
                Entry::Occupied(e) => e.get().clone(),
                Entry::Vacant(v) => {
                    let result = self
                        .filesystem
                        .exists(&target)
                        .await
                        .map_err(|e| format!("{e:#}"));
                    v.insert(result.clone());
                    result
                }
            };
            match probed {
                Ok(true) if !source_keys.contains(&key) => {
                    report.add(Conflict::new(
                        ConflictKind::TargetExists,
                        change.resolved_source(),
                        target,
                        "already exists on disk",
                    ));
                }
                Ok(_) => {}
                Err(cause) => {
                    report.add(Conflict::new(
                        ConflictKind::ProbeFailed,
                        change.resolved_source(),
                        target,
                        cause,
                    ));
                }
            }
        }

        info!(
            changes = batch.len(),
            conflicts = report.total(),
            platform = %self.platform,
            "Conflict detection complete"
        );
        report
    }
}

/// Pure rule checks for one change's proposed target
///
/// An empty filename segment short-circuits: the other predicates are
/// meaningless without a name to inspect.
fn predicate_findings(platform: Platform, change: &Change) -> Vec<(ConflictKind, String)> {
    let segment = rules::filename_segment(platform, change.target());
    if rules::is_empty_segment(segment) {
        return vec![(ConflictKind::EmptyFilename, String::new())];
    }

    let mut found = Vec::new();

    let chars = rules::illegal_characters(platform, segment);
    if !chars.is_empty() {
        found.push((
            ConflictKind::InvalidCharacters,
            rules::join_characters(&chars),
        ));
    }

    // Directory segments of the target are checked too, not just the
    // filename: "dir...\name.mkv" is as unrepresentable as "name.mkv."
    if rules::has_trailing_forbidden_path(platform, change.target()) {
        found.push((ConflictKind::TrailingPeriod, String::new()));
    }

    if let Some(name) = rules::reserved_name(platform, segment) {
        found.push((ConflictKind::ReservedName, name.to_string()));
    }

    let full_path = change.resolved_target();
    if let Some(cause) =
        rules::length_violation(platform, segment, &full_path.to_string_lossy())
    {
        found.push((ConflictKind::MaxLengthExceeded, cause));
    }

    found
}
