//! Conflict domain entities
//!
//! A [`Conflict`] records one detected reason a proposed target cannot be
//! safely applied as-is. Conflicts are ephemeral: they are recomputed on
//! every detection pass and never persisted. The [`ConflictReport`] groups
//! them by kind, preserving batch order within each kind.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Classification of a detected conflict
///
/// A single change may appear under several kinds; each kind is checked
/// independently.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Target filename segment is empty, `.`, or `..`
    EmptyFilename,
    /// (Windows) filename ends with a period or a space
    TrailingPeriod,
    /// Filename contains a platform-illegal character
    InvalidCharacters,
    /// (Windows) filename is a reserved device name (CON, PRN, ...)
    ReservedName,
    /// Filename or path exceeds the platform length limit
    MaxLengthExceeded,
    /// Target already exists on disk and is not a batch source
    TargetExists,
    /// Two or more changes map to the same target
    DuplicateTarget,
    /// Source and target resolve to the identical path (no-op skip marker)
    SameFileRename,
    /// Filesystem existence query failed for the target
    ProbeFailed,
}

impl ConflictKind {
    /// Whether the resolver can deterministically repair this kind
    ///
    /// `EmptyFilename` has no safe synthetic name; `ProbeFailed` means the
    /// filesystem could not be consulted; `SameFileRename` is not an error
    /// at all, merely a skip marker.
    #[must_use]
    pub fn is_fixable(&self) -> bool {
        matches!(
            self,
            Self::TrailingPeriod
                | Self::InvalidCharacters
                | Self::ReservedName
                | Self::MaxLengthExceeded
                | Self::TargetExists
                | Self::DuplicateTarget
        )
    }
}

impl Display for ConflictKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::EmptyFilename => "empty_filename",
            Self::TrailingPeriod => "trailing_period",
            Self::InvalidCharacters => "invalid_characters",
            Self::ReservedName => "reserved_name",
            Self::MaxLengthExceeded => "max_length_exceeded",
            Self::TargetExists => "target_exists",
            Self::DuplicateTarget => "duplicate_target",
            Self::SameFileRename => "same_file_rename",
            Self::ProbeFailed => "probe_failed",
        };
        write!(f, "{s}")
    }
}

/// One detected problem with a proposed target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Classification tag
    kind: ConflictKind,
    /// Resolved source paths implicated, in batch order (more than one for
    /// target collisions)
    sources: Vec<PathBuf>,
    /// The offending resolved target path
    target: PathBuf,
    /// Human-readable detail (offending characters, observed length, ...)
    cause: String,
}

impl Conflict {
    /// Creates a conflict implicating a single source
    pub fn new(
        kind: ConflictKind,
        source: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            sources: vec![source.into()],
            target: target.into(),
            cause: cause.into(),
        }
    }

    /// Creates a conflict implicating several sources (target collisions)
    pub fn with_sources(
        kind: ConflictKind,
        sources: Vec<PathBuf>,
        target: impl Into<PathBuf>,
        cause: impl Into<String>,
    ) -> Self {
        debug_assert!(!sources.is_empty());
        Self {
            kind,
            sources,
            target: target.into(),
            cause: cause.into(),
        }
    }

    /// Returns the conflict kind
    pub fn kind(&self) -> ConflictKind {
        self.kind
    }

    /// Returns the implicated source paths in batch order
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Returns the offending target path
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Returns the human-readable detail
    pub fn cause(&self) -> &str {
        &self.cause
    }
}

/// All conflicts found in one detection pass, grouped by kind
///
/// Iteration over kinds is ordered (taxonomy order); within a kind,
/// conflicts appear in the order their changes were presented in the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    conflicts: BTreeMap<ConflictKind, Vec<Conflict>>,
}

impl ConflictReport {
    /// Creates an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a conflict to its kind's bucket
    pub fn add(&mut self, conflict: Conflict) {
        self.conflicts
            .entry(conflict.kind())
            .or_default()
            .push(conflict);
    }

    /// Returns all conflicts of one kind, in batch order
    pub fn of_kind(&self, kind: ConflictKind) -> &[Conflict] {
        self.conflicts.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// True when no conflicts of any kind were found
    pub fn is_empty(&self) -> bool {
        self.conflicts.values().all(Vec::is_empty)
    }

    /// Total number of conflicts across all kinds
    pub fn total(&self) -> usize {
        self.conflicts.values().map(Vec::len).sum()
    }

    /// True when at least one automatically repairable conflict remains
    pub fn has_fixable(&self) -> bool {
        self.conflicts
            .iter()
            .any(|(kind, list)| kind.is_fixable() && !list.is_empty())
    }

    /// Iterates over non-empty kinds in taxonomy order
    pub fn kinds(&self) -> impl Iterator<Item = ConflictKind> + '_ {
        self.conflicts
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(kind, _)| *kind)
    }

    /// Iterates over every conflict, kinds in taxonomy order
    pub fn iter(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts.values().flatten()
    }

    /// True when the given resolved source path is implicated under `kind`
    pub fn implicates(&self, kind: ConflictKind, source: &Path) -> bool {
        self.of_kind(kind)
            .iter()
            .any(|c| c.sources().iter().any(|s| s == source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_fixability() {
        assert!(ConflictKind::InvalidCharacters.is_fixable());
        assert!(ConflictKind::DuplicateTarget.is_fixable());
        assert!(ConflictKind::TargetExists.is_fixable());
        assert!(!ConflictKind::EmptyFilename.is_fixable());
        assert!(!ConflictKind::SameFileRename.is_fixable());
        assert!(!ConflictKind::ProbeFailed.is_fixable());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&ConflictKind::MaxLengthExceeded).unwrap();
        assert_eq!(json, "\"max_length_exceeded\"");

        let parsed: ConflictKind = serde_json::from_str("\"duplicate_target\"").unwrap();
        assert_eq!(parsed, ConflictKind::DuplicateTarget);
    }

    #[test]
    fn test_report_groups_by_kind_in_order() {
        let mut report = ConflictReport::new();
        report.add(Conflict::new(
            ConflictKind::InvalidCharacters,
            "/data/a.pdf",
            "/data/<>.pdf",
            "<,>",
        ));
        report.add(Conflict::new(
            ConflictKind::InvalidCharacters,
            "/data/b.pdf",
            "/data/:|.pdf",
            ":,|",
        ));

        let found = report.of_kind(ConflictKind::InvalidCharacters);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].sources(), [PathBuf::from("/data/a.pdf")]);
        assert_eq!(found[1].sources(), [PathBuf::from("/data/b.pdf")]);
        assert_eq!(report.total(), 2);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_empty_report() {
        let report = ConflictReport::new();
        assert!(report.is_empty());
        assert!(!report.has_fixable());
        assert_eq!(report.total(), 0);
        assert!(report.of_kind(ConflictKind::TargetExists).is_empty());
    }

    #[test]
    fn test_has_fixable_ignores_informational_kinds() {
        let mut report = ConflictReport::new();
        report.add(Conflict::new(
            ConflictKind::SameFileRename,
            "/data/a.pdf",
            "/data/a.pdf",
            "",
        ));
        report.add(Conflict::new(
            ConflictKind::EmptyFilename,
            "/data/b.pdf",
            "/data/",
            "",
        ));
        assert!(!report.has_fixable());

        report.add(Conflict::new(
            ConflictKind::TargetExists,
            "/data/c.pdf",
            "/data/existing.pdf",
            "",
        ));
        assert!(report.has_fixable());
    }

    #[test]
    fn test_implicates() {
        let mut report = ConflictReport::new();
        report.add(Conflict::with_sources(
            ConflictKind::DuplicateTarget,
            vec![PathBuf::from("/data/a.pdf"), PathBuf::from("/data/b.pdf")],
            "/data/same.pdf",
            "",
        ));

        assert!(report.implicates(ConflictKind::DuplicateTarget, Path::new("/data/b.pdf")));
        assert!(!report.implicates(ConflictKind::DuplicateTarget, Path::new("/data/c.pdf")));
        assert!(!report.implicates(ConflictKind::TargetExists, Path::new("/data/a.pdf")));
    }

    #[test]
    fn test_report_serialization_round_trip() {
        let mut report = ConflictReport::new();
        report.add(Conflict::new(
            ConflictKind::MaxLengthExceeded,
            "/data/abc.pdf",
            "/data/long.pdf",
            "255 bytes",
        ));

        let json = serde_json::to_string(&report).unwrap();
        let parsed: ConflictReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
