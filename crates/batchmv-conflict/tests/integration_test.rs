//! Integration test: full batch validation against a real filesystem
//!
//! Uses a real temporary directory to verify the whole flow: detect
//! conflicts against files on disk, auto-fix, and confirm the corrected
//! batch is safe to hand to an executor.

use std::fs;
use std::sync::Arc;

use batchmv_conflict::{
    ConflictDetector, ConflictResolver, LocalFileSystemAdapter, ValidateBatchUseCase,
};
use batchmv_core::{
    config::{EngineConfig, PlatformChoice},
    domain::{Change, ChangeStatus, ConflictKind, Platform},
    ports::IFileSystem,
};

fn engine_config() -> EngineConfig {
    EngineConfig {
        platform: PlatformChoice::Unix,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_detects_collision_with_files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    fs::write(base.join("abc.pdf"), b"source").unwrap();
    fs::write(base.join("taken.pdf"), b"existing").unwrap();

    let fs_port: Arc<dyn IFileSystem> = Arc::new(LocalFileSystemAdapter::new());
    let detector = ConflictDetector::new(Arc::clone(&fs_port), Platform::Unix);

    let batch = vec![Change::new("abc.pdf", base, "taken.pdf")];
    let report = detector.detect(&batch).await;

    let found = report.of_kind(ConflictKind::TargetExists);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].target(), base.join("taken.pdf"));
}

#[tokio::test]
async fn test_fix_probes_real_directory_for_free_names() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    fs::write(base.join("abc.pdf"), b"source").unwrap();
    fs::write(base.join("report.pdf"), b"existing").unwrap();
    fs::write(base.join("report (1).pdf"), b"also existing").unwrap();

    let fs_port: Arc<dyn IFileSystem> = Arc::new(LocalFileSystemAdapter::new());
    let detector = ConflictDetector::new(Arc::clone(&fs_port), Platform::Unix);
    let resolver = ConflictResolver::new(Arc::clone(&fs_port), Platform::Unix);

    let mut batch = vec![Change::new("abc.pdf", base, "report.pdf")];
    let report = detector.detect(&batch).await;
    let remaining = resolver.resolve(&mut batch, &report).await.unwrap();

    assert!(remaining.is_empty());
    assert_eq!(batch[0].target(), "report (2).pdf");
    assert_eq!(batch[0].status(), ChangeStatus::Resolved);
}

#[tokio::test]
async fn test_sources_being_renamed_away_are_not_collisions() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    fs::write(base.join("a.pdf"), b"a").unwrap();
    fs::write(base.join("b.pdf"), b"b").unwrap();

    let fs_port: Arc<dyn IFileSystem> = Arc::new(LocalFileSystemAdapter::new());
    let detector = ConflictDetector::new(fs_port, Platform::Unix);

    // Swap: both targets exist on disk but are batch sources
    let batch = vec![
        Change::new("a.pdf", base, "b.pdf"),
        Change::new("b.pdf", base, "a.pdf"),
    ];
    let report = detector.detect(&batch).await;
    assert!(report.is_empty());
}

#[tokio::test]
async fn test_full_validate_and_fix_flow() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    for name in ["one.txt", "two.txt", "three.txt", "occupied.txt"] {
        fs::write(base.join(name), name).unwrap();
    }

    // Upstream pattern stage mapped every .txt to the same target, one of
    // which also exists on disk.
    let mut batch = vec![
        Change::new("one.txt", base, "occupied.txt"),
        Change::new("two.txt", base, "occupied.txt"),
        Change::new("three.txt", base, "keep.txt"),
    ];

    let use_case = ValidateBatchUseCase::new(
        Arc::new(LocalFileSystemAdapter::new()),
        &engine_config(),
        true,
    );
    let outcome = use_case.run(&mut batch).await.unwrap();

    assert!(outcome.report.is_empty());
    assert!(outcome.is_applicable());

    // Final targets are unique and none collides with a file that is not
    // being renamed away.
    let targets: Vec<&str> = batch.iter().map(Change::target).collect();
    assert_eq!(targets, ["occupied (1).txt", "occupied (2).txt", "keep.txt"]);

    // The corrected batch can be executed without clobbering anything
    for change in &batch {
        fs::rename(change.resolved_source(), change.resolved_target()).unwrap();
    }
    assert!(base.join("occupied.txt").exists());
    assert!(base.join("keep.txt").exists());
}
