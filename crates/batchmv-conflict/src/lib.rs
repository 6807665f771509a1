//! batchmv Conflict - Conflict detection and resolution
//!
//! Provides:
//! - Platform-gated path legality rules (Windows and Unix)
//! - Batch-wide conflict detection with a typed, per-kind report
//! - Deterministic automatic resolution (sanitize, suffix, truncate)
//! - A local filesystem adapter for existence probes

pub mod detector;
pub mod error;
pub mod filesystem;
pub mod namer;
pub mod resolver;
pub mod rules;
pub mod use_cases;

pub use detector::ConflictDetector;
pub use error::ConflictError;
pub use filesystem::LocalFileSystemAdapter;
pub use resolver::ConflictResolver;
pub use use_cases::{BatchOutcome, ValidateBatchUseCase};

#[cfg(test)]
pub(crate) mod testing;
