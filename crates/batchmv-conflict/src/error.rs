//! Error types for the conflict engine

use thiserror::Error;

/// Errors that can occur during conflict resolution
///
/// Detection never fails: malformed targets and probe failures are reported
/// as conflicts, not errors.
#[derive(Debug, Error)]
pub enum ConflictError {
    /// Every candidate name up to the attempt bound was taken
    #[error("no available name for {target} after {attempts} attempts")]
    NameExhausted { target: String, attempts: u32 },
}
