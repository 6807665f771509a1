//! Domain entities and business logic
//!
//! This module contains the core domain types for batchmv:
//! - Proposed rename changes and their lifecycle status
//! - Conflict entities and the per-kind conflict report
//! - Target platform selection for path legality rules
//! - Domain-specific error types

pub mod change;
pub mod conflict;
pub mod errors;
pub mod platform;

// Re-export commonly used types
pub use change::{Change, ChangeStatus};
pub use conflict::{Conflict, ConflictKind, ConflictReport};
pub use errors::DomainError;
pub use platform::Platform;
