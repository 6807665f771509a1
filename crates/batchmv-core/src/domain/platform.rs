//! Target platform selection
//!
//! Path legality rules differ between Windows and Unix-like filesystems.
//! The platform is selected once per run: auto-detected from the running
//! environment or explicitly overridden (useful for tests and for staging
//! renames destined for a foreign filesystem).

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// The filesystem family whose naming rules apply to a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Unix-like filesystems (Linux, macOS, BSD)
    Unix,
    /// Windows filesystems (NTFS, FAT variants)
    Windows,
}

impl Platform {
    /// Detects the platform of the running environment
    #[must_use]
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Whether target paths should be compared case-insensitively by default
    ///
    /// Windows filesystems are case-insensitive in practice; Unix-like
    /// filesystems are compared exactly. Callers can override this per run
    /// via [`crate::config::EngineConfig`].
    #[must_use]
    pub fn case_insensitive(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unix => "unix",
            Self::Windows => "windows",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unix" => Ok(Self::Unix),
            "windows" => Ok(Self::Windows),
            other => Err(DomainError::InvalidPlatform(other.to_string())),
        }
    }
}
