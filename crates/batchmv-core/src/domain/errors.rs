//! Domain error types

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown platform tag (expected `unix` or `windows`)
    #[error("Invalid platform: {0}")]
    InvalidPlatform(String),

    /// Invalid path format or content
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidPlatform("macos".to_string());
        assert_eq!(err.to_string(), "Invalid platform: macos");

        let err = DomainError::InvalidConfig("placeholder stem is empty".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: placeholder stem is empty"
        );
    }

    #[test]
    fn test_error_equality() {
        let err1 = DomainError::InvalidPath("/path".to_string());
        let err2 = DomainError::InvalidPath("/path".to_string());
        assert_eq!(err1, err2);
    }
}
