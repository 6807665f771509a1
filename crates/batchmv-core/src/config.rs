//! Configuration module for batchmv.
//!
//! Provides the typed engine configuration that maps to the YAML
//! configuration file, with loading, validation, and defaults. Front ends
//! (CLI flags, config files) deserialize into [`EngineConfig`] and hand it
//! to the engine once per run.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Platform};

/// Platform selection: auto-detected or explicitly overridden
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformChoice {
    /// Use the platform of the running environment
    #[default]
    Auto,
    /// Validate against Unix-like filesystem rules
    Unix,
    /// Validate against Windows filesystem rules
    Windows,
}

/// Engine configuration for one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Which platform's path rules to validate against.
    pub platform: PlatformChoice,
    /// Override for case-insensitive target comparison. `None` uses the
    /// platform default (case-insensitive on Windows, exact on Unix).
    pub case_insensitive: Option<bool>,
    /// Stem used when sanitization strips a filename down to nothing.
    pub placeholder_stem: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            platform: PlatformChoice::Auto,
            case_insensitive: None,
            placeholder_stem: "unnamed".to_string(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DomainError> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| DomainError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    ///
    /// The placeholder stem must itself be a legal filename on every
    /// platform, otherwise the resolver's fallback could re-trigger the
    /// conflict it was repairing.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.placeholder_stem.is_empty()
            || self.placeholder_stem == "."
            || self.placeholder_stem == ".."
        {
            return Err(DomainError::InvalidConfig(
                "placeholder stem must be a non-empty filename".to_string(),
            ));
        }
        if self.placeholder_stem.contains(['/', '\\', '\0']) {
            return Err(DomainError::InvalidConfig(format!(
                "placeholder stem contains a path separator: {}",
                self.placeholder_stem
            )));
        }
        Ok(())
    }

    /// The platform whose rules apply to this run
    #[must_use]
    pub fn effective_platform(&self) -> Platform {
        match self.platform {
            PlatformChoice::Auto => Platform::current(),
            PlatformChoice::Unix => Platform::Unix,
            PlatformChoice::Windows => Platform::Windows,
        }
    }

    /// Whether target paths are compared case-insensitively this run
    #[must_use]
    pub fn effective_case_insensitive(&self) -> bool {
        self.case_insensitive
            .unwrap_or_else(|| self.effective_platform().case_insensitive())
    }
}
