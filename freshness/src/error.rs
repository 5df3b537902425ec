//! Freshness error types.
//!
//! [`ConfigError`] covers every way a rule set or default can be rejected at
//! engine construction. [`FreshnessError`] is the crate-level error used by
//! config loading and the provider wrapper.

use thiserror::Error;

pub type FreshnessResult<T> = Result<T, FreshnessError>;

#[derive(Debug, Error)]
pub enum FreshnessError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool execution failed: {0}")]
    ToolExecution(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Rule and default validation errors.
///
/// Rule-level variants carry the zero-based position of the rule and its
/// declared pattern so misconfiguration is diagnosable at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("rule #{index}: 'pattern' must be a non-empty string")]
    EmptyPattern { index: usize },

    #[error(
        "rule #{index} ('{pattern}'): 'pattern' segment '{segment}' is invalid \
         (expected [A-Za-z0-9_-]+, '*' or '**')"
    )]
    InvalidSegment {
        index: usize,
        pattern: String,
        segment: String,
    },

    #[error(
        "rule #{index} ('{pattern}'): 'directive' value '{value}' is invalid \
         (expected \"no-store\" or \"immutable\")"
    )]
    InvalidDirective {
        index: usize,
        pattern: String,
        value: String,
    },

    #[error("rule #{index} ('{pattern}'): 'invalidates' must be an array, got {found}")]
    InvalidationsNotArray {
        index: usize,
        pattern: String,
        found: String,
    },

    #[error("rule #{index} ('{pattern}'): 'invalidates[{position}]' must be a string")]
    InvalidationNotString {
        index: usize,
        pattern: String,
        position: usize,
    },

    #[error("rule #{index} ('{pattern}'): 'invalidates[{position}]' must not be empty")]
    EmptyInvalidation {
        index: usize,
        pattern: String,
        position: usize,
    },

    #[error(
        "defaults: 'directive' value '{value}' is invalid \
         (expected \"no-store\" or \"immutable\")"
    )]
    InvalidDefaultDirective { value: String },
}

impl ConfigError {
    /// Position of the offending rule, `None` for default-level errors.
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            ConfigError::EmptyPattern { index }
            | ConfigError::InvalidSegment { index, .. }
            | ConfigError::InvalidDirective { index, .. }
            | ConfigError::InvalidationsNotArray { index, .. }
            | ConfigError::InvalidationNotString { index, .. }
            | ConfigError::EmptyInvalidation { index, .. } => Some(*index),
            ConfigError::InvalidDefaultDirective { .. } => None,
        }
    }
}
