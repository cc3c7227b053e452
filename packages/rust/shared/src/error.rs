//! Error types for stackconf.
//!
//! [`SettingsError`] is what every settings operation returns. Failures that
//! originate in the parameter store travel inside it as [`StoreError`],
//! untouched, so callers can still reach the provider's own error.

use std::path::PathBuf;

/// Boxed provider error carried by [`StoreError::Backend`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A path segment is missing or does not match `[A-Za-z0-9_.-]+`.
    #[error("validation error: invalid {field} value: {value:?}")]
    Validation { field: &'static str, value: String },

    /// A property segment was given without a context segment.
    #[error("Missing context!")]
    MissingContext,

    /// The listing succeeded but nothing is stored under the prefix.
    #[error("context not configured: {path}")]
    ContextNotConfigured { path: String },

    /// Failure reported by the parameter store, passed through as-is.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SettingsError>;

impl SettingsError {
    /// Create a validation error for the named path segment.
    pub fn validation(field: &'static str, value: impl Into<String>) -> Self {
        Self::Validation {
            field,
            value: value.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is the "nothing stored under the prefix" condition.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::ContextNotConfigured { .. })
    }
}

/// Errors surfaced by a `ParameterStore` implementation (see `stackconf-core`).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Delete targeted a parameter that does not exist.
    #[error("parameter not found: {name}")]
    NotFound { name: String },

    /// Put without overwrite targeted a parameter that already exists.
    #[error("parameter already exists: {name}")]
    AlreadyExists { name: String },

    /// Any other provider failure (network, permissions, throttling).
    #[error("store error: {0}")]
    Backend(#[source] BoxError),
}

impl StoreError {
    /// Wrap a provider error.
    pub fn backend(err: impl Into<BoxError>) -> Self {
        Self::Backend(err.into())
    }

    /// Whether the store signalled a missing parameter.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
