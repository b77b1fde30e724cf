//! Error types with actionable diagnostics.
//!
//! All errors include enough context for users to resolve the problem
//! without consulting external documentation. Validation failures carry
//! the full issue list through [`ValidationReport`].
//!
//! [`ValidationReport`]: crate::validate::ValidationReport

use std::path::PathBuf;
use thiserror::Error;

use crate::validate::ValidationReport;

/// Result type alias for evaluar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when loading, saving, or checking configurations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found at the expected path.
    #[error("Configuration file not found: {path}\n  → Create the file or pass a different path")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file has invalid syntax.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check the YAML/JSON at the indicated location")]
    ConfigParsing { path: PathBuf, message: String },

    /// Path has an extension the loader does not recognize.
    #[error("Unsupported config format: {path}\n  → Supported extensions: .yaml, .yml, .json")]
    UnsupportedFormat { path: PathBuf },

    /// Configuration failed cross-field validation.
    #[error("{0}")]
    Validation(#[from] ValidationReport),

    /// Run record was written by an incompatible schema version.
    #[error("Unsupported run record version: {version}\n  → Supported versions: {supported}")]
    UnsupportedVersion { version: String, supported: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error outside of config parsing.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Whether the error is something the user can fix by editing inputs,
    /// as opposed to an environment or internal failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParsing { .. }
                | Self::UnsupportedFormat { .. }
                | Self::Validation(_)
                | Self::UnsupportedVersion { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialization { message: e.to_string() }
    }
}
