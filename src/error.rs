//! Error types for the restore pipeline.
//!
//! Every failure a restore can produce is a distinct variant so callers can
//! tell a configuration mistake apart from a subprocess failure or a bad
//! output artifact. None of these are retried internally; retry policy
//! belongs to the caller.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Main error type for restore operations.
///
/// # Security
/// Error messages never include passwords or credential file contents.
/// Captured stderr from the vendor tool is passed through as-is.
#[derive(Debug, Error)]
pub enum RestoreError {
    /// Two mutually exclusive parameters were set together
    #[error("cannot set `{name}` because it conflicts with parameter `{conflicts_with}`")]
    ConflictingParameters {
        name: String,
        conflicts_with: String,
    },

    /// A mandatory field was empty or unset at restore time
    #[error("parameter `{parameter}` cannot be empty")]
    IncompleteCredentials { parameter: String },

    /// The restore subprocess could not be spawned at all
    #[error("cannot start the restore process: {context}")]
    Launch {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The restore subprocess exited with a non-zero status
    #[error("the restore process did not end successfully ({status}): {stderr}")]
    ExecutionFailed { status: ExitStatus, stderr: String },

    /// The subprocess exited cleanly but the output file could not be read
    #[error("the restore file `{}` could not be read", path.display())]
    OutputUnreadable { path: PathBuf },

    /// The subprocess exited cleanly but the output file is empty
    #[error("the restore file `{}` is empty", path.display())]
    OutputEmpty { path: PathBuf },

    /// The subprocess did not finish within the configured timeout
    #[error("the restore process exceeded the timeout of {limit:?} and was terminated")]
    Timeout { limit: Duration },

    /// Configuration or environment setup error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed (temp file handling, output inspection)
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results with `RestoreError`
pub type Result<T> = std::result::Result<T, RestoreError>;

impl RestoreError {
    /// Creates a conflicting-parameters error for mutually exclusive settings
    pub fn conflicting_parameters(
        name: impl Into<String>,
        conflicts_with: impl Into<String>,
    ) -> Self {
        Self::ConflictingParameters {
            name: name.into(),
            conflicts_with: conflicts_with.into(),
        }
    }

    /// Creates an incomplete-credentials error for a missing required field
    pub fn incomplete_credentials(parameter: impl Into<String>) -> Self {
        Self::IncompleteCredentials {
            parameter: parameter.into(),
        }
    }

    /// Creates a launch error for a subprocess that could not be spawned
    pub fn launch(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            context: context.into(),
            source,
        }
    }

    /// Creates an execution-failed error from the child's exit status and stderr
    pub fn execution_failed(status: ExitStatus, stderr: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            status,
            stderr: stderr.into(),
        }
    }

    /// Creates an error for an unreadable restore output file
    pub fn output_unreadable(path: impl Into<PathBuf>) -> Self {
        Self::OutputUnreadable { path: path.into() }
    }

    /// Creates an error for an empty restore output file
    pub fn output_empty(path: impl Into<PathBuf>) -> Self {
        Self::OutputEmpty { path: path.into() }
    }

    /// Creates a timeout error carrying the configured limit
    pub fn timeout(limit: Duration) -> Self {
        Self::Timeout { limit }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
