//! Ephemeral credential artifacts for restore subprocesses.
//!
//! MySQL and PostgreSQL must not receive passwords on the command line,
//! where they would be visible in the process listing. Instead the secret is
//! written to a uniquely named temporary file which is handed to the vendor
//! tool through a flag (`--defaults-extra-file`) or an environment variable
//! (`PGPASSFILE`). The file lives only as long as the subprocess invocation:
//! dropping the artifact removes it, on every exit path including timeouts
//! and launch failures.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{RestoreError, Result};

/// A scoped credential resource for one subprocess invocation.
///
/// Owns a temporary file with the variant-specific secret material plus the
/// environment variable overrides the child process needs to find it. The
/// file name is unique per invocation, so concurrent restores never share an
/// artifact, and deletion happens exactly once via `Drop`.
#[derive(Debug)]
pub struct CredentialArtifact {
    file: NamedTempFile,
    env: Vec<(String, String)>,
}

impl CredentialArtifact {
    /// Writes `contents` to a fresh temporary file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be created or written.
    pub fn new(contents: &str) -> Result<Self> {
        let mut file = NamedTempFile::new()
            .map_err(|e| RestoreError::io("failed to create credentials file", e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| RestoreError::io("failed to write credentials file", e))?;
        file.flush()
            .map_err(|e| RestoreError::io("failed to flush credentials file", e))?;
        Ok(Self {
            file,
            env: Vec::new(),
        })
    }

    /// Adds an environment variable override for the child process.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Path of the on-disk credential file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Environment variable overrides for the child process.
    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }
}
