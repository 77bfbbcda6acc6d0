//! Restore variants and the contract they share.
//!
//! One module per supported database engine. Each variant owns a
//! [`RestoreConfig`](crate::config::RestoreConfig), exposes the shared fluent
//! builder surface plus its engine-specific toggles, and implements
//! [`DbRestorer`]: the closed set of capabilities (validation, credential
//! materialization, command rendering) the restore pipeline dispatches on.
//!
//! # Module Structure
//! - `mysql`: mysqldump with a `--defaults-extra-file` credentials file
//! - `postgres`: pg_restore with a `PGPASSFILE` exposed via the environment
//! - `mongodb`: mongodump with inline credential flags (vendor convention)
//! - `sqlite`: sqlite3 driven through a shell pipeline, no credentials

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::RestoreConfig;
use crate::credentials::CredentialArtifact;
use crate::error::Result;
use crate::process;

pub mod mongodb;
pub mod mysql;
pub mod postgres;
pub mod sqlite;

/// The supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// MySQL / MariaDB
    MySql,
    /// PostgreSQL
    PostgreSql,
    /// MongoDB
    MongoDb,
    /// SQLite
    Sqlite,
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MySql => "MySQL",
            Self::PostgreSql => "PostgreSQL",
            Self::MongoDb => "MongoDB",
            Self::Sqlite => "SQLite",
        };
        f.write_str(name)
    }
}

/// Capability contract every restore variant implements.
///
/// The trait is object-safe, so a configured variant can be handed around as
/// `Box<dyn DbRestorer>` once its builder chain is finished.
///
/// # Security
/// - Passwords never appear on the MySQL or PostgreSQL command line;
///   they travel through a scoped temp file
/// - The credential artifact is deleted on every exit path
/// - Nothing is spawned, and no file is created, until validation passes
#[async_trait]
pub trait DbRestorer: Send + Sync {
    /// The engine this variant drives.
    fn database_type(&self) -> DatabaseType;

    /// The shared configuration backing this variant.
    fn config(&self) -> &RestoreConfig;

    /// Checks that every field this variant requires is non-empty.
    ///
    /// # Errors
    /// Returns [`RestoreError::IncompleteCredentials`](crate::RestoreError::IncompleteCredentials)
    /// naming the first missing field.
    fn validate(&self) -> Result<()>;

    /// Provisions the out-of-band secret material this variant needs, if any.
    ///
    /// # Errors
    /// Returns an I/O error if the credential file cannot be written.
    fn materialize_credentials(&self) -> Result<Option<CredentialArtifact>> {
        Ok(None)
    }

    /// Renders the exact shell command line for this restore.
    ///
    /// `credentials_file` is the materialized artifact's path for variants
    /// that reference it on the command line; flag order is fixed and
    /// byte-for-byte reproducible given identical inputs.
    fn render_command(&self, dump_file: &str, credentials_file: Option<&Path>) -> String;

    /// Runs the full restore pipeline against `dump_file`.
    ///
    /// Validates, materializes credentials, renders and launches the
    /// subprocess (bounded by the configured timeout), removes the
    /// credential artifact unconditionally, then judges the outcome by exit
    /// status and the state of `dump_file`.
    ///
    /// # Errors
    /// Any of the failure kinds in [`RestoreError`](crate::RestoreError);
    /// none are retried internally.
    async fn restore_from_file(&self, dump_file: &str) -> Result<()> {
        self.validate()?;

        let credentials = self.materialize_credentials()?;
        let command_line =
            self.render_command(dump_file, credentials.as_ref().map(CredentialArtifact::path));
        let env: Vec<(String, String)> = credentials
            .as_ref()
            .map(|artifact| artifact.env().to_vec())
            .unwrap_or_default();

        debug!(
            database = %self.database_type(),
            destination = dump_file,
            "starting restore process"
        );

        let waited = process::run_shell(&command_line, &env, self.config().timeout()).await;

        // Cleanup is unconditional: the artifact must not outlive the
        // subprocess, whatever the outcome was.
        drop(credentials);

        let output = waited?;
        process::check_outcome(&output, Path::new(dump_file)).await?;

        info!(
            database = %self.database_type(),
            destination = dump_file,
            "restore completed"
        );
        Ok(())
    }
}

/// Implements the fluent configuration surface shared by every variant.
///
/// Generates the factory plus the builder methods that delegate to the
/// variant's `config` field. Each builder method consumes and returns the
/// variant, so a configuration chain owns its value exclusively; the two
/// table filter setters return `Result` because they enforce mutual
/// exclusion at the call site.
#[macro_export]
macro_rules! impl_restorer_builder {
    ($variant:ident) => {
        impl $variant {
            /// Creates a variant with its engine-specific defaults.
            pub fn create() -> Self {
                Self::default()
            }

            /// The configured database name.
            pub fn db_name(&self) -> &str {
                self.config.db_name()
            }

            /// The configured host.
            pub fn host(&self) -> &str {
                self.config.host()
            }

            /// Sets the database name (the database file path for SQLite).
            #[must_use]
            pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
                self.config.set_db_name(db_name);
                self
            }

            /// Sets the user name.
            #[must_use]
            pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
                self.config.set_user_name(user_name);
                self
            }

            /// Sets the password. It is held in zeroizing memory and never
            /// rendered into the MySQL or PostgreSQL command line.
            #[must_use]
            pub fn with_password(mut self, password: impl Into<String>) -> Self {
                self.config.set_password(password);
                self
            }

            /// Sets the host.
            #[must_use]
            pub fn with_host(mut self, host: impl Into<String>) -> Self {
                self.config.set_host(host);
                self
            }

            /// Sets the port.
            #[must_use]
            pub fn with_port(mut self, port: u16) -> Self {
                self.config.set_port(port);
                self
            }

            /// Sets the socket, which overrides host-based connection.
            #[must_use]
            pub fn with_socket(mut self, socket: impl Into<String>) -> Self {
                self.config.set_socket(socket);
                self
            }

            /// Bounds the restore subprocess; a zero duration means no limit.
            #[must_use]
            pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
                self.config.set_timeout(timeout);
                self
            }

            /// Sets the directory the vendor binary is resolved from.
            #[must_use]
            pub fn with_restore_binary_path(mut self, path: impl Into<String>) -> Self {
                self.config.set_restore_binary_path(path);
                self
            }

            /// Limits the restore to the given tables.
            ///
            /// # Errors
            /// Fails with `ConflictingParameters` if an exclude list is
            /// already set.
            pub fn only_tables(
                mut self,
                tables: impl Into<$crate::config::TableList>,
            ) -> $crate::Result<Self> {
                self.config.set_only_tables(tables.into())?;
                Ok(self)
            }

            /// Excludes the given tables from the restore.
            ///
            /// # Errors
            /// Fails with `ConflictingParameters` if an include list is
            /// already set.
            pub fn exclude_tables(
                mut self,
                tables: impl Into<$crate::config::TableList>,
            ) -> $crate::Result<Self> {
                self.config.set_exclude_tables(tables.into())?;
                Ok(self)
            }

            /// Appends a verbatim command-line fragment; empty fragments are
            /// ignored.
            #[must_use]
            pub fn add_extra_option(mut self, option: impl Into<String>) -> Self {
                self.config.add_extra_option(option);
                self
            }
        }
    };
}

// Re-export the macro at module level
pub use impl_restorer_builder;
