//! PostgreSQL restore variant.
//!
//! Drives `pg_restore` with the password delivered through a temporary
//! pgpass file referenced by the `PGPASSFILE` environment variable;
//! `PGDATABASE` is set alongside it. Inclusion (`-t`) and exclusion (`-T`)
//! are both expressible at the flag level, but the configuration layer still
//! forbids setting both lists.

use std::path::Path;

use crate::config::{RequiredParameter, RestoreConfig};
use crate::credentials::CredentialArtifact;
use crate::error::Result;
use crate::impl_restorer_builder;
use crate::restorers::{DatabaseType, DbRestorer};

const DEFAULT_PORT: u16 = 5432;

/// Restore variant for PostgreSQL.
#[derive(Debug, Clone)]
pub struct PostgreSql {
    config: RestoreConfig,
    use_inserts: bool,
}

impl Default for PostgreSql {
    fn default() -> Self {
        Self {
            config: RestoreConfig::with_default_port(DEFAULT_PORT),
            use_inserts: false,
        }
    }
}

impl_restorer_builder!(PostgreSql);

impl PostgreSql {
    /// Requests `INSERT`-style statements. Accepted for configuration parity
    /// with the dump-side tooling; `pg_restore` has no matching flag, so it
    /// is not rendered.
    #[must_use]
    pub fn use_inserts(mut self) -> Self {
        self.use_inserts = true;
        self
    }

    /// Reverts to the default statement style.
    #[must_use]
    pub fn dont_use_inserts(mut self) -> Self {
        self.use_inserts = false;
        self
    }

    /// Renders the single pgpass line written to the temporary credentials
    /// file: colon-joined `host:port:db:user:password`.
    pub fn credentials_file_contents(&self) -> String {
        [
            self.config.host().to_string(),
            self.config.port().to_string(),
            self.config.db_name().to_string(),
            self.config.user_name().unwrap_or_default().to_string(),
            self.config.password().unwrap_or_default().to_string(),
        ]
        .join(":")
    }
}

impl DbRestorer for PostgreSql {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::PostgreSql
    }

    fn config(&self) -> &RestoreConfig {
        &self.config
    }

    fn validate(&self) -> Result<()> {
        self.config.guard_required(&[
            RequiredParameter::UserName,
            RequiredParameter::DbName,
            RequiredParameter::Host,
        ])
    }

    fn materialize_credentials(&self) -> Result<Option<CredentialArtifact>> {
        let artifact = CredentialArtifact::new(&self.credentials_file_contents())?;
        let path = artifact.path().display().to_string();
        Ok(Some(
            artifact
                .with_env("PGPASSFILE", path)
                .with_env("PGDATABASE", self.config.db_name()),
        ))
    }

    fn render_command(&self, dump_file: &str, _credentials_file: Option<&Path>) -> String {
        let mut command = vec![
            format!("'{}pg_restore'", self.config.restore_binary_path()),
            format!("-U {}", self.config.user_name().unwrap_or_default()),
            format!("-h {}", self.config.socket_or_host()),
            format!("-p {}", self.config.port()),
        ];

        command.extend(self.config.extra_options().iter().cloned());

        if !self.config.db_name().is_empty() {
            command.push(format!("-d {}", self.config.db_name()));
        }

        for table in self.config.only_tables() {
            command.push(format!("-t {table}"));
        }

        for table in self.config.exclude_tables() {
            command.push(format!("-T {table}"));
        }

        command.push(dump_file.to_string());

        command.join(" ")
    }
}
