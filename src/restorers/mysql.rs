//! MySQL restore variant.
//!
//! Drives `mysqldump` with credentials delivered through a temporary
//! `--defaults-extra-file`, keeping the password off the command line.
//! Exclusions render as one `--ignore-table=db.table` flag per table, always
//! qualified with the configured database name; inclusions render as a
//! trailing positional table list.

use std::path::Path;

use crate::config::{RequiredParameter, RestoreConfig};
use crate::credentials::CredentialArtifact;
use crate::error::Result;
use crate::impl_restorer_builder;
use crate::restorers::{DatabaseType, DbRestorer};

const DEFAULT_PORT: u16 = 3306;

/// Restore variant for MySQL / MariaDB.
#[derive(Debug, Clone)]
pub struct MySql {
    config: RestoreConfig,
    skip_comments: bool,
    use_extended_inserts: bool,
    use_single_transaction: bool,
    default_character_set: String,
}

impl Default for MySql {
    fn default() -> Self {
        Self {
            config: RestoreConfig::with_default_port(DEFAULT_PORT),
            skip_comments: true,
            use_extended_inserts: true,
            use_single_transaction: false,
            default_character_set: String::new(),
        }
    }
}

impl_restorer_builder!(MySql);

impl MySql {
    /// Omits comments from the dump (the default).
    #[must_use]
    pub fn skip_comments(mut self) -> Self {
        self.skip_comments = true;
        self
    }

    /// Keeps comments in the dump.
    #[must_use]
    pub fn dont_skip_comments(mut self) -> Self {
        self.skip_comments = false;
        self
    }

    /// Uses multi-row `INSERT` syntax (the default).
    #[must_use]
    pub fn use_extended_inserts(mut self) -> Self {
        self.use_extended_inserts = true;
        self
    }

    /// Uses one `INSERT` statement per row.
    #[must_use]
    pub fn dont_use_extended_inserts(mut self) -> Self {
        self.use_extended_inserts = false;
        self
    }

    /// Wraps the operation in a single transaction.
    #[must_use]
    pub fn use_single_transaction(mut self) -> Self {
        self.use_single_transaction = true;
        self
    }

    /// Disables the single-transaction wrapper (the default).
    #[must_use]
    pub fn dont_use_single_transaction(mut self) -> Self {
        self.use_single_transaction = false;
        self
    }

    /// Sets the character set passed via `--default-character-set`.
    #[must_use]
    pub fn with_default_character_set(mut self, character_set: impl Into<String>) -> Self {
        self.default_character_set = character_set.into();
        self
    }

    /// Renders the `[client]` section written to the temporary credentials
    /// file: four settings under the header, fixed order.
    pub fn credentials_file_contents(&self) -> String {
        [
            "[client]".to_string(),
            format!("user = '{}'", self.config.user_name().unwrap_or_default()),
            format!("password = '{}'", self.config.password().unwrap_or_default()),
            format!("host = '{}'", self.config.host()),
            format!("port = '{}'", self.config.port()),
        ]
        .join("\n")
    }
}

impl DbRestorer for MySql {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::MySql
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
        Ok(Some(CredentialArtifact::new(
            &self.credentials_file_contents(),
        )?))
    }

    fn render_command(&self, dump_file: &str, credentials_file: Option<&Path>) -> String {
        let credentials_file = credentials_file
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        let mut command = vec![
            format!("'{}mysqldump'", self.config.restore_binary_path()),
            format!("--defaults-extra-file=\"{credentials_file}\""),
        ];

        if self.skip_comments {
            command.push("--skip-comments".to_string());
        }

        command.push(
            if self.use_extended_inserts {
                "--extended-insert"
            } else {
                "--skip-extended-insert"
            }
            .to_string(),
        );

        if self.use_single_transaction {
            command.push("--single-transaction".to_string());
        }

        if let Some(socket) = self.config.socket() {
            command.push(format!("--socket={socket}"));
        }

        for table in self.config.exclude_tables() {
            // Always db-qualified; mysqldump rejects bare table names here.
            command.push(format!("--ignore-table={}.{table}", self.config.db_name()));
        }

        if !self.default_character_set.is_empty() {
            command.push(format!(
                "--default-character-set={}",
                self.default_character_set
            ));
        }

        command.extend(self.config.extra_options().iter().cloned());

        command.push(format!("--result-file=\"{dump_file}\""));
        command.push(self.config.db_name().to_string());

        if !self.config.only_tables().is_empty() {
            command.push(self.config.only_tables().join(" "));
        }

        command.join(" ")
    }
}
