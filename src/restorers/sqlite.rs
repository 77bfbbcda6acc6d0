//! SQLite restore variant.
//!
//! No server and no credentials: the database name is the database file
//! path. The command is a genuine shell pipeline that feeds
//! `BEGIN IMMEDIATE;\n.dump` into `sqlite3 --bail` on standard input and
//! redirects standard output to the destination file.

use std::path::Path;

use crate::config::{RequiredParameter, RestoreConfig};
use crate::error::Result;
use crate::impl_restorer_builder;
use crate::restorers::{DatabaseType, DbRestorer};

/// Restore variant for SQLite.
#[derive(Debug, Clone)]
pub struct Sqlite {
    config: RestoreConfig,
}

impl Default for Sqlite {
    fn default() -> Self {
        Self {
            // SQLite has no network port; the field stays unused.
            config: RestoreConfig::with_default_port(0),
        }
    }
}

impl_restorer_builder!(Sqlite);

impl DbRestorer for Sqlite {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Sqlite
    }

    fn config(&self) -> &RestoreConfig {
        &self.config
    }

    fn validate(&self) -> Result<()> {
        self.config
            .guard_required(&[RequiredParameter::DbName, RequiredParameter::Host])
    }

    fn render_command(&self, dump_file: &str, _credentials_file: Option<&Path>) -> String {
        [
            "echo 'BEGIN IMMEDIATE;\\n.dump' |".to_string(),
            format!(
                "\"{}sqlite3\" --bail",
                self.config.restore_binary_path()
            ),
            format!("\"{}\" >", self.config.db_name()),
            format!("\"{dump_file}\""),
        ]
        .join(" ")
    }
}
