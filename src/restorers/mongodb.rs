//! MongoDB restore variant.
//!
//! Drives `mongodump` against an archive destination. Credentials are passed
//! as inline `--username`/`--password` flags, mirroring the vendor
//! convention for this tool; the per-variant inconsistency with the temp
//! file strategy of the relational variants is intentional, so the rendered
//! command line is never logged. Table-level filtering is not supported,
//! only a single optional `--collection`.

use std::path::Path;

use crate::config::{RequiredParameter, RestoreConfig};
use crate::error::Result;
use crate::impl_restorer_builder;
use crate::restorers::{DatabaseType, DbRestorer};

const DEFAULT_PORT: u16 = 27017;

/// Restore variant for MongoDB.
#[derive(Debug, Clone)]
pub struct MongoDb {
    config: RestoreConfig,
    collection: Option<String>,
    enable_compression: bool,
}

impl Default for MongoDb {
    fn default() -> Self {
        Self {
            config: RestoreConfig::with_default_port(DEFAULT_PORT),
            collection: None,
            enable_compression: false,
        }
    }
}

impl_restorer_builder!(MongoDb);

impl MongoDb {
    /// Limits the operation to a single collection.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Enables gzip compression. Idempotent; any number of calls renders
    /// exactly one `--gzip` flag.
    #[must_use]
    pub fn enable_compression(mut self) -> Self {
        self.enable_compression = true;
        self
    }
}

impl DbRestorer for MongoDb {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::MongoDb
    }

    fn config(&self) -> &RestoreConfig {
        &self.config
    }

    fn validate(&self) -> Result<()> {
        self.config
            .guard_required(&[RequiredParameter::DbName, RequiredParameter::Host])
    }

    fn render_command(&self, dump_file: &str, _credentials_file: Option<&Path>) -> String {
        let mut command = vec![
            format!("'{}mongodump'", self.config.restore_binary_path()),
            format!("--db {}", self.config.db_name()),
            format!("--archive={dump_file}"),
        ];

        if let Some(user_name) = self.config.user_name() {
            command.push(format!("--username {user_name}"));
        }

        if let Some(password) = self.config.password() {
            command.push(format!("--password {password}"));
        }

        command.push(format!("--host {}", self.config.host()));
        command.push(format!("--port {}", self.config.port()));

        if let Some(collection) = &self.collection {
            command.push(format!("--collection {collection}"));
        }

        command.extend(self.config.extra_options().iter().cloned());

        // Kept last so the compression flag always trails the command
        if self.enable_compression {
            command.push("--gzip".to_string());
        }

        command.join(" ")
    }
}
