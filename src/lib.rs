//! Restore database dumps by driving the vendor CLI tools.
//!
//! This crate builds and executes the exact `mysqldump`, `pg_restore`,
//! `mongodump` or `sqlite3` invocation for a previously produced dump file,
//! giving callers one fluent configuration surface across heterogeneous
//! database engines instead of hand-written shell commands.
//!
//! # Security Guarantees
//! - MySQL and PostgreSQL passwords never appear on the command line; they
//!   travel through a uniquely named temp file deleted on every exit path
//! - Passwords are held in zeroizing memory and redacted from `Debug`,
//!   `Display` and serialized output
//! - Nothing is spawned until the variant's required fields validate
//!
//! # Architecture
//! - A closed set of engine variants behind the [`DbRestorer`] trait
//! - Exclusive-ownership builder chains instead of shared mutable setters
//! - Scoped credential artifacts released as unconditional finalizers
//!
//! # Example
//! ```rust,no_run
//! use dbrestorer::{DbRestorer, PostgreSql};
//!
//! # async fn run() -> dbrestorer::Result<()> {
//! PostgreSql::create()
//!     .with_db_name("mydb")
//!     .with_user_name("admin")
//!     .with_password("secret")
//!     .restore_from_file("dump.sql")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod process;
pub mod restorers;

// Re-export commonly used types
pub use config::{RestoreConfig, TableList};
pub use credentials::CredentialArtifact;
pub use error::{RestoreError, Result};
pub use restorers::{
    DatabaseType, DbRestorer, mongodb::MongoDb, mysql::MySql, postgres::PostgreSql, sqlite::Sqlite,
};
