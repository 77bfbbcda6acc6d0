//! Shared restore configuration.
//!
//! `RestoreConfig` is the parameter set common to every database variant:
//! credentials, connection coordinates, table filters, the vendor binary
//! location and the execution timeout. Each variant owns exactly one config
//! and mutates it only through its own builder methods, so there is no
//! shared mutable state between concurrent restores.
//!
//! # Security
//! The password is held in a [`Zeroizing`] wrapper so its memory is wiped on
//! drop, it is excluded from serialization, and both `Debug` and `Display`
//! redact it.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{RestoreError, Result};

/// Parameters a variant may declare as mandatory before a restore starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredParameter {
    /// The database user name
    UserName,
    /// The database name (or database file path for SQLite)
    DbName,
    /// The database host
    Host,
}

impl RequiredParameter {
    /// Field name as it appears in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserName => "user_name",
            Self::DbName => "db_name",
            Self::Host => "host",
        }
    }
}

/// Input to the table filter setters: either explicit names or one
/// delimiter-separated string.
///
/// Include lists split a delimited string on any run of commas and
/// whitespace; exclude lists split on the exact `", "` delimiter. Explicit
/// name lists are taken verbatim either way. No deduplication is performed.
#[derive(Debug, Clone)]
pub enum TableList {
    /// Explicit table names, order preserved
    Names(Vec<String>),
    /// A single delimiter-separated string, split by the receiving setter
    Delimited(String),
}

impl TableList {
    fn into_include_names(self) -> Vec<String> {
        match self {
            Self::Names(names) => names,
            Self::Delimited(s) => s
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    fn into_exclude_names(self) -> Vec<String> {
        match self {
            Self::Names(names) => names,
            Self::Delimited(s) => s.split(", ").map(String::from).collect(),
        }
    }
}

impl From<&str> for TableList {
    fn from(s: &str) -> Self {
        Self::Delimited(s.to_string())
    }
}

impl From<String> for TableList {
    fn from(s: String) -> Self {
        Self::Delimited(s)
    }
}

impl From<Vec<String>> for TableList {
    fn from(names: Vec<String>) -> Self {
        Self::Names(names)
    }
}

impl From<Vec<&str>> for TableList {
    fn from(names: Vec<&str>) -> Self {
        Self::Names(names.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for TableList {
    fn from(names: &[&str]) -> Self {
        Self::Names(names.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TableList {
    fn from(names: [&str; N]) -> Self {
        Self::Names(names.iter().map(|s| (*s).to_string()).collect())
    }
}

/// The mutable parameter set shared by all restore variants.
///
/// Lives for exactly one restore invocation; credential temp files derived
/// from it are single-use.
#[derive(Clone, Serialize, Deserialize)]
pub struct RestoreConfig {
    db_name: String,
    user_name: Option<String>,
    #[serde(skip)]
    password: Option<Zeroizing<String>>,
    host: String,
    port: u16,
    socket: Option<String>,
    timeout: Option<Duration>,
    restore_binary_path: String,
    only_tables: Vec<String>,
    exclude_tables: Vec<String>,
    extra_options: Vec<String>,
}

impl RestoreConfig {
    /// Creates a config with the given variant-specific default port.
    pub(crate) fn with_default_port(port: u16) -> Self {
        Self {
            db_name: String::new(),
            user_name: None,
            password: None,
            host: "localhost".to_string(),
            port,
            socket: None,
            timeout: None,
            restore_binary_path: String::new(),
            only_tables: Vec::new(),
            exclude_tables: Vec::new(),
            extra_options: Vec::new(),
        }
    }

    /// The configured database name (database file path for SQLite).
    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    /// The configured user name, if any.
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// The configured host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The configured socket, if any.
    pub fn socket(&self) -> Option<&str> {
        self.socket.as_deref()
    }

    /// The configured timeout; `None` means no limit.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Directory prefix for the vendor binary, `/`-terminated when non-empty.
    pub fn restore_binary_path(&self) -> &str {
        &self.restore_binary_path
    }

    /// Tables the restore is limited to, in insertion order.
    pub fn only_tables(&self) -> &[String] {
        &self.only_tables
    }

    /// Tables excluded from the restore, in insertion order.
    pub fn exclude_tables(&self) -> &[String] {
        &self.exclude_tables
    }

    /// Extra command-line fragments, in insertion order.
    pub fn extra_options(&self) -> &[String] {
        &self.extra_options
    }

    pub(crate) fn password(&self) -> Option<&str> {
        self.password.as_deref().map(String::as_str)
    }

    /// The socket when set, otherwise the host. Used by variants whose
    /// connection flag accepts either.
    pub(crate) fn socket_or_host(&self) -> &str {
        self.socket.as_deref().unwrap_or(&self.host)
    }

    pub(crate) fn set_db_name(&mut self, db_name: impl Into<String>) {
        self.db_name = db_name.into();
    }

    pub(crate) fn set_user_name(&mut self, user_name: impl Into<String>) {
        self.user_name = Some(user_name.into());
    }

    pub(crate) fn set_password(&mut self, password: impl Into<String>) {
        self.password = Some(Zeroizing::new(password.into()));
    }

    pub(crate) fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub(crate) fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub(crate) fn set_socket(&mut self, socket: impl Into<String>) {
        self.socket = Some(socket.into());
    }

    // A zero duration means "no limit", same as never setting one.
    pub(crate) fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
    }

    // Normalized so a non-empty prefix always ends with exactly one separator.
    pub(crate) fn set_restore_binary_path(&mut self, path: impl Into<String>) {
        let mut path = path.into();
        if !path.is_empty() && !path.ends_with('/') {
            path.push('/');
        }
        self.restore_binary_path = path;
    }

    pub(crate) fn set_only_tables(&mut self, tables: TableList) -> Result<()> {
        if !self.exclude_tables.is_empty() {
            return Err(RestoreError::conflicting_parameters(
                "only_tables",
                "exclude_tables",
            ));
        }
        self.only_tables = tables.into_include_names();
        Ok(())
    }

    pub(crate) fn set_exclude_tables(&mut self, tables: TableList) -> Result<()> {
        if !self.only_tables.is_empty() {
            return Err(RestoreError::conflicting_parameters(
                "exclude_tables",
                "only_tables",
            ));
        }
        self.exclude_tables = tables.into_exclude_names();
        Ok(())
    }

    pub(crate) fn add_extra_option(&mut self, option: impl Into<String>) {
        let option = option.into();
        if !option.is_empty() {
            self.extra_options.push(option);
        }
    }

    /// Checks the variant's mandatory fields, failing with
    /// [`RestoreError::IncompleteCredentials`] on the first empty one.
    pub(crate) fn guard_required(&self, parameters: &[RequiredParameter]) -> Result<()> {
        for &parameter in parameters {
            let empty = match parameter {
                RequiredParameter::UserName => {
                    self.user_name.as_deref().unwrap_or_default().is_empty()
                }
                RequiredParameter::DbName => self.db_name.is_empty(),
                RequiredParameter::Host => self.host.is_empty(),
            };
            if empty {
                return Err(RestoreError::incomplete_credentials(parameter.as_str()));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for RestoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestoreConfig")
            .field("db_name", &self.db_name)
            .field("user_name", &self.user_name)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("socket", &self.socket)
            .field("timeout", &self.timeout)
            .field("restore_binary_path", &self.restore_binary_path)
            .field("only_tables", &self.only_tables)
            .field("exclude_tables", &self.exclude_tables)
            .field("extra_options", &self.extra_options)
            .finish()
    }
}

impl fmt::Display for RestoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally omits user name and password
        write!(f, "RestoreConfig({}:{}/{})", self.host, self.port, self.db_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RestoreConfig::with_default_port(5432);
        assert_eq!(config.host(), "localhost");
        assert_eq!(config.port(), 5432);
        assert_eq!(config.db_name(), "");
        assert_eq!(config.timeout(), None);
        assert!(config.only_tables().is_empty());
        assert!(config.exclude_tables().is_empty());
    }

    #[test]
    fn test_binary_path_normalization() {
        let mut config = RestoreConfig::with_default_port(3306);

        config.set_restore_binary_path("/custom/directory");
        assert_eq!(config.restore_binary_path(), "/custom/directory/");

        config.set_restore_binary_path("/custom/directory/");
        assert_eq!(config.restore_binary_path(), "/custom/directory/");

        config.set_restore_binary_path("");
        assert_eq!(config.restore_binary_path(), "");
    }

    #[test]
    fn test_zero_timeout_means_no_limit() {
        let mut config = RestoreConfig::with_default_port(3306);
        config.set_timeout(Duration::ZERO);
        assert_eq!(config.timeout(), None);

        config.set_timeout(Duration::from_secs(60));
        assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_include_list_parsing_is_flexible() {
        let mut config = RestoreConfig::with_default_port(3306);
        config
            .set_only_tables(TableList::from("tb1, tb2 tb3,tb4"))
            .unwrap();
        assert_eq!(config.only_tables(), ["tb1", "tb2", "tb3", "tb4"]);
    }

    #[test]
    fn test_exclude_list_splits_on_comma_space_only() {
        let mut config = RestoreConfig::with_default_port(3306);
        config
            .set_exclude_tables(TableList::from("tb1, tb2, tb3"))
            .unwrap();
        assert_eq!(config.exclude_tables(), ["tb1", "tb2", "tb3"]);
    }

    #[test]
    fn test_table_lists_preserve_duplicates() {
        let mut config = RestoreConfig::with_default_port(3306);
        config
            .set_only_tables(TableList::from(vec!["tb1", "tb1", "tb2"]))
            .unwrap();
        assert_eq!(config.only_tables(), ["tb1", "tb1", "tb2"]);
    }

    #[test]
    fn test_table_filters_are_mutually_exclusive() {
        let mut config = RestoreConfig::with_default_port(3306);
        config.set_only_tables(TableList::from("tb1")).unwrap();
        let error = config
            .set_exclude_tables(TableList::from("tb2"))
            .unwrap_err();
        assert!(matches!(
            error,
            RestoreError::ConflictingParameters { .. }
        ));

        let mut config = RestoreConfig::with_default_port(3306);
        config.set_exclude_tables(TableList::from("tb1")).unwrap();
        assert!(config.set_only_tables(TableList::from("tb2")).is_err());
    }

    #[test]
    fn test_empty_extra_options_are_skipped() {
        let mut config = RestoreConfig::with_default_port(3306);
        config.add_extra_option("");
        config.add_extra_option("--quick");
        assert_eq!(config.extra_options(), ["--quick"]);
    }

    #[test]
    fn test_guard_required_reports_first_missing_field() {
        let config = RestoreConfig::with_default_port(3306);
        let error = config
            .guard_required(&[RequiredParameter::UserName, RequiredParameter::DbName])
            .unwrap_err();
        assert_eq!(error.to_string(), "parameter `user_name` cannot be empty");
    }

    #[test]
    fn test_debug_and_display_redact_password() {
        let mut config = RestoreConfig::with_default_port(5432);
        config.set_user_name("admin");
        config.set_password("topsecret");
        config.set_db_name("mydb");

        let debug = format!("{config:?}");
        assert!(!debug.contains("topsecret"));
        assert!(debug.contains("****"));

        let display = format!("{config}");
        assert!(!display.contains("topsecret"));
        assert!(!display.contains("admin"));
        assert_eq!(display, "RestoreConfig(localhost:5432/mydb)");
    }
}
