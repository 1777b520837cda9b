//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Connection to the database being exported or updated.
    ///
    /// Optional because every command also accepts `--connection-string`.
    #[serde(default)]
    pub connection: Option<ConnectionConfig>,

    /// Settings for `build-db`.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Firebird connection settings.
///
/// There are deliberately no defaults for `user` and `password`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Server host (default: "localhost").
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (default: 3050).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database path or alias on the server.
    #[serde(default)]
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    pub password: String,

    /// SQL dialect (default: 3).
    #[serde(default = "default_dialect")]
    pub dialect: u16,
}

impl ConnectionConfig {
    /// Create settings for the given credentials with default host, port and dialect.
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: String::new(),
            user: user.into(),
            password: password.into(),
            dialect: default_dialect(),
        }
    }

    /// Same server and credentials, pointing at another database file.
    pub fn with_database(&self, database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..self.clone()
        }
    }

    /// `host/port:database` as used in log lines.
    pub fn display_target(&self) -> String {
        format!("{}/{}:{}", self.host, self.port, self.database)
    }
}

// Custom Debug implementation that redacts the password
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("dialect", &self.dialect)
            .finish()
    }
}

/// Settings for creating a fresh database with `build-db`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildConfig {
    /// File name of the database created inside `--db-dir` (default: "meta.fdb").
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Page size for the new database (default: 16384).
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Character set of the new database (default: "NONE").
    #[serde(default = "default_charset")]
    pub charset: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            page_size: default_page_size(),
            charset: default_charset(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3050
}

fn default_dialect() -> u16 {
    3
}

fn default_database_file() -> String {
    "meta.fdb".to_string()
}

fn default_page_size() -> u32 {
    16384
}

fn default_charset() -> String {
    "NONE".to_string()
}
