//! Firebird driver over the pure Rust wire protocol client.
//!
//! One [`FirebirdConnection`] is opened per run and closed when dropped.
//! Statements outside an explicit transaction are committed by the client
//! after each call, so every script batch is applied on its own.

use std::path::Path;

use rsfbclient::charset::{self, Charset};
use rsfbclient::{prelude::*, Dialect, Row, SimpleConnection, SqlType};
use tracing::{debug, info};

use crate::config::{BuildConfig, ConnectionConfig};
use crate::core::{CatalogRow, CatalogSource, CatalogValue, DatabaseFactory, ScriptTarget};
use crate::error::{FbMetaError, Result};

/// Opens Firebird connections and creates databases.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebirdFactory;

fn dialect(config: &ConnectionConfig) -> Dialect {
    match config.dialect {
        1 => Dialect::D1,
        _ => Dialect::D3,
    }
}

/// Map a `build.charset` name to the client charset.
///
/// `NONE` stores bytes untranslated, matching databases created without a
/// default character set.
fn database_charset(name: &str) -> Result<Charset> {
    match name.trim().to_uppercase().as_str() {
        "NONE" => Ok(Charset {
            on_firebird: "NONE",
            on_rust: None,
        }),
        "UTF8" => Ok(charset::UTF_8),
        "ISO8859_1" => Ok(charset::ISO_8859_1),
        "WIN1252" => Ok(charset::WIN_1252),
        other => Err(FbMetaError::Config(format!(
            "unsupported database charset '{}'",
            other
        ))),
    }
}

impl DatabaseFactory for FirebirdFactory {
    type Connection = FirebirdConnection;

    fn connect(&self, config: &ConnectionConfig) -> Result<FirebirdConnection> {
        info!("Connecting to {}", config.display_target());
        let conn = rsfbclient::builder_pure_rust()
            .host(&config.host)
            .port(config.port)
            .db_name(&config.database)
            .user(&config.user)
            .pass(&config.password)
            .dialect(dialect(config))
            .connect()
            .map_err(|e| {
                FbMetaError::connection(format!("{}: {}", config.display_target(), e))
            })?;

        Ok(FirebirdConnection::new(conn.into(), config.display_target()))
    }

    fn create(
        &self,
        config: &ConnectionConfig,
        path: &Path,
        build: &BuildConfig,
    ) -> Result<FirebirdConnection> {
        let db_name = path.to_string_lossy().into_owned();
        let target = config.with_database(db_name.clone()).display_target();
        let charset = database_charset(&build.charset)?;
        info!(
            "Creating database {} (page size {}, charset {})",
            target, build.page_size, charset.on_firebird
        );

        let conn = rsfbclient::builder_pure_rust()
            .host(&config.host)
            .port(config.port)
            .db_name(&db_name)
            .user(&config.user)
            .pass(&config.password)
            .dialect(dialect(config))
            .page_size(build.page_size)
            .charset(charset)
            .create_database()
            .map_err(|e| FbMetaError::connection(format!("creating {}: {}", target, e)))?;

        Ok(FirebirdConnection::new(conn.into(), target))
    }
}

/// An open connection; closed on drop.
pub struct FirebirdConnection {
    conn: SimpleConnection,
    target: String,
}

impl FirebirdConnection {
    fn new(conn: SimpleConnection, target: String) -> Self {
        debug!("Connection to {} opened", target);
        Self { conn, target }
    }
}

impl Drop for FirebirdConnection {
    fn drop(&mut self) {
        debug!("Connection to {} released", self.target);
    }
}

impl CatalogSource for FirebirdConnection {
    fn query(&mut self, sql: &str) -> Result<Vec<CatalogRow>> {
        let rows: Vec<Row> = self
            .conn
            .query(sql, ())
            .map_err(|e| FbMetaError::Database(e.to_string()))?;
        Ok(rows.into_iter().map(to_catalog_row).collect())
    }
}

impl ScriptTarget for FirebirdConnection {
    fn execute_batch(&mut self, sql: &str) -> Result<()> {
        self.conn
            .execute(sql, ())
            .map(|_| ())
            .map_err(|e| FbMetaError::Database(e.to_string()))
    }
}

fn to_catalog_row(row: Row) -> CatalogRow {
    CatalogRow::new(row.cols.into_iter().map(|col| to_catalog_value(col.value)).collect())
}

fn to_catalog_value(value: SqlType) -> CatalogValue {
    match value {
        SqlType::Null => CatalogValue::Null,
        SqlType::Integer(v) => CatalogValue::Int(v),
        SqlType::Text(s) => CatalogValue::Text(s),
        SqlType::Binary(bytes) => CatalogValue::Text(String::from_utf8_lossy(&bytes).into_owned()),
        SqlType::Boolean(b) => CatalogValue::Int(i64::from(b)),
        other => CatalogValue::Text(format!("{:?}", other)),
    }
}
