//! Configuration validation.

use super::{BuildConfig, ConnectionConfig};
use crate::error::{FbMetaError, Result};

/// Validate connection settings.
///
/// `require_database` is false for `build-db`, where the database path is
/// derived from `--db-dir` instead.
pub fn validate_connection(connection: &ConnectionConfig, require_database: bool) -> Result<()> {
    if connection.host.trim().is_empty() {
        return Err(FbMetaError::Config("connection.host is required".into()));
    }
    if connection.port == 0 {
        return Err(FbMetaError::Config("connection.port must be non-zero".into()));
    }
    if require_database && connection.database.trim().is_empty() {
        return Err(FbMetaError::Config("connection.database is required".into()));
    }
    if connection.user.trim().is_empty() {
        return Err(FbMetaError::Config("connection.user is required".into()));
    }
    if connection.password.is_empty() {
        return Err(FbMetaError::Config(
            "connection.password is required (there is no built-in default)".into(),
        ));
    }
    if !matches!(connection.dialect, 1 | 3) {
        return Err(FbMetaError::Config(format!(
            "connection.dialect must be 1 or 3, got {}",
            connection.dialect
        )));
    }

    Ok(())
}

/// Character sets `build-db` can create a database with.
const SUPPORTED_CHARSETS: &[&str] = &["NONE", "UTF8", "ISO8859_1", "WIN1252"];

/// Validate build settings.
pub fn validate_build(build: &BuildConfig) -> Result<()> {
    let file = build.database_file.trim();
    if file.is_empty() {
        return Err(FbMetaError::Config("build.database_file is required".into()));
    }
    if file.contains('/') || file.contains('\\') {
        return Err(FbMetaError::Config(format!(
            "build.database_file must be a file name, got '{}'",
            build.database_file
        )));
    }
    if !matches!(build.page_size, 4096 | 8192 | 16384 | 32768) {
        return Err(FbMetaError::Config(format!(
            "build.page_size must be one of 4096, 8192, 16384, 32768, got {}",
            build.page_size
        )));
    }
    if !SUPPORTED_CHARSETS
        .iter()
        .any(|c| c.eq_ignore_ascii_case(build.charset.trim()))
    {
        return Err(FbMetaError::Config(format!(
            "build.charset must be one of {}, got '{}'",
            SUPPORTED_CHARSETS.join(", "),
            build.charset
        )));
    }

    Ok(())
}
