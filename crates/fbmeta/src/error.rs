//! Error types for the schema round-tripping library.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for configuration errors (bad YAML, missing connection settings).
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code when an expected directory does not exist.
pub const EXIT_NOT_FOUND: u8 = 2;
/// Exit code for catalog read failures during export.
pub const EXIT_CATALOG_ERROR: u8 = 3;
/// Exit code when a script batch fails.
pub const EXIT_SCRIPT_ERROR: u8 = 4;
/// Exit code for connection and driver failures.
pub const EXIT_CONNECTION_ERROR: u8 = 5;
/// Exit code for file system failures.
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for build, export and update runs.
#[derive(Error, Debug)]
pub enum FbMetaError {
    /// Configuration error (invalid YAML, missing paths or credentials, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// An expected input directory is missing.
    #[error("Directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A catalog query failed or returned rows that could not be decoded.
    #[error("Catalog read failed ({context}): {message}")]
    CatalogRead { context: String, message: String },

    /// A script batch was rejected by the database.
    #[error("Script {file} failed: {message}")]
    ScriptExecution { file: String, message: String },

    /// Opening or creating a database failed.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Raw driver error, before the caller attaches context.
    #[error("Database error: {0}")]
    Database(String),

    /// A generated script could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    WriteScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FbMetaError {
    /// Create a CatalogRead error for the named query or object.
    pub fn catalog(context: impl Into<String>, message: impl ToString) -> Self {
        FbMetaError::CatalogRead {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a ScriptExecution error
    pub fn script(file: impl Into<String>, message: impl ToString) -> Self {
        FbMetaError::ScriptExecution {
            file: file.into(),
            message: message.to_string(),
        }
    }

    /// Create a Connection error
    pub fn connection(message: impl ToString) -> Self {
        FbMetaError::Connection(message.to_string())
    }

    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            FbMetaError::Config(_) | FbMetaError::Yaml(_) => EXIT_CONFIG_ERROR,
            FbMetaError::NotFound(_) => EXIT_NOT_FOUND,
            FbMetaError::CatalogRead { .. } => EXIT_CATALOG_ERROR,
            FbMetaError::ScriptExecution { .. } => EXIT_SCRIPT_ERROR,
            FbMetaError::Connection(_) | FbMetaError::Database(_) => EXIT_CONNECTION_ERROR,
            FbMetaError::WriteScript { .. } | FbMetaError::Io(_) | FbMetaError::Json(_) => {
                EXIT_IO_ERROR
            }
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for fbmeta operations.
pub type Result<T> = std::result::Result<T, FbMetaError>;
