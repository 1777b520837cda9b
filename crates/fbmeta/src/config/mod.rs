//! Configuration loading and validation.

mod connection_string;
mod types;
mod validation;

pub use connection_string::parse as parse_connection_string;
pub use types::*;
pub use validation::{validate_build, validate_connection};

use crate::error::{FbMetaError, Result};
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the parts of the configuration that are present.
    ///
    /// The connection database may be empty here; commands that need it
    /// check again through [`Config::resolve_connection`].
    pub fn validate(&self) -> Result<()> {
        if let Some(connection) = &self.connection {
            validate_connection(connection, false)?;
        }
        validate_build(&self.build)
    }

    /// Pick the connection for a command.
    ///
    /// An explicit connection string wins over the `connection` section.
    /// Having neither is a configuration error.
    pub fn resolve_connection(
        &self,
        connection_string: Option<&str>,
        require_database: bool,
    ) -> Result<ConnectionConfig> {
        let connection = match connection_string {
            Some(s) if s.trim().is_empty() => {
                return Err(FbMetaError::Config("connection string is empty".into()))
            }
            Some(s) => parse_connection_string(s)?,
            None => self.connection.clone().ok_or_else(|| {
                FbMetaError::Config(
                    "no connection configured: pass --connection-string or add a `connection` section to the config file"
                        .into(),
                )
            })?,
        };

        validate_connection(&connection, require_database)?;
        Ok(connection)
    }
}
