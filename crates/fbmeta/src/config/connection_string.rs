//! Firebird ADO-style connection strings.
//!
//! Accepts `key=value` pairs separated by `;`, e.g.
//! `DataSource=localhost;Port=3050;Database=/data/src.fdb;User=SYSDBA;Password=...`.
//! Keys are case-insensitive and ignore embedded spaces, so `User ID` and
//! `userid` are the same key. Unknown keys are ignored.

use std::str::FromStr;

use tracing::debug;

use super::ConnectionConfig;
use crate::error::{FbMetaError, Result};

impl FromStr for ConnectionConfig {
    type Err = FbMetaError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Parse a connection string into connection settings.
///
/// Only syntax is checked here; required fields are enforced by validation.
pub fn parse(input: &str) -> Result<ConnectionConfig> {
    let mut config = ConnectionConfig::new("", "");

    for pair in input.split(';') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }

        // Values may legitimately contain '=' (passwords), so split once.
        let (raw_key, raw_value) = pair.split_once('=').ok_or_else(|| {
            FbMetaError::Config(format!(
                "connection string entry '{}' is not of the form key=value",
                redact_entry(pair)
            ))
        })?;

        let key: String = raw_key
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        let value = unquote(raw_value.trim());

        match key.as_str() {
            "datasource" | "server" | "host" => config.host = value.to_string(),
            "database" | "initialcatalog" => config.database = value.to_string(),
            "user" | "userid" | "username" => config.user = value.to_string(),
            "password" | "pwd" => config.password = value.to_string(),
            "port" | "portnumber" => {
                config.port = value.parse().map_err(|_| {
                    FbMetaError::Config(format!("invalid port in connection string: '{}'", value))
                })?;
            }
            "dialect" => {
                config.dialect = value.parse().map_err(|_| {
                    FbMetaError::Config(format!(
                        "invalid dialect in connection string: '{}'",
                        value
                    ))
                })?;
            }
            other => debug!("Ignoring connection string key '{}'", other),
        }
    }

    Ok(config)
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn redact_entry(entry: &str) -> String {
    let lower = entry.to_lowercase();
    if lower.starts_with("password") || lower.starts_with("pwd") {
        "[REDACTED]".to_string()
    } else {
        entry.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_connection_string() {
        let config: ConnectionConfig =
            "DataSource=db.internal;Port=3051;Database=/data/src.fdb;User=SYSDBA;Password=s3cr=t;Dialect=3"
                .parse()
                .unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 3051);
        assert_eq!(config.database, "/data/src.fdb");
        assert_eq!(config.user, "SYSDBA");
        assert_eq!(config.password, "s3cr=t");
        assert_eq!(config.dialect, 3);
    }

    #[test]
    fn test_keys_are_case_and_space_insensitive() {
        let config = parse("data source=h; USER ID=u; pwd='p w'; Initial Catalog=employee").unwrap();
        assert_eq!(config.host, "h");
        assert_eq!(config.user, "u");
        assert_eq!(config.password, "p w");
        assert_eq!(config.database, "employee");
    }

    #[test]
    fn test_defaults_when_omitted() {
        let config = parse("Database=x.fdb;User=a;Password=b").unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3050);
        assert_eq!(config.dialect, 3);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse("Database=x.fdb;Charset=NONE;Pooling=false;User=a;Password=b").unwrap();
        assert_eq!(config.database, "x.fdb");
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = parse("Database=x.fdb;Port=abc").unwrap_err();
        assert!(matches!(err, FbMetaError::Config(_)));
    }

    #[test]
    fn test_entry_without_equals_rejected_and_password_redacted() {
        let err = parse("Database=x.fdb;garbage").unwrap_err();
        assert!(err.to_string().contains("garbage"));

        let err = parse("Passwordhunter2").unwrap_err();
        assert!(!err.to_string().contains("hunter2"));
    }

    #[test]
    fn test_missing_credentials_stay_empty() {
        let config = parse("Database=x.fdb").unwrap();
        assert!(config.user.is_empty());
        assert!(config.password.is_empty());
    }
}
