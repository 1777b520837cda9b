//! In-memory database used by unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::{BuildConfig, ConnectionConfig};
use crate::core::{CatalogRow, CatalogSource, DatabaseFactory, ScriptTarget};
use crate::error::{FbMetaError, Result};

/// Canned catalog responses plus a log of executed batches.
#[derive(Debug, Default, Clone)]
pub struct FakeDatabase {
    rows: HashMap<String, Vec<CatalogRow>>,
    failures: HashMap<String, String>,
    queries: Vec<String>,
    /// Batches whose text contains this marker are rejected.
    reject_marker: Option<String>,
    /// Shared between clones so a factory's connections can be inspected.
    executed: Arc<Mutex<Vec<String>>>,
}

impl FakeDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, sql: &str, rows: Vec<CatalogRow>) -> Self {
        self.rows.insert(sql.to_string(), rows);
        self
    }

    pub fn with_failure(mut self, sql: &str, message: &str) -> Self {
        self.failures.insert(sql.to_string(), message.to_string());
        self
    }

    pub fn rejecting(mut self, marker: &str) -> Self {
        self.reject_marker = Some(marker.to_string());
        self
    }

    pub fn query_count(&self, sql: &str) -> usize {
        self.queries.iter().filter(|q| q.as_str() == sql).count()
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl CatalogSource for FakeDatabase {
    fn query(&mut self, sql: &str) -> Result<Vec<CatalogRow>> {
        self.queries.push(sql.to_string());
        if let Some(message) = self.failures.get(sql) {
            return Err(FbMetaError::Database(message.clone()));
        }
        Ok(self.rows.get(sql).cloned().unwrap_or_default())
    }
}

impl ScriptTarget for FakeDatabase {
    fn execute_batch(&mut self, sql: &str) -> Result<()> {
        if let Some(marker) = &self.reject_marker {
            if sql.contains(marker.as_str()) {
                return Err(FbMetaError::Database(format!(
                    "Dynamic SQL Error: Token unknown near '{}'",
                    marker
                )));
            }
        }
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(sql.to_string());
        }
        Ok(())
    }
}

/// Factory handing out clones of a template database and recording calls.
#[derive(Debug, Default, Clone)]
pub struct FakeFactory {
    pub template: FakeDatabase,
    pub created: Arc<Mutex<Vec<(PathBuf, BuildConfig)>>>,
    pub connected: Arc<Mutex<Vec<String>>>,
}

impl FakeFactory {
    pub fn new(template: FakeDatabase) -> Self {
        Self {
            template,
            ..Self::default()
        }
    }
}

impl DatabaseFactory for FakeFactory {
    type Connection = FakeDatabase;

    fn connect(&self, config: &ConnectionConfig) -> Result<FakeDatabase> {
        if let Ok(mut connected) = self.connected.lock() {
            connected.push(config.database.clone());
        }
        Ok(self.template.clone())
    }

    fn create(
        &self,
        _config: &ConnectionConfig,
        path: &Path,
        build: &BuildConfig,
    ) -> Result<FakeDatabase> {
        std::fs::write(path, b"fake database")?;
        if let Ok(mut created) = self.created.lock() {
            created.push((path.to_path_buf(), build.clone()));
        }
        Ok(self.template.clone())
    }
}
