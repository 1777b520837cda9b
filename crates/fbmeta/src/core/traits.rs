//! Service seams between the engine and a live database.
//!
//! - [`CatalogSource`]: runs read-only catalog queries
//! - [`ScriptTarget`]: executes a script batch
//! - [`DatabaseFactory`]: opens or creates the database a run works against
//!
//! The Firebird driver implements all three; tests use in-memory fakes.

use std::path::Path;

use crate::config::{BuildConfig, ConnectionConfig};
use crate::error::Result;

use super::row::CatalogRow;

/// Read-only access to the system catalog.
pub trait CatalogSource {
    /// Run a catalog query and return every row.
    ///
    /// Failures are returned as-is; the catalog reader attaches context.
    fn query(&mut self, sql: &str) -> Result<Vec<CatalogRow>>;
}

/// Execution of complete script batches.
pub trait ScriptTarget {
    /// Execute `sql` as one unit.
    ///
    /// A server-side rejection must surface as an `Err`; the executor turns
    /// it into a `ScriptExecution` error naming the file.
    fn execute_batch(&mut self, sql: &str) -> Result<()>;
}

/// Opens connections for a run.
///
/// The returned connection is released when dropped, on every exit path.
pub trait DatabaseFactory {
    /// Connection type handed to the catalog reader and script executor.
    type Connection: CatalogSource + ScriptTarget;

    /// Open an existing database.
    fn connect(&self, config: &ConnectionConfig) -> Result<Self::Connection>;

    /// Create a new database file at `path` with the page size and
    /// character set from `build`, and open it.
    fn create(
        &self,
        config: &ConnectionConfig,
        path: &Path,
        build: &BuildConfig,
    ) -> Result<Self::Connection>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &mut T {
    fn query(&mut self, sql: &str) -> Result<Vec<CatalogRow>> {
        (**self).query(sql)
    }
}

impl<T: ScriptTarget + ?Sized> ScriptTarget for &mut T {
    fn execute_batch(&mut self, sql: &str) -> Result<()> {
        (**self).execute_batch(sql)
    }
}
