//! # fbmeta
//!
//! Firebird schema round-tripping library.
//!
//! This library reads the system catalog of a Firebird database and
//! regenerates re-executable DDL scripts, and applies ordered script
//! directories back to a database:
//!
//! - **Type mapping** from catalog field descriptors to SQL type syntax
//! - **Catalog reading** of user domains, tables and stored procedures
//! - **DDL assembly** with a fixed, reproducible layout
//! - **Script writing** with deterministic category-prefixed file names
//! - **Script execution** in case-insensitive order, stopping at the first failure
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use fbmeta::{Config, FirebirdFactory, Orchestrator};
//!
//! fn main() -> fbmeta::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let connection = config.resolve_connection(None, true)?;
//!     let orchestrator = Orchestrator::new(FirebirdFactory);
//!     let report = orchestrator.export_scripts(&connection, Path::new("scripts"))?;
//!     println!("Wrote {} files", report.files.len());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod ddl;
pub mod drivers;
pub mod error;
pub mod orchestrator;
pub mod script;
pub mod typemap;

#[cfg(test)]
mod testing;

// Re-exports for convenient access
pub use catalog::CatalogReader;
pub use config::{BuildConfig, Config, ConnectionConfig};
pub use error::{FbMetaError, Result};
pub use orchestrator::{
    apply_scripts, export_catalog, ApplyReport, ExportReport, ExportSummary, Orchestrator,
};
pub use script::{load_scripts, ExecutionLog, ScriptExecutor, ScriptFile, ScriptWriter};

#[cfg(feature = "firebird")]
pub use drivers::{FirebirdConnection, FirebirdFactory};
