//! Workflow coordinator for export, update and build runs.
//!
//! Every workflow validates its inputs before any I/O, opens exactly one
//! connection through the [`DatabaseFactory`] and releases it on return.

mod report;

pub use report::{ApplyReport, ExportReport, RunClock, RunInfo};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::CatalogReader;
use crate::config::{validate_build, validate_connection, BuildConfig, ConnectionConfig};
use crate::core::{CatalogSource, DatabaseFactory, ScriptTarget};
use crate::ddl::DdlUnit;
use crate::error::{FbMetaError, Result};
use crate::script::{load_scripts, ExecutionLog, ScriptExecutor, ScriptFile, ScriptWriter};

/// Counts and files produced by [`export_catalog`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub domains: usize,
    pub tables: usize,
    pub procedures: usize,
    pub files: Vec<PathBuf>,
}

/// Read every user object from `source` and write one script per object.
///
/// Domains are written first, then tables, then procedures. A catalog failure
/// aborts the export; files already written are left in place.
pub fn export_catalog<S: CatalogSource>(
    source: S,
    writer: &ScriptWriter,
) -> Result<ExportSummary> {
    let mut reader = CatalogReader::new(source);
    let mut summary = ExportSummary::default();

    let domains = reader.list_domains()?;
    info!("Exporting {} domains", domains.len());
    for domain in &domains {
        summary.files.push(writer.write_unit(&DdlUnit::for_domain(domain))?);
    }
    summary.domains = domains.len();

    let tables = reader.list_tables()?;
    info!("Exporting {} tables", tables.len());
    for table in &tables {
        summary.files.push(writer.write_unit(&DdlUnit::for_table(table))?);
    }
    summary.tables = tables.len();

    let procedures = reader.list_procedures()?;
    info!("Exporting {} procedures", procedures.len());
    for procedure in &procedures {
        summary
            .files
            .push(writer.write_unit(&DdlUnit::for_procedure(procedure))?);
    }
    summary.procedures = procedures.len();

    Ok(summary)
}

/// Run `scripts` against `target`, failing with the first script error.
pub fn apply_scripts<T: ScriptTarget>(target: T, scripts: Vec<ScriptFile>) -> Result<ExecutionLog> {
    let log = ScriptExecutor::new(target).run(scripts);
    log.into_result()
}

/// Drives the three workflows against databases opened by `F`.
pub struct Orchestrator<F> {
    factory: F,
}

impl<F: DatabaseFactory> Orchestrator<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// Regenerate scripts for every domain, table and procedure.
    pub fn export_scripts(
        &self,
        connection: &ConnectionConfig,
        output_dir: &Path,
    ) -> Result<ExportReport> {
        require_path("output directory", output_dir)?;
        validate_connection(connection, true)?;

        let clock = RunInfo::start();
        info!(
            "Starting export run {} from {}",
            clock.run_id(),
            connection.display_target()
        );

        let writer = ScriptWriter::create(output_dir)?;
        let conn = self.factory.connect(connection)?;
        let summary = export_catalog(conn, &writer)?;

        info!(
            "Export complete: {} domains, {} tables, {} procedures written to {}",
            summary.domains,
            summary.tables,
            summary.procedures,
            output_dir.display()
        );

        Ok(ExportReport {
            run: clock.finish(),
            output_dir: output_dir.to_path_buf(),
            domains: summary.domains,
            tables: summary.tables,
            procedures: summary.procedures,
            files: summary.files,
        })
    }

    /// Apply every script in `scripts_dir` to an existing database.
    pub fn update_database(
        &self,
        connection: &ConnectionConfig,
        scripts_dir: &Path,
    ) -> Result<ApplyReport> {
        require_path("scripts directory", scripts_dir)?;
        validate_connection(connection, true)?;

        let clock = RunInfo::start();
        let scripts = load_scripts(scripts_dir)?;
        if scripts.is_empty() {
            warn!("No .sql files found in {}", scripts_dir.display());
            return Ok(apply_report(clock, connection, false, None));
        }

        info!(
            "Starting update run {} against {}",
            clock.run_id(),
            connection.display_target()
        );
        let conn = self.factory.connect(connection)?;
        let log = apply_scripts(conn, scripts)?;
        info!("Update complete: {} scripts executed", log.executed_count());

        Ok(apply_report(clock, connection, false, Some(log)))
    }

    /// Create a fresh database in `db_dir` and apply every script in `scripts_dir`.
    ///
    /// An existing database file of the same name is deleted first.
    pub fn build_database(
        &self,
        connection: &ConnectionConfig,
        build: &BuildConfig,
        db_dir: &Path,
        scripts_dir: &Path,
    ) -> Result<ApplyReport> {
        require_path("database directory", db_dir)?;
        require_path("scripts directory", scripts_dir)?;
        validate_build(build)?;
        validate_connection(connection, false)?;

        let clock = RunInfo::start();
        // Every script must be readable before the old database is removed
        let scripts = load_scripts(scripts_dir)?;

        fs::create_dir_all(db_dir)?;
        let db_path = db_dir.join(&build.database_file);
        if db_path.exists() {
            warn!("Deleting existing database {}", db_path.display());
            fs::remove_file(&db_path)?;
        }

        let target = connection.with_database(db_path.to_string_lossy());
        info!(
            "Starting build run {}: creating {} (page size {}, charset {})",
            clock.run_id(),
            target.display_target(),
            build.page_size,
            build.charset
        );
        let conn = self.factory.create(&target, &db_path, build)?;

        if scripts.is_empty() {
            warn!("No .sql files found in {}", scripts_dir.display());
            return Ok(apply_report(clock, &target, true, None));
        }

        let log = apply_scripts(conn, scripts)?;
        info!("Build complete: {} scripts executed", log.executed_count());

        Ok(apply_report(clock, &target, true, Some(log)))
    }
}

fn apply_report(
    clock: RunClock,
    connection: &ConnectionConfig,
    created: bool,
    log: Option<ExecutionLog>,
) -> ApplyReport {
    let (scripts_executed, scripts_skipped, scripts) = match log {
        Some(log) => (log.executed_count(), log.skipped_count(), log.scripts),
        None => (0, 0, Vec::new()),
    };
    ApplyReport {
        run: clock.finish(),
        database: connection.display_target(),
        created,
        scripts_total: scripts.len(),
        scripts_executed,
        scripts_skipped,
        scripts,
    }
}

fn require_path(what: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(FbMetaError::Config(format!("{} is required", what)));
    }
    Ok(())
}
