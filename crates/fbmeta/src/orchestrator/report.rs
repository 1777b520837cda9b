//! Run reports printed by the CLI.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::script::ScriptStatus;

/// Timing shared by every report.
#[derive(Debug, Clone, Serialize)]
pub struct RunInfo {
    /// Unique run identifier.
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_seconds: f64,
}

impl RunInfo {
    /// Start timing a run.
    pub fn start() -> RunClock {
        RunClock {
            run_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
        }
    }
}

/// An in-progress run, finished into a [`RunInfo`].
#[derive(Debug, Clone)]
pub struct RunClock {
    run_id: String,
    started_at: DateTime<Utc>,
}

impl RunClock {
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn finish(self) -> RunInfo {
        let completed_at = Utc::now();
        let duration_seconds =
            (completed_at - self.started_at).num_milliseconds().max(0) as f64 / 1000.0;
        RunInfo {
            run_id: self.run_id,
            started_at: self.started_at,
            completed_at,
            duration_seconds,
        }
    }
}

/// Result of `export-scripts`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    #[serde(flatten)]
    pub run: RunInfo,
    pub output_dir: PathBuf,
    pub domains: usize,
    pub tables: usize,
    pub procedures: usize,
    /// Files written, in write order.
    pub files: Vec<PathBuf>,
}

/// Result of `build-db` and `update-db`.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    #[serde(flatten)]
    pub run: RunInfo,
    /// `host/port:database` the scripts were applied to.
    pub database: String,
    /// Whether the database was created by this run.
    pub created: bool,
    pub scripts_total: usize,
    pub scripts_executed: usize,
    pub scripts_skipped: usize,
    pub scripts: Vec<ScriptStatus>,
}

impl ExportReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ApplyReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
