//! Ordered script execution with abort on first failure.
//!
//! Each file moves `Pending -> Running -> Succeeded | Failed`. Blank files go
//! straight to `Succeeded` without touching the database. The first failure
//! aborts the run; later files stay `Pending` and are never attempted. Nothing
//! is retried and nothing already applied is undone.

use serde::Serialize;
use tracing::{error, info};

use crate::core::ScriptTarget;
use crate::error::{FbMetaError, Result};

use super::{sort_scripts, ScriptFile};

/// Per-file execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// What happened to one script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptStatus {
    pub file: String,
    pub state: ScriptState,
    /// True when the file was blank and nothing was sent to the database.
    pub skipped: bool,
}

/// Overall result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    AllSucceeded,
    AbortedAt { file: String, message: String },
}

/// Execution record for every script in the run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionLog {
    pub scripts: Vec<ScriptStatus>,
    pub outcome: RunOutcome,
}

impl ExecutionLog {
    pub fn executed_count(&self) -> usize {
        self.scripts
            .iter()
            .filter(|s| s.state == ScriptState::Succeeded && !s.skipped)
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.scripts.iter().filter(|s| s.skipped).count()
    }

    /// Turn an aborted run into its [`FbMetaError::ScriptExecution`].
    pub fn into_result(self) -> Result<Self> {
        if let RunOutcome::AbortedAt { file, message } = &self.outcome {
            return Err(FbMetaError::script(file.clone(), message));
        }
        Ok(self)
    }
}

/// Applies scripts to a [`ScriptTarget`], one batch per file.
pub struct ScriptExecutor<T> {
    target: T,
}

impl<T: ScriptTarget> ScriptExecutor<T> {
    pub fn new(target: T) -> Self {
        Self { target }
    }

    /// Execute `scripts` in case-insensitive path order.
    pub fn run(&mut self, mut scripts: Vec<ScriptFile>) -> ExecutionLog {
        sort_scripts(&mut scripts);

        let mut statuses: Vec<ScriptStatus> = scripts
            .iter()
            .map(|s| ScriptStatus {
                file: s.name(),
                state: ScriptState::Pending,
                skipped: false,
            })
            .collect();

        for (idx, script) in scripts.iter().enumerate() {
            if script.is_blank() {
                statuses[idx].state = ScriptState::Succeeded;
                statuses[idx].skipped = true;
                continue;
            }

            info!("Executing script: {}", statuses[idx].file);
            statuses[idx].state = ScriptState::Running;

            if let Err(e) = self.target.execute_batch(&script.content) {
                statuses[idx].state = ScriptState::Failed;
                let file = statuses[idx].file.clone();
                let message = e.to_string();
                error!("Error in script {}: {}", file, message);
                return ExecutionLog {
                    scripts: statuses,
                    outcome: RunOutcome::AbortedAt { file, message },
                };
            }
            statuses[idx].state = ScriptState::Succeeded;
        }

        ExecutionLog {
            scripts: statuses,
            outcome: RunOutcome::AllSucceeded,
        }
    }
}
