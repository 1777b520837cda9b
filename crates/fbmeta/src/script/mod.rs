//! SQL script files: loading, naming, writing and execution.
//!
//! - [`writer`]: deterministic file names and output for generated DDL
//! - [`executor`]: ordered, abort-on-first-failure batch execution

pub mod executor;
pub mod writer;

pub use executor::{ExecutionLog, RunOutcome, ScriptExecutor, ScriptState, ScriptStatus};
pub use writer::{script_file_name, ScriptCategory, ScriptWriter, LINE_ENDING};

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{FbMetaError, Result};

/// A script on disk, either to execute or freshly generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFile {
    pub path: PathBuf,
    pub content: String,
}

impl ScriptFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// File name for log lines and error reports.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Key used to order scripts: the path, compared case-insensitively.
    pub fn ordinal_key(&self) -> String {
        self.path.to_string_lossy().to_uppercase()
    }

    /// Whether there is nothing to execute.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Case-insensitive ordinal path order; exact path breaks ties.
pub fn compare_scripts(a: &ScriptFile, b: &ScriptFile) -> Ordering {
    a.ordinal_key()
        .cmp(&b.ordinal_key())
        .then_with(|| a.path.cmp(&b.path))
}

/// Sort scripts into execution order.
pub fn sort_scripts(scripts: &mut [ScriptFile]) {
    scripts.sort_by(compare_scripts);
}

/// Load every `*.sql` file directly inside `dir`, in execution order.
///
/// The extension match is case-insensitive and subdirectories are not
/// searched. A missing directory is [`FbMetaError::NotFound`].
pub fn load_scripts(dir: &Path) -> Result<Vec<ScriptFile>> {
    if !dir.is_dir() {
        return Err(FbMetaError::NotFound(dir.to_path_buf()));
    }

    let mut scripts = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() || !has_sql_extension(&path) {
            continue;
        }

        let content = fs::read_to_string(&path)?;
        // Editors on Windows like to prepend a BOM
        let content = content
            .strip_prefix('\u{feff}')
            .map(str::to_string)
            .unwrap_or(content);
        scripts.push(ScriptFile::new(path, content));
    }

    sort_scripts(&mut scripts);
    debug!("Loaded {} scripts from {}", scripts.len(), dir.display());
    Ok(scripts)
}

fn has_sql_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("sql"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_scripts_case_insensitive_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.sql"), "B").unwrap();
        fs::write(dir.path().join("A.sql"), "A").unwrap();
        fs::write(dir.path().join("c.SQL"), "C").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested.sql")).unwrap();

        let scripts = load_scripts(dir.path()).unwrap();
        let names: Vec<_> = scripts.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["A.sql", "b.sql", "c.SQL"]);
    }

    #[test]
    fn test_load_scripts_is_not_recursive() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("inner.sql"), "X").unwrap();

        assert!(load_scripts(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_scripts_strips_bom() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("01.sql"), "\u{feff}CREATE TABLE T (A INTEGER);").unwrap();

        let scripts = load_scripts(dir.path()).unwrap();
        assert_eq!(scripts[0].content, "CREATE TABLE T (A INTEGER);");
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            load_scripts(&missing),
            Err(FbMetaError::NotFound(p)) if p == missing
        ));
    }

    #[test]
    fn test_sort_scripts_ignores_case() {
        let mut scripts = vec![
            ScriptFile::new("dir/b.sql", ""),
            ScriptFile::new("dir/A.sql", ""),
            ScriptFile::new("dir/c.SQL", ""),
            ScriptFile::new("dir/B_2.sql", ""),
        ];
        sort_scripts(&mut scripts);
        let names: Vec<_> = scripts.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["A.sql", "b.sql", "B_2.sql", "c.SQL"]);
    }

    #[test]
    fn test_blank_script() {
        assert!(ScriptFile::new("x.sql", " \n\t ").is_blank());
        assert!(!ScriptFile::new("x.sql", "SELECT 1 FROM RDB$DATABASE;").is_blank());
    }
}
