//! Script writer for generated DDL.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::ddl::DdlUnit;
use crate::error::{FbMetaError, Result};

/// Line separator written after the final semicolon of each script.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Object category; the numeric prefix fixes replay order by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptCategory {
    Domain,
    Table,
    Procedure,
}

impl ScriptCategory {
    /// File name prefix, e.g. `01_domain`.
    pub fn prefix(&self) -> &'static str {
        match self {
            ScriptCategory::Domain => "01_domain",
            ScriptCategory::Table => "02_table",
            ScriptCategory::Procedure => "03_procedure",
        }
    }
}

/// `<prefix>_<object>.sql`, e.g. `02_table_ORDERS.sql`.
///
/// Path separators in quoted identifiers are replaced so the file always
/// lands directly in the output directory.
pub fn script_file_name(category: ScriptCategory, object_name: &str) -> String {
    let safe: String = object_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    format!("{}_{}.sql", category.prefix(), safe)
}

/// Writes generated scripts into one output directory.
#[derive(Debug, Clone)]
pub struct ScriptWriter {
    output_dir: PathBuf,
}

impl ScriptWriter {
    /// Create the writer, creating the output directory if needed.
    pub fn create(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| FbMetaError::WriteScript {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    /// Write one script, replacing any existing file of the same name.
    pub fn write(
        &self,
        category: ScriptCategory,
        object_name: &str,
        content: &str,
    ) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(script_file_name(category, object_name));

        let mut text = String::with_capacity(content.len() + LINE_ENDING.len());
        text.push_str(content);
        text.push_str(LINE_ENDING);

        fs::write(&path, text).map_err(|source| FbMetaError::WriteScript {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Write a generated DDL unit.
    pub fn write_unit(&self, unit: &DdlUnit) -> Result<PathBuf> {
        self.write(unit.category, &unit.object_name, &unit.sql)
    }
}
