//! Schema object snapshots read from the Firebird system catalog.
//!
//! Every value here is produced by a catalog read and never mutated afterwards.

use serde::Serialize;

/// Raw field type tuple from `RDB$FIELDS`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FieldType {
    /// `RDB$FIELD_TYPE` (blr type code).
    pub type_code: i32,
    /// `RDB$FIELD_SUB_TYPE`.
    pub sub_type: i32,
    /// `RDB$FIELD_LENGTH` in bytes.
    pub length: i32,
    /// `RDB$FIELD_PRECISION`.
    pub precision: i32,
    /// `RDB$FIELD_SCALE`, negative for fractional digits.
    pub scale: i32,
}

impl FieldType {
    /// Field type with only the type code set.
    pub fn of(type_code: i32) -> Self {
        Self {
            type_code,
            ..Self::default()
        }
    }
}

/// User-defined domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain {
    pub name: String,
    pub field_type: FieldType,
    /// Verbatim `DEFAULT ...` fragment.
    pub default_clause: Option<String>,
    /// Verbatim `CHECK (...)` fragment.
    pub validation_clause: Option<String>,
    pub not_null: bool,
}

/// How a column declares its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    /// Reference to a user domain by name.
    Domain(String),
    /// Inline type syntax produced by the type mapper.
    Inline(String),
}

impl ColumnType {
    /// Type text as it appears in a column definition.
    pub fn to_sql(&self) -> String {
        match self {
            ColumnType::Domain(name) => quote_ident(name),
            ColumnType::Inline(sql) => sql.clone(),
        }
    }
}

/// Table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    /// `RDB$FIELD_SOURCE`: a domain name or a generated `RDB$nnn` name.
    pub source_type_name: String,
    pub column_type: ColumnType,
    pub field_type: FieldType,
    pub default_clause: Option<String>,
    pub not_null: bool,
    /// `RDB$FIELD_POSITION`, defines declaration order.
    pub ordinal_position: i32,
}

/// Table with its columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

/// Parameter direction as stored in `RDB$PARAMETER_TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParameterDirection {
    Input,
    Output,
}

impl ParameterDirection {
    /// Decode `RDB$PARAMETER_TYPE` (0 = input, anything else = output).
    pub fn from_catalog(code: i64) -> Self {
        if code == 0 {
            ParameterDirection::Input
        } else {
            ParameterDirection::Output
        }
    }
}

/// Stored procedure parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcedureParameter {
    pub name: String,
    pub field_type: FieldType,
    pub direction: ParameterDirection,
    /// `RDB$PARAMETER_NUMBER` within its direction.
    pub ordinal: i32,
}

/// Stored procedure with its signature and source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Procedure {
    pub name: String,
    pub inputs: Vec<ProcedureParameter>,
    pub outputs: Vec<ProcedureParameter>,
    /// Trimmed `RDB$PROCEDURE_SOURCE`.
    pub body: String,
    /// The stored source is already a complete CREATE/ALTER statement.
    pub body_is_full_statement: bool,
}

impl Procedure {
    /// Build a procedure, classifying the stored source.
    pub fn new(
        name: impl Into<String>,
        inputs: Vec<ProcedureParameter>,
        outputs: Vec<ProcedureParameter>,
        source: Option<&str>,
    ) -> Self {
        let body = source.map(str::trim).unwrap_or_default().to_string();
        let body_is_full_statement = is_full_statement(&body);
        Self {
            name: name.into(),
            inputs,
            outputs,
            body,
            body_is_full_statement,
        }
    }
}

/// True when the text starts with the keyword CREATE or ALTER.
pub fn is_full_statement(text: &str) -> bool {
    let text = text.trim_start();
    ["CREATE", "ALTER"].iter().any(|keyword| {
        text.len() >= keyword.len()
            && text.is_char_boundary(keyword.len())
            && text[..keyword.len()].eq_ignore_ascii_case(keyword)
            && text[keyword.len()..]
                .chars()
                .next()
                .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == '$'))
    })
}

/// Quote a Firebird identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
