//! DDL assembly: one CREATE statement per catalog object.
//!
//! All builders are pure. Lines are joined with `\n`; the script writer adds
//! the platform line separator after the final semicolon.

use serde::Serialize;

use crate::core::{quote_ident, Domain, Procedure, ProcedureParameter, Table};
use crate::script::ScriptCategory;
use crate::typemap::map_type;

/// A generated statement ready to be written to its script file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DdlUnit {
    pub category: ScriptCategory,
    pub object_name: String,
    pub sql: String,
}

impl DdlUnit {
    pub fn for_domain(domain: &Domain) -> Self {
        Self {
            category: ScriptCategory::Domain,
            object_name: domain.name.clone(),
            sql: domain_ddl(domain),
        }
    }

    pub fn for_table(table: &Table) -> Self {
        Self {
            category: ScriptCategory::Table,
            object_name: table.name.clone(),
            sql: table_ddl(table),
        }
    }

    pub fn for_procedure(procedure: &Procedure) -> Self {
        Self {
            category: ScriptCategory::Procedure,
            object_name: procedure.name.clone(),
            sql: procedure_ddl(procedure),
        }
    }
}

/// Strip trailing whitespace and semicolons, then append exactly one `;`.
pub fn terminate_statement(text: &str) -> String {
    let mut statement = text
        .trim_end_matches(|c: char| c.is_whitespace() || c == ';')
        .to_string();
    statement.push(';');
    statement
}

/// `CREATE DOMAIN "<name>" AS <type> [default] [NOT NULL] [check];`
pub fn domain_ddl(domain: &Domain) -> String {
    let mut sql = format!(
        "CREATE DOMAIN {} AS {}",
        quote_ident(&domain.name),
        map_type(&domain.field_type)
    );

    if let Some(default) = &domain.default_clause {
        sql.push(' ');
        sql.push_str(default);
    }
    if domain.not_null {
        sql.push_str(" NOT NULL");
    }
    if let Some(check) = &domain.validation_clause {
        sql.push(' ');
        sql.push_str(check);
    }

    terminate_statement(&sql)
}

/// `CREATE TABLE` with one indented line per column in declaration order.
pub fn table_ddl(table: &Table) -> String {
    let columns: Vec<String> = table
        .columns
        .iter()
        .map(|col| {
            let mut line = format!("    {} {}", quote_ident(&col.name), col.column_type.to_sql());
            if let Some(default) = &col.default_clause {
                line.push(' ');
                line.push_str(default);
            }
            if col.not_null {
                line.push_str(" NOT NULL");
            }
            line
        })
        .collect();

    let sql = format!(
        "CREATE TABLE {} (\n{}\n);",
        quote_ident(&table.name),
        columns.join(",\n")
    );
    terminate_statement(&sql)
}

/// Stored procedure DDL.
///
/// A stored source that is already a full statement is emitted as-is and the
/// parameter metadata is ignored. Otherwise a `CREATE OR ALTER PROCEDURE`
/// header is synthesized; empty parameter or RETURNS lists are left out.
pub fn procedure_ddl(procedure: &Procedure) -> String {
    if procedure.body_is_full_statement {
        return terminate_statement(procedure.body.trim());
    }

    let mut sql = format!("CREATE OR ALTER PROCEDURE {}", quote_ident(&procedure.name));
    if !procedure.inputs.is_empty() {
        sql.push_str("\n    (");
        sql.push_str(&parameter_list(&procedure.inputs));
        sql.push(')');
    }
    if !procedure.outputs.is_empty() {
        sql.push_str("\nRETURNS (");
        sql.push_str(&parameter_list(&procedure.outputs));
        sql.push(')');
    }
    sql.push_str("\nAS\n");
    sql.push_str(&procedure.body);

    terminate_statement(&sql)
}

/// `"<name>" <type>` pairs joined by `, `.
pub fn parameter_list(params: &[ProcedureParameter]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", quote_ident(&p.name), map_type(&p.field_type)))
        .collect::<Vec<_>>()
        .join(", ")
}
