//! Catalog reader: typed snapshots of domains, tables and procedures.
//!
//! Each `list_*` call issues its queries once, decodes the rows into schema
//! types and returns them in a fixed order (by name, then by position), so
//! repeated exports of an unchanged database produce identical output.
//! Any failure is returned immediately as [`FbMetaError::CatalogRead`].

pub mod queries;

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::core::{
    CatalogRow, CatalogSource, Column, ColumnType, Domain, FieldType, ParameterDirection,
    Procedure, ProcedureParameter, Table,
};
use crate::error::{FbMetaError, Result};
use crate::typemap::map_type;

/// Reads the system catalog through a [`CatalogSource`].
pub struct CatalogReader<S> {
    source: S,
    /// Names of user domains, loaded on first use.
    domain_names: Option<HashSet<String>>,
}

impl<S: CatalogSource> CatalogReader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            domain_names: None,
        }
    }

    fn fetch(&mut self, context: &str, sql: &str) -> Result<Vec<CatalogRow>> {
        let rows = self
            .source
            .query(sql)
            .map_err(|e| FbMetaError::catalog(context, e))?;
        debug!("Catalog query '{}' returned {} rows", context, rows.len());
        Ok(rows)
    }

    /// All user domains ordered by name.
    ///
    /// Names with the reserved `RDB$` prefix are dropped even when the system
    /// flag says otherwise: those are the implicit domains behind inline
    /// column types.
    pub fn list_domains(&mut self) -> Result<Vec<Domain>> {
        let rows = self.fetch("domains", queries::DOMAINS)?;

        let mut domains = rows
            .iter()
            .map(decode_domain)
            .filter(|d| !matches!(d, Ok(d) if is_reserved_name(&d.name)))
            .collect::<Result<Vec<_>>>()?;
        domains.sort_by(|a, b| a.name.cmp(&b.name));

        self.domain_names = Some(domains.iter().map(|d| d.name.clone()).collect());
        Ok(domains)
    }

    /// All user tables with columns, ordered by table name then column position.
    pub fn list_tables(&mut self) -> Result<Vec<Table>> {
        if self.domain_names.is_none() {
            self.list_domains()?;
        }
        let rows = self.fetch("table columns", queries::TABLE_COLUMNS)?;
        let domain_names = self.domain_names.clone().unwrap_or_default();

        // BTreeMap keeps table output order independent of row arrival order.
        let mut tables: BTreeMap<String, Vec<Column>> = BTreeMap::new();
        for row in &rows {
            let (table_name, column) = decode_column(row, &domain_names)?;
            tables.entry(table_name).or_default().push(column);
        }

        Ok(tables
            .into_iter()
            .map(|(name, mut columns)| {
                columns.sort_by_key(|c| c.ordinal_position);
                Table { name, columns }
            })
            .collect())
    }

    /// All user procedures with parameters and source, ordered by name.
    pub fn list_procedures(&mut self) -> Result<Vec<Procedure>> {
        let param_rows = self.fetch("procedure parameters", queries::PROCEDURE_PARAMETERS)?;

        let mut params: BTreeMap<String, Vec<ProcedureParameter>> = BTreeMap::new();
        for row in &param_rows {
            let (proc_name, param) = decode_parameter(row)?;
            params.entry(proc_name).or_default().push(param);
        }

        let proc_rows = self.fetch("procedures", queries::PROCEDURES)?;
        let mut procedures = proc_rows
            .iter()
            .map(|row| {
                let name = row.text(0)?;
                let source = row.raw_text(1)?;
                let (mut inputs, mut outputs): (Vec<_>, Vec<_>) = params
                    .remove(&name)
                    .unwrap_or_default()
                    .into_iter()
                    .partition(|p| p.direction == ParameterDirection::Input);
                inputs.sort_by_key(|p| p.ordinal);
                outputs.sort_by_key(|p| p.ordinal);
                Ok(Procedure::new(name, inputs, outputs, source.as_deref()))
            })
            .collect::<Result<Vec<_>>>()?;
        procedures.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(procedures)
    }
}

fn is_reserved_name(name: &str) -> bool {
    name.len() >= queries::SYSTEM_PREFIX.len()
        && name.is_char_boundary(queries::SYSTEM_PREFIX.len())
        && name[..queries::SYSTEM_PREFIX.len()].eq_ignore_ascii_case(queries::SYSTEM_PREFIX)
}

/// Decode the five type columns starting at `start`.
fn decode_field_type(row: &CatalogRow, start: usize) -> Result<FieldType> {
    Ok(FieldType {
        type_code: narrow(row.int_or_zero(start)?)?,
        sub_type: narrow(row.int_or_zero(start + 1)?)?,
        length: narrow(row.int_or_zero(start + 2)?)?,
        precision: narrow(row.int_or_zero(start + 3)?)?,
        scale: narrow(row.int_or_zero(start + 4)?)?,
    })
}

fn narrow(value: i64) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| FbMetaError::catalog("row decode", format!("{} exceeds i32 range", value)))
}

fn decode_domain(row: &CatalogRow) -> Result<Domain> {
    Ok(Domain {
        name: row.text(0)?,
        field_type: decode_field_type(row, 1)?,
        default_clause: row.opt_text(6)?,
        validation_clause: row.opt_text(7)?,
        not_null: row.flag(8)?,
    })
}

fn decode_column(row: &CatalogRow, domain_names: &HashSet<String>) -> Result<(String, Column)> {
    let table_name = row.text(0)?;
    let source_type_name = row.text(2)?;
    let field_type = decode_field_type(row, 5)?;

    let column_type = if domain_names.contains(&source_type_name) {
        ColumnType::Domain(source_type_name.clone())
    } else {
        ColumnType::Inline(map_type(&field_type))
    };

    let column = Column {
        name: row.text(1)?,
        source_type_name,
        column_type,
        field_type,
        default_clause: row.opt_text(4)?,
        not_null: row.flag(3)?,
        ordinal_position: narrow(row.int_or_zero(10)?)?,
    };
    Ok((table_name, column))
}

fn decode_parameter(row: &CatalogRow) -> Result<(String, ProcedureParameter)> {
    let proc_name = row.text(0)?;
    let param = ProcedureParameter {
        name: row.text(1)?,
        direction: ParameterDirection::from_catalog(row.int_or_zero(2)?),
        ordinal: narrow(row.int_or_zero(3)?)?,
        field_type: decode_field_type(row, 4)?,
    };
    Ok((proc_name, param))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_row;
    use crate::testing::FakeDatabase;

    fn domain_row(name: &str, type_code: i64, not_null: i64) -> CatalogRow {
        catalog_row![
            name,
            type_code,
            0,
            4,
            None::<i64>,
            0,
            None::<String>,
            None::<String>,
            not_null
        ]
    }

    fn column_row(table: &str, column: &str, source: &str, type_code: i64, pos: i64) -> CatalogRow {
        catalog_row![
            table,
            column,
            source,
            None::<i64>,
            None::<String>,
            type_code,
            0,
            4,
            0,
            0,
            pos
        ]
    }

    fn param_row(proc: &str, name: &str, direction: i64, number: i64) -> CatalogRow {
        catalog_row![proc, name, direction, number, 8, 0, 4, 0, 0]
    }

    #[test]
    fn test_domains_sorted_and_reserved_filtered() {
        let mut db = FakeDatabase::new().with_rows(
            queries::DOMAINS,
            vec![
                domain_row("D_NAME                ", 37, 0),
                domain_row("RDB$123", 8, 0),
                domain_row("rdb$lower", 8, 0),
                domain_row("D_AMOUNT", 16, 1),
            ],
        );
        let mut reader = CatalogReader::new(&mut db);
        let domains = reader.list_domains().unwrap();

        let names: Vec<_> = domains.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["D_AMOUNT", "D_NAME"]);
        assert!(domains[0].not_null);
        assert!(!domains[1].not_null);
    }

    #[test]
    fn test_domain_clauses_decoded_verbatim() {
        let mut db = FakeDatabase::new().with_rows(
            queries::DOMAINS,
            vec![catalog_row![
                "D_QTY",
                8,
                0,
                4,
                0,
                0,
                "DEFAULT 0  ",
                "CHECK (VALUE >= 0)",
                1
            ]],
        );
        let domains = CatalogReader::new(&mut db).list_domains().unwrap();
        assert_eq!(domains[0].default_clause.as_deref(), Some("DEFAULT 0"));
        assert_eq!(
            domains[0].validation_clause.as_deref(),
            Some("CHECK (VALUE >= 0)")
        );
    }

    #[test]
    fn test_columns_resolve_domain_or_inline() {
        let mut db = FakeDatabase::new()
            .with_rows(queries::DOMAINS, vec![domain_row("D_ID", 8, 1)])
            .with_rows(
                queries::TABLE_COLUMNS,
                vec![
                    column_row("ORDERS", "ID", "D_ID", 8, 0),
                    column_row("ORDERS", "NOTE", "RDB$45", 37, 1),
                ],
            );
        let tables = CatalogReader::new(&mut db).list_tables().unwrap();

        assert_eq!(tables.len(), 1);
        let orders = &tables[0];
        assert_eq!(
            orders.columns[0].column_type,
            ColumnType::Domain("D_ID".into())
        );
        assert_eq!(
            orders.columns[1].column_type,
            ColumnType::Inline("VARCHAR(4)".into())
        );
    }

    #[test]
    fn test_reserved_field_source_is_never_a_domain() {
        // RDB$ sources come back with system flag 0 but must stay inline
        let mut db = FakeDatabase::new()
            .with_rows(queries::DOMAINS, vec![domain_row("RDB$45", 8, 0)])
            .with_rows(
                queries::TABLE_COLUMNS,
                vec![column_row("T", "C", "RDB$45", 8, 0)],
            );
        let tables = CatalogReader::new(&mut db).list_tables().unwrap();
        assert_eq!(
            tables[0].columns[0].column_type,
            ColumnType::Inline("INTEGER".into())
        );
    }

    #[test]
    fn test_tables_sorted_and_columns_in_position_order() {
        let mut db = FakeDatabase::new()
            .with_rows(queries::DOMAINS, vec![])
            .with_rows(
                queries::TABLE_COLUMNS,
                vec![
                    column_row("ZETA", "B", "RDB$1", 8, 1),
                    column_row("ALPHA", "X", "RDB$2", 8, 0),
                    column_row("ZETA", "A", "RDB$3", 8, 0),
                ],
            );
        let tables = CatalogReader::new(&mut db).list_tables().unwrap();

        let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["ALPHA", "ZETA"]);
        let zeta_cols: Vec<_> = tables[1].columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(zeta_cols, vec!["A", "B"]);
    }

    #[test]
    fn test_list_tables_loads_domains_once() {
        let mut db = FakeDatabase::new()
            .with_rows(queries::DOMAINS, vec![])
            .with_rows(queries::TABLE_COLUMNS, vec![]);
        {
            let mut reader = CatalogReader::new(&mut db);
            reader.list_domains().unwrap();
            reader.list_tables().unwrap();
        }
        assert_eq!(db.query_count(queries::DOMAINS), 1);
    }

    #[test]
    fn test_procedures_split_parameters() {
        let mut db = FakeDatabase::new()
            .with_rows(
                queries::PROCEDURE_PARAMETERS,
                vec![
                    param_row("GET_TOTAL", "RESULT", 1, 0),
                    param_row("GET_TOTAL", "B", 0, 1),
                    param_row("GET_TOTAL", "A", 0, 0),
                ],
            )
            .with_rows(
                queries::PROCEDURES,
                vec![
                    catalog_row!["GET_TOTAL", "BEGIN SUSPEND; END"],
                    catalog_row!["CLEANUP", None::<String>],
                ],
            );
        let procedures = CatalogReader::new(&mut db).list_procedures().unwrap();

        assert_eq!(procedures[0].name, "CLEANUP");
        assert!(procedures[0].inputs.is_empty());
        assert_eq!(procedures[0].body, "");

        let total = &procedures[1];
        let inputs: Vec<_> = total.inputs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(inputs, vec!["A", "B"]);
        assert_eq!(total.outputs.len(), 1);
        assert_eq!(total.outputs[0].name, "RESULT");
        assert!(!total.body_is_full_statement);
    }

    #[test]
    fn test_query_failure_is_catalog_error() {
        let mut db = FakeDatabase::new().with_failure(queries::DOMAINS, "connection lost");
        let err = CatalogReader::new(&mut db).list_domains().unwrap_err();
        match err {
            FbMetaError::CatalogRead { context, message } => {
                assert_eq!(context, "domains");
                assert!(message.contains("connection lost"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
