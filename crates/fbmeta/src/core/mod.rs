//! Core abstractions shared by every stage of a run.
//!
//! - [`schema`]: domain, table and procedure snapshots
//! - [`row`]: driver-neutral catalog rows
//! - [`traits`]: catalog, execution and connection seams

pub mod row;
pub mod schema;
pub mod traits;

pub use row::{CatalogRow, CatalogValue};
pub use schema::{
    quote_ident, Column, ColumnType, Domain, FieldType, ParameterDirection, Procedure,
    ProcedureParameter, Table,
};
pub use traits::{CatalogSource, DatabaseFactory, ScriptTarget};
