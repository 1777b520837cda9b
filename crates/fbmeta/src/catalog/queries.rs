//! System catalog queries.
//!
//! Column order in each SELECT is part of the decoding contract in
//! `catalog/mod.rs`. `RDB$SYSTEM_FLAG` is NULL on some user objects created
//! by older servers, so user objects are `COALESCE(.., 0) = 0`.

/// Reserved prefix of system-generated catalog names.
pub const SYSTEM_PREFIX: &str = "RDB$";

/// User domains with their type tuple and clauses.
pub const DOMAINS: &str = r#"
SELECT
    f.RDB$FIELD_NAME,
    f.RDB$FIELD_TYPE,
    f.RDB$FIELD_SUB_TYPE,
    f.RDB$FIELD_LENGTH,
    f.RDB$FIELD_PRECISION,
    f.RDB$FIELD_SCALE,
    f.RDB$DEFAULT_SOURCE,
    f.RDB$VALIDATION_SOURCE,
    f.RDB$NULL_FLAG
FROM RDB$FIELDS f
WHERE COALESCE(f.RDB$SYSTEM_FLAG, 0) = 0
ORDER BY f.RDB$FIELD_NAME
"#;

/// Columns of user tables (views excluded), one row per column.
pub const TABLE_COLUMNS: &str = r#"
SELECT
    r.RDB$RELATION_NAME,
    rf.RDB$FIELD_NAME,
    rf.RDB$FIELD_SOURCE,
    rf.RDB$NULL_FLAG,
    rf.RDB$DEFAULT_SOURCE,
    fld.RDB$FIELD_TYPE,
    fld.RDB$FIELD_SUB_TYPE,
    fld.RDB$FIELD_LENGTH,
    fld.RDB$FIELD_PRECISION,
    fld.RDB$FIELD_SCALE,
    rf.RDB$FIELD_POSITION
FROM RDB$RELATIONS r
JOIN RDB$RELATION_FIELDS rf ON rf.RDB$RELATION_NAME = r.RDB$RELATION_NAME
JOIN RDB$FIELDS fld ON fld.RDB$FIELD_NAME = rf.RDB$FIELD_SOURCE
WHERE COALESCE(r.RDB$SYSTEM_FLAG, 0) = 0
  AND r.RDB$VIEW_BLR IS NULL
ORDER BY r.RDB$RELATION_NAME, rf.RDB$FIELD_POSITION
"#;

/// Procedure parameters; `RDB$PARAMETER_TYPE` 0 = input, 1 = output.
pub const PROCEDURE_PARAMETERS: &str = r#"
SELECT
    pp.RDB$PROCEDURE_NAME,
    pp.RDB$PARAMETER_NAME,
    pp.RDB$PARAMETER_TYPE,
    pp.RDB$PARAMETER_NUMBER,
    fld.RDB$FIELD_TYPE,
    fld.RDB$FIELD_SUB_TYPE,
    fld.RDB$FIELD_LENGTH,
    fld.RDB$FIELD_PRECISION,
    fld.RDB$FIELD_SCALE
FROM RDB$PROCEDURE_PARAMETERS pp
JOIN RDB$FIELDS fld ON fld.RDB$FIELD_NAME = pp.RDB$FIELD_SOURCE
WHERE COALESCE(pp.RDB$SYSTEM_FLAG, 0) = 0
ORDER BY pp.RDB$PROCEDURE_NAME, pp.RDB$PARAMETER_TYPE, pp.RDB$PARAMETER_NUMBER
"#;

/// Procedures with their stored source text.
pub const PROCEDURES: &str = r#"
SELECT
    p.RDB$PROCEDURE_NAME,
    p.RDB$PROCEDURE_SOURCE
FROM RDB$PROCEDURES p
WHERE COALESCE(p.RDB$SYSTEM_FLAG, 0) = 0
ORDER BY p.RDB$PROCEDURE_NAME
"#;
