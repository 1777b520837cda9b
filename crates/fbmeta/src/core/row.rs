//! Driver-neutral catalog result rows.
//!
//! Catalog queries only ever return nullable integers and (possibly large)
//! text, so a row is a vector of [`CatalogValue`] cells. Drivers convert
//! their native rows into this shape; the catalog reader decodes from it.

use crate::error::{FbMetaError, Result};

/// One cell of a catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValue {
    Null,
    Int(i64),
    Text(String),
}

impl From<i64> for CatalogValue {
    fn from(v: i64) -> Self {
        CatalogValue::Int(v)
    }
}

impl From<i32> for CatalogValue {
    fn from(v: i32) -> Self {
        CatalogValue::Int(v as i64)
    }
}

impl From<&str> for CatalogValue {
    fn from(v: &str) -> Self {
        CatalogValue::Text(v.to_string())
    }
}

impl From<String> for CatalogValue {
    fn from(v: String) -> Self {
        CatalogValue::Text(v)
    }
}

impl<T: Into<CatalogValue>> From<Option<T>> for CatalogValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CatalogValue::Null, Into::into)
    }
}

/// A single result row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    values: Vec<CatalogValue>,
}

impl CatalogRow {
    pub fn new(values: Vec<CatalogValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn cell(&self, idx: usize) -> Result<&CatalogValue> {
        self.values.get(idx).ok_or_else(|| {
            FbMetaError::catalog(
                "row decode",
                format!("column {} out of range ({} columns)", idx, self.values.len()),
            )
        })
    }

    /// Required text, trimmed of CHAR padding.
    pub fn text(&self, idx: usize) -> Result<String> {
        match self.cell(idx)? {
            CatalogValue::Text(s) => Ok(s.trim().to_string()),
            CatalogValue::Int(v) => Ok(v.to_string()),
            CatalogValue::Null => Err(FbMetaError::catalog(
                "row decode",
                format!("column {} is NULL, expected text", idx),
            )),
        }
    }

    /// Optional text, trimmed; NULL and blank values are `None`.
    pub fn opt_text(&self, idx: usize) -> Result<Option<String>> {
        match self.cell(idx)? {
            CatalogValue::Null => Ok(None),
            CatalogValue::Text(s) => {
                let s = s.trim();
                Ok((!s.is_empty()).then(|| s.to_string()))
            }
            CatalogValue::Int(v) => Ok(Some(v.to_string())),
        }
    }

    /// Untrimmed text, for procedure sources where leading layout matters.
    pub fn raw_text(&self, idx: usize) -> Result<Option<String>> {
        match self.cell(idx)? {
            CatalogValue::Null => Ok(None),
            CatalogValue::Text(s) => Ok(Some(s.clone())),
            CatalogValue::Int(v) => Ok(Some(v.to_string())),
        }
    }

    /// Optional integer; NULL is `None`.
    pub fn opt_int(&self, idx: usize) -> Result<Option<i64>> {
        match self.cell(idx)? {
            CatalogValue::Null => Ok(None),
            CatalogValue::Int(v) => Ok(Some(*v)),
            CatalogValue::Text(s) => s.trim().parse().map(Some).map_err(|_| {
                FbMetaError::catalog(
                    "row decode",
                    format!("column {} holds '{}', expected an integer", idx, s.trim()),
                )
            }),
        }
    }

    /// Integer with NULL read as 0, the catalog's convention for unset sizes.
    pub fn int_or_zero(&self, idx: usize) -> Result<i64> {
        Ok(self.opt_int(idx)?.unwrap_or(0))
    }

    /// Flag column (`RDB$NULL_FLAG` and friends): true only when it equals 1.
    pub fn flag(&self, idx: usize) -> Result<bool> {
        Ok(self.opt_int(idx)? == Some(1))
    }
}

/// Build a [`CatalogRow`] from heterogeneous values.
///
/// ```
/// use fbmeta::catalog_row;
/// let row = catalog_row!["D_ID", 8, None::<i64>];
/// assert_eq!(row.len(), 3);
/// ```
#[macro_export]
macro_rules! catalog_row {
    ($($value:expr),* $(,)?) => {
        $crate::core::CatalogRow::new(vec![$($crate::core::CatalogValue::from($value)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_trimmed() {
        let row = catalog_row!["CUSTOMERS                      "];
        assert_eq!(row.text(0).unwrap(), "CUSTOMERS");
    }

    #[test]
    fn test_null_text_is_error_but_opt_is_none() {
        let row = catalog_row![None::<String>];
        assert!(matches!(
            row.text(0),
            Err(FbMetaError::CatalogRead { .. })
        ));
        assert_eq!(row.opt_text(0).unwrap(), None);
    }

    #[test]
    fn test_blank_opt_text_is_none() {
        let row = catalog_row!["   "];
        assert_eq!(row.opt_text(0).unwrap(), None);
    }

    #[test]
    fn test_int_or_zero() {
        let row = catalog_row![None::<i64>, -2];
        assert_eq!(row.int_or_zero(0).unwrap(), 0);
        assert_eq!(row.int_or_zero(1).unwrap(), -2);
    }

    #[test]
    fn test_flag() {
        let row = catalog_row![1, 0, None::<i64>];
        assert!(row.flag(0).unwrap());
        assert!(!row.flag(1).unwrap());
        assert!(!row.flag(2).unwrap());
    }

    #[test]
    fn test_out_of_range_is_catalog_error() {
        let row = catalog_row![1];
        assert!(matches!(
            row.opt_int(3),
            Err(FbMetaError::CatalogRead { .. })
        ));
    }

    #[test]
    fn test_non_numeric_text_as_int_is_error() {
        let row = catalog_row!["abc"];
        assert!(row.opt_int(0).is_err());
    }
}
