//! Firebird field type codes to column type syntax.

use crate::core::FieldType;

/// `RDB$FIELD_TYPE` codes.
pub mod codes {
    pub const SMALLINT: i32 = 7;
    pub const INTEGER: i32 = 8;
    pub const FLOAT: i32 = 10;
    pub const DATE: i32 = 12;
    pub const TIME: i32 = 13;
    pub const CHAR: i32 = 14;
    pub const INT64: i32 = 16;
    pub const DOUBLE: i32 = 27;
    pub const TIMESTAMP: i32 = 35;
    pub const VARCHAR: i32 = 37;
    pub const BLOB: i32 = 261;
}

/// Default precision when an exact numeric has none recorded.
const DEFAULT_NUMERIC_PRECISION: i32 = 18;

/// Map a catalog field type to Firebird type syntax.
///
/// Total: unknown codes map to `BLOB`.
pub fn map_type(field: &FieldType) -> String {
    match field.type_code {
        codes::SMALLINT => "SMALLINT".to_string(),
        codes::INTEGER => "INTEGER".to_string(),
        codes::INT64 => match field.sub_type {
            // 1 = NUMERIC, 2 = DECIMAL; both are emitted as NUMERIC
            1 | 2 => {
                let precision = if field.precision != 0 {
                    field.precision
                } else {
                    DEFAULT_NUMERIC_PRECISION
                };
                // Scale is stored negative for fractional digits
                format!("NUMERIC({},{})", precision, field.scale.unsigned_abs())
            }
            _ => "BIGINT".to_string(),
        },
        codes::FLOAT => "FLOAT".to_string(),
        codes::DOUBLE => "DOUBLE PRECISION".to_string(),
        codes::CHAR => format!("CHAR({})", field.length),
        codes::VARCHAR => format!("VARCHAR({})", field.length),
        codes::DATE => "DATE".to_string(),
        codes::TIME => "TIME".to_string(),
        codes::TIMESTAMP => "TIMESTAMP".to_string(),
        codes::BLOB => "BLOB".to_string(),
        _ => "BLOB".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(sub_type: i32, precision: i32, scale: i32) -> FieldType {
        FieldType {
            type_code: codes::INT64,
            sub_type,
            length: 8,
            precision,
            scale,
        }
    }

    fn sized(type_code: i32, length: i32) -> FieldType {
        FieldType {
            length,
            ..FieldType::of(type_code)
        }
    }

    #[test]
    fn test_integer_types() {
        assert_eq!(map_type(&FieldType::of(7)), "SMALLINT");
        assert_eq!(map_type(&FieldType::of(8)), "INTEGER");
        assert_eq!(map_type(&numeric(0, 0, 0)), "BIGINT");
    }

    #[test]
    fn test_numeric_scale_normalized() {
        assert_eq!(map_type(&numeric(1, 10, -2)), "NUMERIC(10,2)");
        assert_eq!(map_type(&numeric(2, 15, -4)), "NUMERIC(15,4)");
    }

    #[test]
    fn test_numeric_default_precision() {
        assert_eq!(map_type(&numeric(1, 0, -3)), "NUMERIC(18,3)");
    }

    #[test]
    fn test_numeric_extreme_scale_does_not_overflow() {
        assert_eq!(
            map_type(&numeric(1, 10, i32::MIN)),
            format!("NUMERIC(10,{})", 2147483648u32)
        );
    }

    #[test]
    fn test_floating_types() {
        assert_eq!(map_type(&FieldType::of(10)), "FLOAT");
        assert_eq!(map_type(&FieldType::of(27)), "DOUBLE PRECISION");
    }

    #[test]
    fn test_string_types() {
        assert_eq!(map_type(&sized(14, 10)), "CHAR(10)");
        assert_eq!(map_type(&sized(37, 255)), "VARCHAR(255)");
    }

    #[test]
    fn test_datetime_types() {
        assert_eq!(map_type(&FieldType::of(12)), "DATE");
        assert_eq!(map_type(&FieldType::of(13)), "TIME");
        assert_eq!(map_type(&FieldType::of(35)), "TIMESTAMP");
    }

    #[test]
    fn test_blob_and_unknown_fall_back_to_blob() {
        assert_eq!(map_type(&FieldType::of(261)), "BLOB");
        assert_eq!(map_type(&FieldType::of(0)), "BLOB");
        assert_eq!(map_type(&FieldType::of(23)), "BLOB");
        assert_eq!(map_type(&FieldType::of(-1)), "BLOB");
    }

    #[test]
    fn test_mapping_is_total_and_non_empty() {
        for type_code in -5..300 {
            for sub_type in 0..4 {
                let field = FieldType {
                    type_code,
                    sub_type,
                    length: 4,
                    precision: 0,
                    scale: -1,
                };
                assert!(!map_type(&field).is_empty());
            }
        }
    }
}
