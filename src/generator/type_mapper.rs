use once_cell::sync::Lazy;
use regex::Regex;

use crate::generator::dialect::Dialect;
use crate::inference::types::{InferredType, DEFAULT_DECIMAL_PRECISION, DEFAULT_DECIMAL_SCALE};

/// Length used for `VARCHAR` without one.
pub const DEFAULT_VARCHAR_LENGTH: u32 = 255;
/// Length used for `CHAR` without one.
pub const DEFAULT_CHAR_LENGTH: u32 = 1;

static TYPE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_ ]*?)\s*(?:\(([^)]*)\))?\s*$").unwrap());

/// An abstract type token split into its base name and any inline arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TypeToken {
    base: String,
    args: Vec<u32>,
    raw: String,
}

impl TypeToken {
    fn parse(data_type: &str) -> Self {
        let raw = data_type.trim().to_uppercase();
        match TYPE_TOKEN_RE.captures(&raw) {
            Some(caps) => {
                let base = caps[1].to_string();
                let args = caps
                    .get(2)
                    .map(|m| {
                        m.as_str()
                            .split(',')
                            .filter_map(|arg| arg.trim().parse::<u32>().ok())
                            .collect()
                    })
                    .unwrap_or_default();
                Self { base, args, raw }
            }
            None => Self {
                base: raw.clone(),
                args: Vec::new(),
                raw,
            },
        }
    }

    fn arg(&self, index: usize) -> Option<u32> {
        self.args.get(index).copied()
    }
}

/// Render an inferred type as the literal type token for `dialect`.
///
/// Explicit precision/scale/length win over arguments written inline in the
/// type token (`DECIMAL(18,2)`). Unknown types pass through uppercased.
pub fn map_type(inferred: &InferredType, dialect: Dialect) -> String {
    let token = TypeToken::parse(&inferred.data_type);

    match token.base.as_str() {
        "STRING" => map_string(dialect),
        "DATE" => match dialect {
            Dialect::ClickHouse => "Date".to_string(),
            _ => "DATE".to_string(),
        },
        "TIMESTAMP" => match dialect {
            Dialect::ClickHouse => "DateTime".to_string(),
            _ => "TIMESTAMP".to_string(),
        },
        "DECIMAL" => {
            let precision = inferred.precision.or_else(|| token.arg(0));
            let scale = inferred.scale.or_else(|| token.arg(1));
            let name = match dialect {
                Dialect::ClickHouse => "Decimal",
                _ => "DECIMAL",
            };
            format!("{name}{}", decimal_args(precision, scale))
        }
        "VARCHAR" => {
            let length = inferred
                .length
                .or_else(|| token.arg(0))
                .unwrap_or(DEFAULT_VARCHAR_LENGTH);
            match dialect {
                Dialect::ClickHouse => "String".to_string(),
                _ => format!("VARCHAR({length})"),
            }
        }
        "CHAR" => {
            let length = inferred
                .length
                .or_else(|| token.arg(0))
                .unwrap_or(DEFAULT_CHAR_LENGTH);
            match dialect {
                Dialect::ClickHouse => format!("FixedString({length})"),
                _ => format!("CHAR({length})"),
            }
        }
        "FLOAT" => {
            let precision = inferred.precision.or_else(|| token.arg(0));
            match (dialect, precision) {
                (Dialect::ClickHouse, _) => "Float32".to_string(),
                (Dialect::MySql | Dialect::PostgreSql, Some(p)) => format!("FLOAT({p})"),
                (Dialect::PostgreSql, None) => "REAL".to_string(),
                _ => "FLOAT".to_string(),
            }
        }
        "DOUBLE" => match dialect {
            Dialect::PostgreSql => "DOUBLE PRECISION".to_string(),
            Dialect::ClickHouse => "Float64".to_string(),
            _ => "DOUBLE".to_string(),
        },
        _ => passthrough(inferred, &token),
    }
}

fn map_string(dialect: Dialect) -> String {
    match dialect {
        Dialect::PostgreSql => "TEXT".to_string(),
        Dialect::ClickHouse => "String".to_string(),
        Dialect::Spark | Dialect::MySql | Dialect::StarRocks | Dialect::Hive | Dialect::Doris => {
            "STRING".to_string()
        }
    }
}

fn decimal_args(precision: Option<u32>, scale: Option<u32>) -> String {
    match (precision, scale) {
        (Some(p), Some(s)) => format!("({p},{s})"),
        (Some(p), None) => format!("({p})"),
        (None, Some(s)) => format!("({DEFAULT_DECIMAL_PRECISION},{s})"),
        (None, None) => format!("({DEFAULT_DECIMAL_PRECISION},{DEFAULT_DECIMAL_SCALE})"),
    }
}

// Unknown types keep their inline arguments; explicit parameters are only
// appended when the token carries none of its own.
fn passthrough(inferred: &InferredType, token: &TypeToken) -> String {
    if token.raw.contains('(') {
        return token.raw.clone();
    }
    InferredType {
        data_type: token.raw.clone(),
        ..inferred.clone()
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABSTRACT_TYPES: [&str; 8] = [
        "STRING",
        "DATE",
        "TIMESTAMP",
        "DECIMAL",
        "VARCHAR",
        "CHAR",
        "FLOAT",
        "DOUBLE",
    ];

    fn map(data_type: &str, dialect: Dialect) -> String {
        map_type(&InferredType::new(data_type), dialect)
    }

    #[test]
    fn every_dialect_maps_every_abstract_type() {
        for dialect in Dialect::ALL {
            for data_type in ABSTRACT_TYPES {
                let mapped = map(data_type, dialect);
                assert!(!mapped.is_empty(), "{data_type} on {dialect}");
                assert_eq!(mapped, mapped.trim());
            }
        }
    }

    #[test]
    fn string_per_dialect() {
        assert_eq!(map("STRING", Dialect::Spark), "STRING");
        assert_eq!(map("string", Dialect::MySql), "STRING");
        assert_eq!(map("STRING", Dialect::PostgreSql), "TEXT");
        assert_eq!(map("STRING", Dialect::ClickHouse), "String");
        assert_eq!(map("STRING", Dialect::Doris), "STRING");
    }

    #[test]
    fn temporal_types_per_dialect() {
        assert_eq!(map("DATE", Dialect::ClickHouse), "Date");
        assert_eq!(map("DATE", Dialect::Hive), "DATE");
        assert_eq!(map("TIMESTAMP", Dialect::StarRocks), "TIMESTAMP");
        assert_eq!(map("TIMESTAMP", Dialect::Doris), "TIMESTAMP");
        assert_eq!(map("TIMESTAMP", Dialect::MySql), "TIMESTAMP");
        assert_eq!(map("TIMESTAMP", Dialect::ClickHouse), "DateTime");
        assert_eq!(map("TIMESTAMP", Dialect::PostgreSql), "TIMESTAMP");
    }

    #[test]
    fn decimal_parameters_and_defaults() {
        assert_eq!(map("DECIMAL", Dialect::Spark), "DECIMAL(24,6)");
        assert_eq!(
            map_type(&InferredType::decimal(10, 2), Dialect::ClickHouse),
            "Decimal(10,2)"
        );
        let precision_only = InferredType {
            precision: Some(12),
            ..InferredType::new("DECIMAL")
        };
        assert_eq!(map_type(&precision_only, Dialect::MySql), "DECIMAL(12)");
        let scale_only = InferredType {
            scale: Some(4),
            ..InferredType::new("DECIMAL")
        };
        assert_eq!(map_type(&scale_only, Dialect::Hive), "DECIMAL(24,4)");
    }

    #[test]
    fn inline_arguments_fill_missing_parameters() {
        assert_eq!(map("decimal(18, 2)", Dialect::Spark), "DECIMAL(18,2)");
        assert_eq!(map("VARCHAR(64)", Dialect::MySql), "VARCHAR(64)");
        let explicit = InferredType {
            length: Some(32),
            ..InferredType::new("VARCHAR(64)")
        };
        assert_eq!(map_type(&explicit, Dialect::MySql), "VARCHAR(32)");
    }

    #[test]
    fn character_types_use_length_defaults() {
        assert_eq!(map("VARCHAR", Dialect::Spark), "VARCHAR(255)");
        assert_eq!(map("VARCHAR", Dialect::ClickHouse), "String");
        assert_eq!(map("CHAR", Dialect::PostgreSql), "CHAR(1)");
        assert_eq!(map("CHAR(3)", Dialect::ClickHouse), "FixedString(3)");
    }

    #[test]
    fn floating_point_types() {
        assert_eq!(map("FLOAT", Dialect::PostgreSql), "REAL");
        assert_eq!(map("FLOAT(24)", Dialect::PostgreSql), "FLOAT(24)");
        assert_eq!(map("FLOAT(10)", Dialect::MySql), "FLOAT(10)");
        assert_eq!(map("FLOAT", Dialect::MySql), "FLOAT");
        assert_eq!(map("FLOAT", Dialect::ClickHouse), "Float32");
        assert_eq!(map("DOUBLE", Dialect::PostgreSql), "DOUBLE PRECISION");
        assert_eq!(map("DOUBLE", Dialect::ClickHouse), "Float64");
        assert_eq!(map("DOUBLE", Dialect::StarRocks), "DOUBLE");
    }

    #[test]
    fn unknown_types_pass_through_uppercased() {
        assert_eq!(map("bigint", Dialect::MySql), "BIGINT");
        assert_eq!(map("Array(String)", Dialect::ClickHouse), "ARRAY(STRING)");
        let with_length = InferredType {
            length: Some(16),
            ..InferredType::new("nvarchar")
        };
        assert_eq!(map_type(&with_length, Dialect::Spark), "NVARCHAR(16)");
    }
}
