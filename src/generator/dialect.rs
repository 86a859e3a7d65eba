use std::fmt;

use serde::{Deserialize, Serialize};

/// Engine clause appended for dialects with `add_engine_clause`.
pub const ENGINE_CLAUSE: &str = "ENGINE=InnoDB";

/// A supported target SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Spark SQL.
    Spark,
    /// MySQL.
    MySql,
    /// PostgreSQL.
    PostgreSql,
    /// StarRocks.
    StarRocks,
    /// ClickHouse.
    ClickHouse,
    /// Apache Hive.
    Hive,
    /// Apache Doris.
    Doris,
}

/// Where column comments go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommentStyle {
    /// `COMMENT '…'` on each column line and after the column list.
    Inline,
    /// Separate `COMMENT ON TABLE/COLUMN` statements after `CREATE TABLE`.
    Separate,
}

/// Static DDL conventions for one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectConfig {
    /// The dialect this entry describes.
    pub dialect: Dialect,
    /// Statement prefix before the table name.
    pub prefix: &'static str,
    /// Column comment placement.
    pub comment_style: CommentStyle,
    /// Emit a `PRIMARY KEY (…)` clause.
    pub add_primary_key: bool,
    /// Emit [`ENGINE_CLAUSE`] after the column list.
    pub add_engine_clause: bool,
}

const CREATE_IF_NOT_EXISTS: &str = "CREATE TABLE IF NOT EXISTS";

// Indexed by `Dialect` discriminant.
static DIALECT_CONFIGS: [DialectConfig; 7] = [
    DialectConfig {
        dialect: Dialect::Spark,
        prefix: CREATE_IF_NOT_EXISTS,
        comment_style: CommentStyle::Inline,
        add_primary_key: false,
        add_engine_clause: false,
    },
    DialectConfig {
        dialect: Dialect::MySql,
        prefix: CREATE_IF_NOT_EXISTS,
        comment_style: CommentStyle::Inline,
        add_primary_key: true,
        add_engine_clause: true,
    },
    DialectConfig {
        dialect: Dialect::PostgreSql,
        prefix: "CREATE TABLE",
        comment_style: CommentStyle::Separate,
        add_primary_key: false,
        add_engine_clause: false,
    },
    DialectConfig {
        dialect: Dialect::StarRocks,
        prefix: CREATE_IF_NOT_EXISTS,
        comment_style: CommentStyle::Inline,
        add_primary_key: false,
        add_engine_clause: false,
    },
    DialectConfig {
        dialect: Dialect::ClickHouse,
        prefix: CREATE_IF_NOT_EXISTS,
        comment_style: CommentStyle::Inline,
        add_primary_key: false,
        add_engine_clause: false,
    },
    DialectConfig {
        dialect: Dialect::Hive,
        prefix: CREATE_IF_NOT_EXISTS,
        comment_style: CommentStyle::Inline,
        add_primary_key: false,
        add_engine_clause: false,
    },
    DialectConfig {
        dialect: Dialect::Doris,
        prefix: CREATE_IF_NOT_EXISTS,
        comment_style: CommentStyle::Inline,
        add_primary_key: false,
        add_engine_clause: false,
    },
];

impl Dialect {
    /// Every supported dialect, in display order.
    pub const ALL: [Dialect; 7] = [
        Dialect::Spark,
        Dialect::MySql,
        Dialect::PostgreSql,
        Dialect::StarRocks,
        Dialect::ClickHouse,
        Dialect::Hive,
        Dialect::Doris,
    ];

    /// The dialect used for unknown identifiers and empty requests.
    pub const DEFAULT: Dialect = Dialect::Spark;

    /// Request identifier (`spark`, `mysql`, …).
    pub fn id(self) -> &'static str {
        match self {
            Dialect::Spark => "spark",
            Dialect::MySql => "mysql",
            Dialect::PostgreSql => "postgresql",
            Dialect::StarRocks => "starrocks",
            Dialect::ClickHouse => "clickhouse",
            Dialect::Hive => "hive",
            Dialect::Doris => "doris",
        }
    }

    /// Human-readable product name.
    pub fn label(self) -> &'static str {
        match self {
            Dialect::Spark => "Spark SQL",
            Dialect::MySql => "MySQL",
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::StarRocks => "StarRocks",
            Dialect::ClickHouse => "ClickHouse",
            Dialect::Hive => "Hive",
            Dialect::Doris => "Doris",
        }
    }

    /// DDL conventions for this dialect.
    pub fn config(self) -> &'static DialectConfig {
        &DIALECT_CONFIGS[self as usize]
    }

    /// Look up a request identifier (case-insensitive, `postgres` accepted).
    pub fn from_id(id: &str) -> Option<Dialect> {
        match id.trim().to_lowercase().as_str() {
            "postgres" => Some(Dialect::PostgreSql),
            other => Dialect::ALL.into_iter().find(|d| d.id() == other),
        }
    }

    /// Like [`Dialect::from_id`] but unknown identifiers resolve to [`Dialect::DEFAULT`].
    pub fn resolve(id: &str) -> Dialect {
        Dialect::from_id(id).unwrap_or(Dialect::DEFAULT)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::from_id(s).ok_or_else(|| format!("Unknown dialect: {s}"))
    }
}

/// Display label for a request identifier; unknown identifiers are shown uppercased.
pub fn dialect_label(id: &str) -> String {
    Dialect::from_id(id).map_or_else(|| id.trim().to_uppercase(), |d| d.label().to_string())
}
