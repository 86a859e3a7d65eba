use sqlparser::dialect::{
    ClickHouseDialect, DatabricksDialect, HiveDialect, MySqlDialect, PostgreSqlDialect,
};
use sqlparser::parser::Parser;

use crate::error::{Error, Result};
use crate::generator::dialect::Dialect;

fn parser_dialect(dialect: Dialect) -> Box<dyn sqlparser::dialect::Dialect> {
    match dialect {
        Dialect::Spark => Box::new(DatabricksDialect {}),
        Dialect::Hive => Box::new(HiveDialect {}),
        Dialect::MySql | Dialect::StarRocks | Dialect::Doris => Box::new(MySqlDialect {}),
        Dialect::PostgreSql => Box::new(PostgreSqlDialect {}),
        Dialect::ClickHouse => Box::new(ClickHouseDialect {}),
    }
}

/// Parse generated DDL with the closest `sqlparser` dialect.
///
/// Advisory only: the parsers cover a subset of each product's grammar, so a
/// rejection means "worth a look", not "invalid". Returns the statement count.
pub fn check_syntax(dialect: Dialect, ddl: &str) -> Result<usize> {
    let parser_dialect = parser_dialect(dialect);
    Parser::parse_sql(parser_dialect.as_ref(), ddl)
        .map(|statements| statements.len())
        .map_err(|e| Error::Syntax {
            dialect: dialect.id().to_string(),
            message: e.to_string(),
        })
}
