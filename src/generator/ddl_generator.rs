use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generator::dialect::{dialect_label, CommentStyle, Dialect, DialectConfig, ENGINE_CLAUSE};
use crate::generator::type_mapper::map_type;
use crate::inference::inferencer::infer_type;
use crate::inference::rules::{RuleSet, TypeRule};
use crate::parser::field::Field;
use crate::parser::names::{is_generic_id_name, is_identifier_code_name};

/// Table name used when the caller does not supply one.
pub const DEFAULT_TABLE_NAME: &str = "表名";
/// Width the column type is padded to in the column list.
pub const TYPE_COLUMN_WIDTH: usize = 18;
/// Name column width used when there are no columns to measure.
pub const EMPTY_NAME_COLUMN_WIDTH: usize = 30;

/// Table-level settings applied to every generated statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DdlOptions {
    /// Name written after `CREATE TABLE`.
    pub table_name: String,
    /// Text of the table-level comment.
    pub table_comment: String,
}

impl Default for DdlOptions {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            table_comment: String::new(),
        }
    }
}

/// A field with its dialect-specific type resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedColumn {
    /// Column name.
    pub name: String,
    /// Literal type token for the target dialect.
    pub data_type: String,
    /// Column comment.
    pub comment: String,
}

/// One rendered statement, tagged with the dialect it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDdl {
    /// Dialect identifier as requested.
    #[serde(rename = "databaseType")]
    pub dialect: String,
    /// Human-readable dialect label.
    pub label: String,
    /// The DDL text.
    pub ddl: String,
}

/// Infer and map the type of every field for `dialect`.
pub fn resolve_columns(fields: &[Field], rules: &[TypeRule], dialect: Dialect) -> Vec<TypedColumn> {
    fields
        .iter()
        .map(|field| {
            let inferred = infer_type(&field.name, &field.comment, rules);
            TypedColumn {
                name: field.name.clone(),
                data_type: map_type(&inferred, dialect),
                comment: field.comment.clone(),
            }
        })
        .collect()
}

/// Pick the primary-key column: the first `…icode` name, else the first `…id`
/// name, else the first field.
pub fn select_primary_key(fields: &[Field]) -> Option<&str> {
    fields
        .iter()
        .find(|f| is_identifier_code_name(&f.name))
        .or_else(|| fields.iter().find(|f| is_generic_id_name(&f.name)))
        .or_else(|| fields.first())
        .map(|f| f.name.as_str())
}

fn quote_comment(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{text}{}", " ".repeat(width - len))
    }
}

/// Lay out a `CREATE TABLE` statement from resolved columns.
///
/// Names are padded to the longest name (in characters). With inline comments each
/// column line carries `COMMENT '…'` after a type padded to [`TYPE_COLUMN_WIDTH`].
/// With separate comments the column lines hold only name and type, the list closes
/// with `);`, and `COMMENT ON TABLE` / `COMMENT ON COLUMN` statements follow after a
/// blank line, since that target has no inline column comment syntax.
pub fn render_ddl(
    columns: &[TypedColumn],
    config: &DialectConfig,
    primary_key: Option<&str>,
    options: &DdlOptions,
) -> String {
    let table = options.table_name.as_str();
    let name_width = columns
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(EMPTY_NAME_COLUMN_WIDTH);
    let separate = config.comment_style == CommentStyle::Separate;

    let mut lines = vec![format!("{} {table} (", config.prefix)];
    for (idx, column) in columns.iter().enumerate() {
        let lead = if idx == 0 { "    " } else { "   ," };
        let name = pad(&column.name, name_width);
        let line = if separate {
            format!("{lead}{name} {}", column.data_type)
        } else {
            format!(
                "{lead}{name} {} COMMENT {}",
                pad(&column.data_type, TYPE_COLUMN_WIDTH),
                quote_comment(&column.comment)
            )
        };
        lines.push(line.trim_end().to_string());
    }

    if config.add_primary_key {
        if let Some(pk) = primary_key {
            lines.push(format!("   ,PRIMARY KEY ({pk})"));
        }
    }

    if separate {
        lines.push(");".to_string());
        lines.push(String::new());
        lines.push(format!(
            "COMMENT ON TABLE {table} IS {};",
            quote_comment(&options.table_comment)
        ));
        for column in columns {
            lines.push(format!(
                "COMMENT ON COLUMN {table}.{} IS {};",
                column.name,
                quote_comment(&column.comment)
            ));
        }
    } else {
        lines.push(")".to_string());
        if config.add_engine_clause {
            lines.push(format!(" {ENGINE_CLAUSE}"));
        }
        lines.push(format!(" COMMENT {}", quote_comment(&options.table_comment)));
    }

    lines.join("\n")
}

/// Render one statement for `dialect_id`; unknown identifiers use the Spark layout.
pub fn generate_ddl(
    fields: &[Field],
    rules: &[TypeRule],
    dialect_id: &str,
    options: &DdlOptions,
) -> String {
    let dialect = Dialect::resolve(dialect_id);
    let columns = resolve_columns(fields, rules, dialect);
    render_ddl(&columns, dialect.config(), select_primary_key(fields), options)
}

/// Render one statement per known dialect, in request order.
pub fn generate_ddls(
    fields: &[Field],
    rules: &RuleSet,
    dialect_ids: &[String],
    options: &DdlOptions,
) -> Vec<GeneratedDdl> {
    dialect_ids
        .iter()
        .filter_map(|id| {
            if Dialect::from_id(id).is_none() {
                debug!(dialect = %id, "skipping unknown dialect");
                return None;
            }
            Some(GeneratedDdl {
                dialect: id.clone(),
                label: dialect_label(id),
                ddl: generate_ddl(fields, rules.get(id), id, options),
            })
        })
        .collect()
}
