//! Generate `CREATE TABLE` statements for several SQL dialects from a `SELECT` query
//! or a bare field list, inferring column types from field names and comments.
#![warn(missing_docs)]

/// JSON request/response shapes wrapping the parse-and-generate pipeline.
pub mod api;
/// Crate-wide error type.
pub mod error;
/// Dialect table, type mapping, and DDL rendering.
pub mod generator;
/// Keyword-rule and default type inference for parsed fields.
pub mod inference;
/// Generated DDL formatting and file output.
pub mod output;
/// Field extraction from SQL text: splitting, comments, aliases, and statement shapes.
pub mod parser;

pub use error::{Error, Result};
pub use parser::field::Field;
pub use parser::select::parse_fields;
