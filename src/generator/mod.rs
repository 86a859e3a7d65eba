/// Per-dialect CREATE TABLE rendering, primary-key choice, and multi-dialect generation.
pub mod ddl_generator;
/// The static table of supported dialects.
pub mod dialect;
/// Advisory parse of generated DDL with the `sqlparser` dialect parsers.
pub mod syntax_check;
/// Abstract type → dialect type literal.
pub mod type_mapper;
