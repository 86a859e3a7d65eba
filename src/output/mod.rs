/// Writes generated DDL to disk and formats it for the terminal.
pub mod formatter;
