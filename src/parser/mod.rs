/// Trailing `--` comment capture keyed by field text.
pub mod comments;
/// Single field expression parsing: alias detection and comment lookup.
pub mod field;
/// Identifier helpers shared by parsing, inference, and rendering.
pub mod names;
/// Statement shape detection (`SELECT … FROM`, bare `SELECT`, field list).
pub mod select;
/// Top-level comma splitting and comment stripping.
pub mod splitter;
