use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::parser::comments::CommentMap;
use crate::parser::field::{parse_field_expression, Field};
use crate::parser::splitter::{split_fields, strip_comments};

static SELECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bSELECT\b").unwrap());
static CLAUSE_END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:WHERE|GROUP\s+BY|ORDER\s+BY|HAVING|LIMIT|UNION)\b").unwrap()
});

/// The statement shapes recognized by [`parse_fields`], in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `SELECT <fields> FROM …` with a top-level `FROM`.
    SelectFrom,
    /// `SELECT <fields>` without a top-level `FROM`, cut at the first trailing clause.
    SelectOnly,
    /// A bare comma-separated field list.
    FieldList,
}

impl Strategy {
    /// All strategies in evaluation order.
    pub const ALL: [Strategy; 3] = [
        Strategy::SelectFrom,
        Strategy::SelectOnly,
        Strategy::FieldList,
    ];

    /// Run this strategy; `Ok(None)` when the SQL does not have this shape.
    pub fn apply(self, sql: &str) -> Result<Option<StrategyOutcome>> {
        match self {
            Strategy::SelectFrom => select_from_clause(sql)
                .map(parse_select_clause)
                .transpose(),
            Strategy::SelectOnly => select_only_clause(sql)
                .map(parse_select_clause)
                .transpose(),
            Strategy::FieldList => parse_field_list(sql).map(Some),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::SelectFrom => write!(f, "SELECT…FROM"),
            Strategy::SelectOnly => write!(f, "SELECT-only"),
            Strategy::FieldList => write!(f, "field list"),
        }
    }
}

/// Result of running one [`Strategy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrategyOutcome {
    /// Number of expressions the clause split into, before filtering.
    pub candidates: usize,
    /// Fields that survived expression parsing, in source order.
    pub fields: Vec<Field>,
}

/// Extract the ordered output fields of a `SELECT` statement or field list.
///
/// Strategies are tried in [`Strategy::ALL`] order and the first one yielding at least
/// one field wins. Fails with [`Error::UnparsableSql`] when no strategy found any
/// candidate expression, and [`Error::NoFieldsRecognized`] when candidates existed but
/// all were rejected.
pub fn parse_fields(sql: &str) -> Result<Vec<Field>> {
    let sql = sql.trim();
    if sql.is_empty() {
        return Err(Error::UnparsableSql);
    }

    let mut saw_candidates = false;
    for strategy in Strategy::ALL {
        let Some(outcome) = strategy.apply(sql)? else {
            continue;
        };
        saw_candidates |= outcome.candidates > 0;
        if !outcome.fields.is_empty() {
            debug!(%strategy, fields = outcome.fields.len(), "parsed field list");
            return Ok(outcome.fields);
        }
        debug!(%strategy, candidates = outcome.candidates, "strategy yielded no fields");
    }

    if saw_candidates {
        Err(Error::NoFieldsRecognized)
    } else {
        Err(Error::UnparsableSql)
    }
}

/// Slice between the first `SELECT` and its top-level `FROM`.
pub fn select_from_clause(sql: &str) -> Option<&str> {
    let start = SELECT_RE.find(sql)?.end();
    let from = find_top_level_from(sql, start)?;
    Some(sql[start..from].trim())
}

/// Everything after the first `SELECT`, cut before the earliest trailing clause keyword.
pub fn select_only_clause(sql: &str) -> Option<&str> {
    let start = SELECT_RE.find(sql)?.end();
    let rest = &sql[start..];
    let end = CLAUSE_END_RE.find(rest).map_or(rest.len(), |m| m.start());
    Some(rest[..end].trim())
}

fn find_top_level_from(sql: &str, start: usize) -> Option<usize> {
    let bytes = sql.as_bytes();
    let mut depth = 0i32;
    let mut i = start;

    while i < bytes.len() {
        match bytes[i] {
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                i = sql[i..].find('\n').map_or(bytes.len(), |n| i + n);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = sql[i + 2..].find("*/").map_or(bytes.len(), |n| i + 2 + n + 2);
                continue;
            }
            b'(' => depth += 1,
            b')' => depth -= 1,
            b'f' | b'F' if depth == 0 && is_standalone_from(sql, i) => return Some(i),
            _ => {}
        }
        i += 1;
    }

    None
}

// `i` sits on an ASCII byte, so `i` and `i + 4` are char boundaries once the
// keyword matched.
fn is_standalone_from(sql: &str, i: usize) -> bool {
    let bytes = sql.as_bytes();
    bytes.len() >= i + 4
        && bytes[i..i + 4].eq_ignore_ascii_case(b"from")
        && sql[..i].chars().next_back().is_some_and(char::is_whitespace)
        && sql[i + 4..].chars().next().map_or(true, char::is_whitespace)
}

fn parse_select_clause(clause: &str) -> Result<StrategyOutcome> {
    let comments = CommentMap::from_clause(clause);
    let exprs = split_fields(&strip_comments(clause))?;
    Ok(StrategyOutcome {
        candidates: exprs.len(),
        fields: exprs
            .iter()
            .filter_map(|expr| parse_field_expression(expr, Some(&comments)))
            .collect(),
    })
}

fn parse_field_list(sql: &str) -> Result<StrategyOutcome> {
    let exprs = split_fields(&strip_comments(sql))?;
    Ok(StrategyOutcome {
        candidates: exprs.len(),
        fields: exprs
            .iter()
            .filter_map(|expr| parse_field_expression(expr, None))
            .collect(),
    })
}
