use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::parser::comments::CommentMap;
use crate::parser::names::unquote_alias;

static NESTED_SELECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bSELECT\b").unwrap());
static NESTED_FROM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\sFROM\s").unwrap());
static LEADING_DISTINCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^DISTINCT\s+").unwrap());
static AS_ALIAS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\s+AS\s+("[^"]*"|'[^']*'|`[^`]*`|[^\s,]+)$"#).unwrap()
});

/// Characters that mark the token before a candidate implicit alias as part of an
/// expression rather than a column name.
const OPERATOR_MARKERS: [char; 6] = ['(', '+', '-', '*', '/', '='];

/// One output column derived from one source expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Resolved display name: the alias when present, else the expression text.
    pub name: String,
    /// Explicit or implicit alias, without quotes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Column comment; defaults to `name` when the source carried none.
    pub comment: String,
}

impl Field {
    /// A field without alias whose comment is its own name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            comment: name.clone(),
            name,
            alias: None,
        }
    }

    /// Replace the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Parse one field expression into a [`Field`].
///
/// Returns `None` for blank expressions and for text that still looks like a nested
/// `SELECT … FROM` (a subquery that leaked through splitting). Alias detection tries an
/// explicit trailing `AS alias` first, then an implicit trailing alias when the token
/// before it does not look like an operator. The comment is looked up by the whole
/// expression, then the pre-alias name, then the alias.
pub fn parse_field_expression(expr: &str, comments: Option<&CommentMap>) -> Option<Field> {
    let source = expr.trim();
    if source.is_empty() || looks_like_subquery(source) {
        return None;
    }

    let without_distinct = LEADING_DISTINCT_RE.replace(source, "");
    let (name, alias) = split_alias(without_distinct.trim());
    if name.is_empty() {
        return None;
    }

    let display_name = alias.clone().unwrap_or_else(|| name.clone());
    let comment = comments
        .and_then(|map| {
            map.get(source)
                .or_else(|| map.get(&name))
                .or_else(|| alias.as_deref().and_then(|a| map.get(a)))
        })
        .map_or_else(|| display_name.clone(), str::to_string);

    Some(Field {
        name: display_name,
        alias,
        comment,
    })
}

fn looks_like_subquery(expr: &str) -> bool {
    NESTED_SELECT_RE.is_match(expr) || NESTED_FROM_RE.is_match(expr)
}

/// Split an expression into `(name, alias)`.
fn split_alias(expr: &str) -> (String, Option<String>) {
    if let Some(caps) = AS_ALIAS_RE.captures(expr) {
        let whole = caps.get(0).map_or(expr.len(), |m| m.start());
        let token = caps.get(1).map_or("", |m| m.as_str());
        let alias = unquote_alias(token);
        let name = expr[..whole].trim();
        // `CAST(x AS INT)` ends in `AS INT)`, which is not an alias.
        if !token.contains(&['(', ')'][..]) && !alias.is_empty() && !name.is_empty() {
            return (name.to_string(), Some(alias.to_string()));
        }
    }

    let parts: Vec<&str> = expr.split_whitespace().collect();
    if let [head @ .., before, last] = parts.as_slice() {
        let before_is_operand = !before.contains(|c: char| OPERATOR_MARKERS.contains(&c));
        let alias = unquote_alias(last);
        if before_is_operand && !last.contains(&['(', ')'][..]) && !alias.is_empty() {
            let mut name_parts = head.to_vec();
            name_parts.push(*before);
            return (name_parts.join(" "), Some(alias.to_string()));
        }
    }

    (expr.to_string(), None)
}
