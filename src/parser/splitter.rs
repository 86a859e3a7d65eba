use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static LINE_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)--.*$").unwrap());
static BLOCK_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Remove `--` line comments, then `/* … */` block comments.
pub fn strip_comments(sql: &str) -> String {
    let without_line_comments = LINE_COMMENT_RE.replace_all(sql, "");
    BLOCK_COMMENT_RE
        .replace_all(&without_line_comments, "")
        .into_owned()
}

/// Split a clause on commas outside parentheses.
///
/// Every top-level comma closes one expression, so `a,,b` yields an empty middle
/// expression; trailing text is only emitted when it is non-blank. Input whose
/// parentheses do not balance is rejected.
pub fn split_fields(clause: &str) -> Result<Vec<String>> {
    let (exprs, balanced) = split_top_level(clause);
    if !balanced {
        return Err(Error::UnbalancedParentheses(clause.trim().to_string()));
    }
    Ok(exprs)
}

/// Like [`split_fields`] but never fails on unbalanced parentheses.
///
/// Used on isolated source lines, where a multi-line expression may legitimately
/// open a parenthesis that only closes further down.
pub(crate) fn split_fields_lenient(clause: &str) -> Vec<String> {
    split_top_level(clause).0
}

fn split_top_level(clause: &str) -> (Vec<String>, bool) {
    let mut exprs = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut balanced = true;

    for ch in clause.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth -= 1;
                if depth < 0 {
                    balanced = false;
                }
                current.push(ch);
            }
            ',' if depth == 0 => {
                exprs.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        exprs.push(tail.to_string());
    }

    (exprs, balanced && depth == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_inside_parentheses_are_not_split_points() {
        assert_eq!(
            split_fields("a,b,(c,d),e").unwrap(),
            vec!["a", "b", "(c,d)", "e"]
        );
    }

    #[test]
    fn nested_function_calls_stay_whole() {
        let exprs = split_fields("coalesce(sum(x, 1), 0) AS total, round(y, 2)").unwrap();
        assert_eq!(exprs, vec!["coalesce(sum(x, 1), 0) AS total", "round(y, 2)"]);
    }

    #[test]
    fn expression_count_follows_top_level_commas() {
        assert_eq!(split_fields("a,,b").unwrap(), vec!["a", "", "b"]);
        assert_eq!(split_fields("a, b,").unwrap(), vec!["a", "b"]);
        assert!(split_fields("   ").unwrap().is_empty());
    }

    #[test]
    fn unbalanced_parentheses_are_rejected() {
        assert!(matches!(
            split_fields("a), b"),
            Err(Error::UnbalancedParentheses(_))
        ));
        assert!(matches!(
            split_fields("count(a, b"),
            Err(Error::UnbalancedParentheses(_))
        ));
    }

    #[test]
    fn lenient_split_tolerates_open_parentheses() {
        assert_eq!(
            split_fields_lenient("a, coalesce(b,"),
            vec!["a", "coalesce(b,"]
        );
    }

    #[test]
    fn strip_comments_removes_line_and_block_comments() {
        let sql = "a, -- first\n/* multi\nline */ b /* inline */, c";
        let stripped = strip_comments(sql);
        assert!(!stripped.contains("first"));
        assert!(!stripped.contains("multi"));
        assert!(!stripped.contains("inline"));
        assert_eq!(split_fields(&stripped).unwrap(), vec!["a", "b", "c"]);
    }
}
