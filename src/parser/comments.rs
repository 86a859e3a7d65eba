use std::collections::HashMap;

use crate::parser::splitter::{split_fields_lenient, strip_comments};

/// Comments found after `--` markers, keyed by the field text they trail.
///
/// Keys are whitespace-normalized so that lookups match regardless of how the
/// expression was indented or wrapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMap {
    entries: HashMap<String, String>,
}

impl CommentMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture every trailing `--` comment in a raw (unstripped) select clause.
    ///
    /// Each line holding a `--` marker contributes one entry: the comment text after
    /// the marker, keyed by the last top-level expression before it. A later line with
    /// the same key overwrites an earlier one.
    pub fn from_clause(clause: &str) -> Self {
        let mut map = Self::new();
        for line in clause.lines() {
            let Some(marker) = line.find("--") else {
                continue;
            };
            let comment = line[marker + 2..].trim();
            if comment.is_empty() {
                continue;
            }
            if let Some(key) = comment_key(&line[..marker]) {
                map.insert(&key, comment);
            }
        }
        map
    }

    /// Record a comment for a field text.
    pub fn insert(&mut self, field_text: &str, comment: &str) {
        self.entries
            .insert(normalize_key(field_text), comment.to_string());
    }

    /// Look up the comment recorded for a field text.
    pub fn get(&self, field_text: &str) -> Option<&str> {
        self.entries
            .get(&normalize_key(field_text))
            .map(String::as_str)
    }

    /// Number of captured comments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no comment was captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn comment_key(field_part: &str) -> Option<String> {
    let field_part = strip_comments(field_part);
    split_fields_lenient(&field_part)
        .into_iter()
        .rev()
        .find(|expr| !expr.is_empty())
}

fn normalize_key(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_is_keyed_by_the_expression_it_trails() {
        let map = CommentMap::from_clause(" org_id, credit_amt AS amt -- comment\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("credit_amt AS amt"), Some("comment"));
        assert_eq!(map.get("org_id"), None);
    }

    #[test]
    fn leading_commas_are_not_part_of_the_key() {
        let map = CommentMap::from_clause("  org_id  -- 机构\n ,cust_id -- 客户\n");
        assert_eq!(map.get("org_id"), Some("机构"));
        assert_eq!(map.get("cust_id"), Some("客户"));
    }

    #[test]
    fn last_write_wins_for_duplicate_keys() {
        let map = CommentMap::from_clause("a -- first\n,a -- second");
        assert_eq!(map.get("a"), Some("second"));
    }

    #[test]
    fn blank_comments_and_comment_only_lines_are_ignored() {
        let map = CommentMap::from_clause("-- header note\na --\nb -- kept");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("b"), Some("kept"));
    }

    #[test]
    fn lookup_ignores_whitespace_differences() {
        let map = CommentMap::from_clause("sum(a)   total -- 合计");
        assert_eq!(map.get("sum(a) total"), Some("合计"));
    }
}
