use std::collections::BTreeMap;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::inference::types::InferredType;

/// How a rule keyword is compared against the target text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// The lower-cased target equals the lower-cased keyword.
    Equals,
    /// The lower-cased target contains the lower-cased keyword.
    #[default]
    Contains,
    /// The keyword is a case-insensitive regular expression searched in the target.
    Regex,
}

/// Which part of a field a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetField {
    /// The resolved field name.
    #[default]
    Name,
    /// The field comment.
    Comment,
}

/// A caller-supplied keyword rule that overrides default type inference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRule {
    /// Keywords tried in order; the first one that matches wins.
    pub keywords: Vec<String>,
    /// Comparison applied to each keyword.
    #[serde(default, alias = "match_type")]
    pub match_type: MatchType,
    /// Text the keywords are compared against.
    #[serde(default, alias = "target_field")]
    pub target_field: TargetField,
    /// Abstract type assigned on match.
    #[serde(alias = "data_type")]
    pub data_type: String,
    /// Evaluation order; lower runs first.
    #[serde(default)]
    pub priority: i64,
    /// Decimal/float precision carried into the inferred type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Decimal scale carried into the inferred type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    /// Character length carried into the inferred type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

impl TypeRule {
    /// A `contains`-on-name rule with priority 0 and no parameters.
    pub fn new<I, S>(keywords: I, data_type: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            match_type: MatchType::default(),
            target_field: TargetField::default(),
            data_type: data_type.into(),
            priority: 0,
            precision: None,
            scale: None,
            length: None,
        }
    }

    /// Set the comparison mode.
    #[must_use]
    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = match_type;
        self
    }

    /// Set the inspected field part.
    #[must_use]
    pub fn with_target(mut self, target_field: TargetField) -> Self {
        self.target_field = target_field;
        self
    }

    /// Set the evaluation priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Set decimal precision and scale.
    #[must_use]
    pub fn with_precision_scale(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Set the character length.
    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// True when any keyword matches the lower-cased name or comment.
    pub fn matches(&self, name_lower: &str, comment_lower: &str) -> bool {
        let target = match self.target_field {
            TargetField::Name => name_lower,
            TargetField::Comment => comment_lower,
        };
        self.keywords
            .iter()
            .any(|keyword| keyword_matches(self.match_type, target, keyword))
    }

    /// The type this rule assigns, parameters carried through unchanged.
    pub fn inferred_type(&self) -> InferredType {
        InferredType {
            data_type: self.data_type.clone(),
            precision: self.precision,
            scale: self.scale,
            length: self.length,
        }
    }
}

/// Compare one keyword against an already lower-cased target.
///
/// Blank keywords never match. A keyword that is not a valid regular expression is
/// logged and treated as a non-match.
pub fn keyword_matches(match_type: MatchType, target: &str, keyword: &str) -> bool {
    if keyword.trim().is_empty() {
        return false;
    }
    match match_type {
        MatchType::Equals => target == keyword.to_lowercase(),
        MatchType::Contains => target.contains(&keyword.to_lowercase()),
        MatchType::Regex => match RegexBuilder::new(keyword).case_insensitive(true).build() {
            Ok(re) => re.is_match(target),
            Err(err) => {
                warn!(pattern = keyword, error = %err, "skipping malformed regex keyword");
                false
            }
        },
    }
}

/// Type rules grouped by dialect identifier, as carried by `rulesByDatabase`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    /// Dialect identifier → rules in caller order.
    pub rules: BTreeMap<String, Vec<TypeRule>>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{ "<dialect>": [rule, …] }` JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut set = Self::new();
        set.load_from_json(json)?;
        Ok(set)
    }

    /// Merge rules from JSON; a dialect present in the document replaces any rules
    /// already loaded for it.
    pub fn load_from_json(&mut self, json: &str) -> Result<()> {
        let parsed: BTreeMap<String, Vec<TypeRule>> =
            serde_json::from_str(json).map_err(|e| Error::InvalidRules(e.to_string()))?;
        for (dialect, rules) in parsed {
            self.insert(&dialect, rules);
        }
        Ok(())
    }

    /// Set the rules for one dialect.
    pub fn insert(&mut self, dialect: &str, rules: Vec<TypeRule>) {
        self.rules.insert(dialect.trim().to_lowercase(), rules);
    }

    /// Rules for a dialect (case-insensitive); empty when none were supplied.
    pub fn get(&self, dialect: &str) -> &[TypeRule] {
        let dialect = dialect.trim();
        self.rules
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(dialect))
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or(&[])
    }

    /// True when no dialect has rules.
    pub fn is_empty(&self) -> bool {
        self.rules.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_json_uses_camel_case_with_defaults() {
        let rule: TypeRule = serde_json::from_str(
            r#"{"keywords": ["amt"], "dataType": "DECIMAL", "precision": 10, "scale": 2}"#,
        )
        .unwrap();
        assert_eq!(rule.match_type, MatchType::Contains);
        assert_eq!(rule.target_field, TargetField::Name);
        assert_eq!(rule.priority, 0);
        assert_eq!(rule.inferred_type(), InferredType::decimal(10, 2));
    }

    #[test]
    fn snake_case_keys_are_accepted() {
        let rule: TypeRule = serde_json::from_str(
            r#"{"keywords": ["^id$"], "match_type": "regex", "target_field": "comment", "data_type": "BIGINT", "priority": 3}"#,
        )
        .unwrap();
        assert_eq!(rule.match_type, MatchType::Regex);
        assert_eq!(rule.target_field, TargetField::Comment);
        assert_eq!(rule.data_type, "BIGINT");
        assert_eq!(rule.priority, 3);
    }

    #[test]
    fn keyword_matching_modes() {
        assert!(keyword_matches(MatchType::Equals, "amt", "AMT"));
        assert!(!keyword_matches(MatchType::Equals, "credit_amt", "amt"));
        assert!(keyword_matches(MatchType::Contains, "credit_amt", "Amt"));
        assert!(keyword_matches(MatchType::Regex, "credit_amt", "_AMT$"));
        assert!(!keyword_matches(MatchType::Contains, "credit_amt", "  "));
    }

    #[test]
    fn malformed_regex_is_a_non_match() {
        assert!(!keyword_matches(MatchType::Regex, "credit_amt", "(amt"));
    }

    #[test]
    fn rule_can_target_comment() {
        let rule = TypeRule::new(["金额"], "DECIMAL").with_target(TargetField::Comment);
        assert!(rule.matches("credit_amt", "授信金额"));
        assert!(!rule.matches("金额", "credit"));
    }

    #[test]
    fn rule_set_lookup_is_case_insensitive_and_replaces_per_dialect() {
        let mut set = RuleSet::from_json(
            r#"{"MySQL": [{"keywords": ["amt"], "dataType": "DECIMAL"}], "hive": []}"#,
        )
        .unwrap();
        assert_eq!(set.get("mysql").len(), 1);
        assert_eq!(set.get(" MYSQL ").len(), 1);
        assert!(set.get("spark").is_empty());

        set.load_from_json(r#"{"mysql": []}"#).unwrap();
        assert!(set.get("mysql").is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn invalid_rule_json_is_reported() {
        let err = RuleSet::from_json(r#"{"mysql": [{"keywords": "amt"}]}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidRules(_)));
    }
}
