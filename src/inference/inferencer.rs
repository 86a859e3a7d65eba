use crate::inference::fallback::infer_default;
use crate::inference::rules::TypeRule;
use crate::inference::types::InferredType;
use crate::parser::names::normalize_identifier;

/// Infer the abstract type of a field from its name and comment.
///
/// Caller rules are tried by ascending priority (ties keep their given order); the
/// first rule with a matching keyword decides. Without a match the default keyword
/// ladder applies.
pub fn infer_type(name: &str, comment: &str, rules: &[TypeRule]) -> InferredType {
    let name_lower = normalize_identifier(name);
    let comment_lower = normalize_identifier(comment);

    match find_matching_rule(&name_lower, &comment_lower, rules) {
        Some(rule) => rule.inferred_type(),
        None => infer_default(&name_lower, &comment_lower),
    }
}

/// The first rule, in priority order, whose keywords match.
pub fn find_matching_rule<'r>(
    name_lower: &str,
    comment_lower: &str,
    rules: &'r [TypeRule],
) -> Option<&'r TypeRule> {
    let mut ordered: Vec<&TypeRule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.priority);
    ordered
        .into_iter()
        .find(|rule| rule.matches(name_lower, comment_lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::rules::{MatchType, TargetField};

    #[test]
    fn matching_rule_carries_its_parameters() {
        let rules = vec![TypeRule::new(["amt"], "DECIMAL").with_precision_scale(10, 2)];
        assert_eq!(
            infer_type("credit_amt", "credit_amt", &rules),
            InferredType::decimal(10, 2)
        );
    }

    #[test]
    fn lower_priority_value_runs_first() {
        let rules = vec![
            TypeRule::new(["amt"], "DOUBLE").with_priority(5),
            TypeRule::new(["credit"], "BIGINT").with_priority(1),
        ];
        assert_eq!(infer_type("credit_amt", "", &rules).data_type, "BIGINT");
    }

    #[test]
    fn equal_priorities_keep_caller_order() {
        let rules = vec![
            TypeRule::new(["amt"], "DOUBLE"),
            TypeRule::new(["credit"], "BIGINT"),
        ];
        assert_eq!(infer_type("credit_amt", "", &rules).data_type, "DOUBLE");
    }

    #[test]
    fn malformed_regex_falls_through_to_next_rule() {
        let rules = vec![
            TypeRule::new(["[amt"], "BIGINT").with_match_type(MatchType::Regex),
            TypeRule::new(["amt$"], "DOUBLE").with_match_type(MatchType::Regex),
        ];
        assert_eq!(infer_type("credit_amt", "", &rules).data_type, "DOUBLE");
    }

    #[test]
    fn comment_targeted_rule_uses_comment_text() {
        let rules = vec![TypeRule::new(["Balance"], "DECIMAL")
            .with_target(TargetField::Comment)
            .with_precision_scale(18, 2)];
        let inferred = infer_type("col_17", "Loan Balance", &rules);
        assert_eq!(inferred, InferredType::decimal(18, 2));
    }

    #[test]
    fn no_match_uses_default_ladder() {
        let rules = vec![TypeRule::new(["zzz"], "BIGINT")];
        assert_eq!(infer_type("business_date", "", &rules), InferredType::date());
        assert_eq!(infer_type("credit_amt", "", &[]), InferredType::default_decimal());
    }
}
