/// Return the alias without any surrounding quote characters.
///
/// Strips every leading and trailing `"`, `'` and `` ` ``, so mismatched pairs such as
/// `'amt"` still come out as `amt`.
pub fn unquote_alias(alias: &str) -> &str {
    alias.trim_matches(|c| matches!(c, '"' | '\'' | '`'))
}

/// Normalize a field name for case-insensitive keyword matching.
pub fn normalize_identifier(ident: &str) -> String {
    ident.trim().to_lowercase()
}

/// True when the name ends with the identifier-code marker (`icode`).
pub fn is_identifier_code_name(name: &str) -> bool {
    normalize_identifier(name).ends_with("icode")
}

/// True when the name ends with a generic `id` marker but is not an identifier code.
pub fn is_generic_id_name(name: &str) -> bool {
    let lower = normalize_identifier(name);
    lower.ends_with("id") && !lower.ends_with("icode")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquote_alias_strips_any_quote_style() {
        assert_eq!(unquote_alias("\"amt\""), "amt");
        assert_eq!(unquote_alias("'amt'"), "amt");
        assert_eq!(unquote_alias("`amt`"), "amt");
        assert_eq!(unquote_alias("'amt\""), "amt");
        assert_eq!(unquote_alias("amt"), "amt");
    }

    #[test]
    fn primary_key_markers_do_not_overlap() {
        assert!(is_identifier_code_name("CUST_ICODE"));
        assert!(!is_generic_id_name("cust_icode"));
        assert!(is_generic_id_name("Org_ID"));
        assert!(!is_generic_id_name("business_date"));
    }
}
