use crate::inference::types::InferredType;

const CURRENCY_NAMES: &[&str] = &["fcytp", "scytp", "cytp", "currency_type"];
const CURRENCY_MARKER: &str = "币种代码";
const CODE_MARKERS: &[&str] = &["mode", "code", "icode"];
const DATE_MARKERS: &[&str] = &["date", "日期"];
const TIME_MARKERS: &[&str] = &["time", "timestamp", "时间"];
const PARTY_MARKERS: &[&str] = &["org", "trcl", "cust", "stff", "user", "dept"];
const DESCRIPTION_MARKERS: &[&str] = &["_name", "_dscr", "_rmrk", "name", "描述", "备注"];
const FLAG_MARKERS: &[&str] = &["flag", "标记"];
const AMOUNT_MARKERS: &[&str] = &[
    "amt", "amount", "price", "ocy", "rcy", "scy", "elmn", "crdt", "totl", "ocpt", "金额",
];
const QUANTITY_MARKERS: &[&str] = &["qty", "quantity", "cnt", "count", "数量"];

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| text.contains(marker))
}

/// Infer a type from the lower-cased field name (and comment) alone.
///
/// The checks run in a fixed order and the first hit wins, so reordering them changes
/// the outcome for names carrying several markers (`due_date_days` is a day count, not
/// a date). Anything unrecognized is a `STRING`.
pub fn infer_default(name_lower: &str, comment_lower: &str) -> InferredType {
    let name = name_lower;

    if CURRENCY_NAMES.contains(&name)
        || name.contains(CURRENCY_MARKER)
        || comment_lower.contains(CURRENCY_MARKER)
    {
        return InferredType::string();
    }
    if contains_any(name, CODE_MARKERS) {
        return InferredType::string();
    }
    if contains_any(name, DATE_MARKERS) && !name.contains("day") {
        return InferredType::date();
    }
    if contains_any(name, TIME_MARKERS) {
        return InferredType::timestamp();
    }
    if contains_any(name, PARTY_MARKERS) {
        return InferredType::string();
    }
    if contains_any(name, DESCRIPTION_MARKERS) {
        return InferredType::string();
    }
    if contains_any(name, FLAG_MARKERS) || name.starts_with("is_") {
        return InferredType::string();
    }
    if name.contains("days") || (name.contains("day") && name != "weekday") {
        return InferredType::default_decimal();
    }
    if contains_any(name, AMOUNT_MARKERS) {
        return InferredType::default_decimal();
    }
    if contains_any(name, QUANTITY_MARKERS) {
        return InferredType::default_decimal();
    }

    InferredType::string()
}
