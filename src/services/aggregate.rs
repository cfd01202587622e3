use crate::models::Entry;
use crate::services::normalize::annualize;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// category -> sub-category -> normalized amount. Sub-category is the empty
/// string for unqualified labels. `BTreeMap` keeps iteration deterministic
/// for totals and report output.
pub type CategoryMap = BTreeMap<String, BTreeMap<String, f64>>;

/// A label with a parenthesized qualifier, e.g.
/// "Healthcare (Medical Spending/Insurance)". The split happens at the
/// first `" ("`; everything after it is the qualifier.
static QUALIFIED_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?) \((.+)$").expect("qualified-label pattern is valid"));

/// Derive the grouping keys from an entry label.
///
/// `"Healthcare (Medical Spending/Insurance)"` splits into
/// `("Healthcare", "Medical Spending/Insurance")`; a plain label like
/// `"Rent"` yields an empty sub-category. One trailing `)` is stripped from
/// the qualifier.
pub fn split_label(label: &str) -> (String, String) {
    match QUALIFIED_LABEL.captures(label) {
        Some(caps) => {
            let qualifier = &caps[2];
            let sub = qualifier.strip_suffix(')').unwrap_or(qualifier);
            (caps[1].to_string(), sub.to_string())
        }
        None => (label.to_string(), String::new()),
    }
}

/// Group entries by (category, sub-category) and normalize each amount.
/// A duplicate key within one pass overwrites the earlier value; the input
/// provider supplies a flat, non-repeating label set, so last-write-wins is
/// the intended resolution rather than an error.
pub fn aggregate(entries: &[Entry]) -> CategoryMap {
    let mut map = CategoryMap::new();
    for entry in entries {
        let (category, sub_category) = split_label(&entry.label);
        map.entry(category)
            .or_default()
            .insert(sub_category, annualize(entry.amount, entry.frequency));
    }
    tracing::debug!(categories = map.len(), entries = entries.len(), "Aggregated entries");
    map
}

/// Sum of all leaf values in the nested map.
pub fn total(map: &CategoryMap) -> f64 {
    map.values().flat_map(|subs| subs.values()).sum()
}
