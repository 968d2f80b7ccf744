//! Total accessors over the untrusted model payload.
//!
//! The model may return any JSON shape, so nothing here deserializes into a
//! fixed record: every accessor inspects a `serde_json::Value` and falls back
//! to `None` or an empty collection instead of failing.

use serde_json::{Map, Value};

/// Score-bearing fields, in lookup priority order.
pub(crate) const SCORE_FIELDS: [&str; 3] = ["score", "points", "rating"];

/// One loosely-shaped category entry from `audit_results`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawCategoryEntry<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawCategoryEntry<'a> {
    /// Normalized category label, empty when absent or not a string.
    pub(crate) fn category_label(&self) -> String {
        self.fields
            .get("category")
            .and_then(Value::as_str)
            .map(normalize_label)
            .unwrap_or_default()
    }

    /// First score field that yields an integer, or 0 when none does.
    pub(crate) fn raw_score(&self) -> i64 {
        SCORE_FIELDS
            .iter()
            .filter_map(|field| self.fields.get(*field))
            .find_map(integer_from)
            .unwrap_or(0)
    }

    /// Non-empty text for `field`; scalars are rendered, containers ignored.
    /// Whitespace-only strings count as reported text.
    pub(crate) fn text(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }
}

/// Entries from `audit_results`, accepting an array or a keyed mapping.
pub(crate) fn audit_entries(payload: &Value) -> Vec<RawCategoryEntry<'_>> {
    let items: Vec<&Value> = match payload.get("audit_results") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(keyed)) => keyed.values().collect(),
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| item.as_object())
        .map(|fields| RawCategoryEntry { fields })
        .collect()
}

/// `doc_context` when it is a non-empty string.
pub(crate) fn doc_context(payload: &Value) -> Option<String> {
    payload
        .get("doc_context")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|context| !context.is_empty())
        .map(str::to_string)
}

/// `top_improvements` when it is an array made only of strings.
pub(crate) fn top_improvements(payload: &Value) -> Option<Vec<String>> {
    payload
        .get("top_improvements")?
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// Trims, collapses inner whitespace, drops invisible marks and lowercases.
pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// Direct integer parse first, then the first run of digits in the value's
/// string form.
fn integer_from(value: &Value) -> Option<i64> {
    let direct = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().map(|_| i64::MAX)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    direct.or_else(|| {
        let rendered = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        first_digit_run(&rendered)
    })
}

fn first_digit_run(text: &str) -> Option<i64> {
    let start = text.find(|ch: char| ch.is_ascii_digit())?;
    let digits: &str = &text[start..];
    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    // Only overflow can fail here; it still means "far above the scale".
    Some(digits[..end].parse::<i64>().unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry_score(value: Value) -> i64 {
        let payload = json!({ "audit_results": [value] });
        let entries = audit_entries(&payload);
        entries[0].raw_score()
    }

    #[test]
    fn audit_entries_accepts_arrays_and_keyed_maps() {
        let array = json!({ "audit_results": [{ "category": "A" }, "junk", { "category": "B" }] });
        assert_eq!(audit_entries(&array).len(), 2);

        let keyed = json!({ "audit_results": { "1": { "category": "A" }, "2": { "category": "B" } } });
        let labels: Vec<_> = audit_entries(&keyed)
            .iter()
            .map(RawCategoryEntry::category_label)
            .collect();
        assert_eq!(labels.len(), 2);
        assert!(labels.contains(&"a".to_string()));

        assert!(audit_entries(&json!({ "audit_results": "none" })).is_empty());
        assert!(audit_entries(&json!({})).is_empty());
        assert!(audit_entries(&json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn score_fields_are_checked_in_priority_order() {
        assert_eq!(entry_score(json!({ "score": 4, "points": 2, "rating": 1 })), 4);
        assert_eq!(entry_score(json!({ "points": 2, "rating": 5 })), 2);
        assert_eq!(entry_score(json!({ "rating": "5" })), 5);
        assert_eq!(entry_score(json!({ "score": "four", "rating": 3 })), 3);
    }

    #[test]
    fn score_extraction_falls_back_to_first_digit_run() {
        assert_eq!(entry_score(json!({ "score": "4/5" })), 4);
        assert_eq!(entry_score(json!({ "score": "Score: 2 (weak)" })), 2);
        assert_eq!(entry_score(json!({ "score": 3.7 })), 3);
        assert_eq!(entry_score(json!({ "score": " -2 " })), -2);
        assert_eq!(entry_score(json!({ "score": [5] })), 5);
    }

    #[test]
    fn unparseable_or_missing_scores_yield_zero() {
        assert_eq!(entry_score(json!({ "score": "four" })), 0);
        assert_eq!(entry_score(json!({ "score": null })), 0);
        assert_eq!(entry_score(json!({ "score": true })), 0);
        assert_eq!(entry_score(json!({ "critique": "no score at all" })), 0);
    }

    #[test]
    fn oversized_scores_saturate() {
        assert_eq!(entry_score(json!({ "score": u64::MAX })), i64::MAX);
        assert_eq!(
            entry_score(json!({ "score": "99999999999999999999999" })),
            i64::MAX
        );
    }

    #[test]
    fn text_treats_empty_and_structured_values_as_absent() {
        let payload = json!({ "audit_results": [{
            "critique": "",
            "question": 42,
            "quote": ["not", "text"],
            "note": "   ",
        }] });
        let entries = audit_entries(&payload);
        assert_eq!(entries[0].text("critique"), None);
        assert_eq!(entries[0].text("note").as_deref(), Some("   "));
        assert_eq!(entries[0].text("question").as_deref(), Some("42"));
        assert_eq!(entries[0].text("quote"), None);
        assert_eq!(entries[0].text("missing"), None);
    }

    #[test]
    fn top_improvements_requires_a_sequence_of_strings() {
        assert_eq!(
            top_improvements(&json!({ "top_improvements": ["a", "b"] })),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            top_improvements(&json!({ "top_improvements": [] })),
            Some(Vec::new())
        );
        assert_eq!(top_improvements(&json!({ "top_improvements": ["a", 2] })), None);
        assert_eq!(top_improvements(&json!({ "top_improvements": "a" })), None);
        assert_eq!(top_improvements(&json!({})), None);
    }

    #[test]
    fn doc_context_ignores_blank_values() {
        assert_eq!(
            doc_context(&json!({ "doc_context": " Essay " })).as_deref(),
            Some("Essay")
        );
        assert_eq!(doc_context(&json!({ "doc_context": "" })), None);
        assert_eq!(doc_context(&json!({ "doc_context": 7 })), None);
    }

    #[test]
    fn normalize_label_removes_whitespace_and_case() {
        let source = "\u{feff}  final   PRODUCT\tWeighting ";
        assert_eq!(normalize_label(source), "final product weighting");
    }
}
