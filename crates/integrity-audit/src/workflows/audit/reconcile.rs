use super::catalog::{CategoryCatalog, CategoryDefinition};
use super::payload::{audit_entries, normalize_label, RawCategoryEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;
/// Score given to a category the model did not report at all.
pub const PLACEHOLDER_SCORE: u8 = 3;

pub const DEFAULT_CRITIQUE: &str = "No critique provided";
pub const DEFAULT_QUESTION: &str = "No question provided";
pub const NO_QUOTE: &str = "N/A";
pub const PLACEHOLDER_CRITIQUE: &str =
    "Insufficient information provided to evaluate this category.";
pub const PLACEHOLDER_QUESTION: &str =
    "How could this category be better addressed in your assessment?";

/// Final per-category outcome, one per catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledCategoryResult {
    pub category: String,
    pub verified_score: u8,
    pub critique: String,
    pub question: String,
    pub quote: String,
    /// False when the model said nothing about the category.
    pub reported: bool,
}

/// Reconciled results in catalog order together with their score total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub results: Vec<ReconciledCategoryResult>,
    pub total_score: u32,
}

/// Maps the parsed payload onto the catalog. Always yields one result per
/// category; unmatched categories receive the neutral placeholder.
pub fn reconcile(parsed: &Value, catalog: &CategoryCatalog) -> Reconciliation {
    let entries = audit_entries(parsed);
    let labels: Vec<String> = entries.iter().map(RawCategoryEntry::category_label).collect();

    let mut results = Vec::with_capacity(catalog.len());
    let mut total_score: u32 = 0;

    for category in catalog.definitions() {
        let result = match find_match(category, &labels) {
            Some(index) => matched_result(category, &entries[index]),
            None => {
                debug!(category = category.name, "no model entry matched; using placeholder");
                placeholder_result(category)
            }
        };

        total_score += u32::from(result.verified_score);
        results.push(result);
    }

    Reconciliation {
        results,
        total_score,
    }
}

/// Clamps any raw score into the 1..=5 scale. A failed extraction arrives as
/// 0 and therefore lands on 1.
pub fn clamp_score(raw: i64) -> u8 {
    raw.clamp(i64::from(MIN_SCORE), i64::from(MAX_SCORE)) as u8
}

/// Exact label equality first, then containment of the catalog name.
/// Every category searches the full entry list.
fn find_match(category: &CategoryDefinition, labels: &[String]) -> Option<usize> {
    let wanted = normalize_label(category.name);

    labels
        .iter()
        .position(|label| *label == wanted)
        .or_else(|| labels.iter().position(|label| label.contains(&wanted)))
}

fn matched_result(
    category: &CategoryDefinition,
    entry: &RawCategoryEntry<'_>,
) -> ReconciledCategoryResult {
    ReconciledCategoryResult {
        category: category.name.to_string(),
        verified_score: clamp_score(entry.raw_score()),
        critique: entry
            .text("critique")
            .unwrap_or_else(|| DEFAULT_CRITIQUE.to_string()),
        question: entry
            .text("question")
            .unwrap_or_else(|| DEFAULT_QUESTION.to_string()),
        quote: entry.text("quote").unwrap_or_else(|| NO_QUOTE.to_string()),
        reported: true,
    }
}

fn placeholder_result(category: &CategoryDefinition) -> ReconciledCategoryResult {
    ReconciledCategoryResult {
        category: category.name.to_string(),
        verified_score: PLACEHOLDER_SCORE,
        critique: PLACEHOLDER_CRITIQUE.to_string(),
        question: PLACEHOLDER_QUESTION.to_string(),
        quote: NO_QUOTE.to_string(),
        reported: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_for<'a>(
        reconciliation: &'a Reconciliation,
        category: &str,
    ) -> &'a ReconciledCategoryResult {
        reconciliation
            .results
            .iter()
            .find(|result| result.category == category)
            .expect("category present")
    }

    #[test]
    fn clamp_score_bounds_the_scale() {
        assert_eq!(clamp_score(i64::MIN), 1);
        assert_eq!(clamp_score(-3), 1);
        assert_eq!(clamp_score(0), 1);
        assert_eq!(clamp_score(1), 1);
        assert_eq!(clamp_score(4), 4);
        assert_eq!(clamp_score(5), 5);
        assert_eq!(clamp_score(17), 5);
        assert_eq!(clamp_score(i64::MAX), 5);
    }

    #[test]
    fn exact_match_wins_over_earlier_substring_match() {
        let payload = json!({ "audit_results": [
            { "category": "Data recency and relevance", "score": 1 },
            { "category": "DATA RECENCY", "score": 5 },
        ] });
        let reconciliation = reconcile(&payload, &CategoryCatalog::standard());
        assert_eq!(result_for(&reconciliation, "Data recency").verified_score, 5);
    }

    #[test]
    fn substring_match_is_used_when_no_exact_label_exists() {
        let payload = json!({ "audit_results": [
            { "category": "7. Explicit AI interrogation (critique of outputs)", "score": 4 },
        ] });
        let reconciliation = reconcile(&payload, &CategoryCatalog::standard());
        let result = result_for(&reconciliation, "Explicit AI interrogation");
        assert_eq!(result.verified_score, 4);
        assert!(result.reported);
    }

    #[test]
    fn one_entry_may_satisfy_several_categories() {
        let payload = json!({ "audit_results": [
            { "category": "Temporal friction / Data recency", "score": 2 },
        ] });
        let reconciliation = reconcile(&payload, &CategoryCatalog::standard());
        assert_eq!(result_for(&reconciliation, "Temporal friction").verified_score, 2);
        assert_eq!(result_for(&reconciliation, "Data recency").verified_score, 2);
    }

    #[test]
    fn first_matching_entry_wins() {
        let payload = json!({ "audit_results": [
            { "category": "Multimodal evidence", "score": 2, "critique": "first" },
            { "category": "Multimodal evidence", "score": 5, "critique": "second" },
        ] });
        let reconciliation = reconcile(&payload, &CategoryCatalog::standard());
        let result = result_for(&reconciliation, "Multimodal evidence");
        assert_eq!(result.verified_score, 2);
        assert_eq!(result.critique, "first");
    }

    #[test]
    fn matched_entries_fill_missing_text_with_defaults() {
        let payload = json!({ "audit_results": [
            { "category": "Real-time defence", "score": 3, "critique": "", "quote": null },
        ] });
        let reconciliation = reconcile(&payload, &CategoryCatalog::standard());
        let result = result_for(&reconciliation, "Real-time defence");
        assert_eq!(result.critique, DEFAULT_CRITIQUE);
        assert_eq!(result.question, DEFAULT_QUESTION);
        assert_eq!(result.quote, NO_QUOTE);
    }

    #[test]
    fn unmatched_categories_get_the_neutral_placeholder() {
        let reconciliation = reconcile(&json!({ "audit_results": [] }), &CategoryCatalog::standard());
        assert_eq!(reconciliation.results.len(), 10);
        assert_eq!(reconciliation.total_score, 30);
        for result in &reconciliation.results {
            assert_eq!(result.verified_score, PLACEHOLDER_SCORE);
            assert_eq!(result.critique, PLACEHOLDER_CRITIQUE);
            assert_eq!(result.question, PLACEHOLDER_QUESTION);
            assert_eq!(result.quote, NO_QUOTE);
            assert!(!result.reported);
        }
    }

    #[test]
    fn non_string_category_labels_never_match() {
        let payload = json!({ "audit_results": [{ "category": 7, "score": 5 }] });
        let reconciliation = reconcile(&payload, &CategoryCatalog::standard());
        assert!(reconciliation.results.iter().all(|result| !result.reported));
    }
}
