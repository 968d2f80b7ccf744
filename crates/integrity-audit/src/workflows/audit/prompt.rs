use super::catalog::CategoryCatalog;
use super::submission::AssessmentSubmission;
use std::fmt::Write as _;

/// Renders the single instruction sent to the generative model.
pub fn build_prompt(catalog: &CategoryCatalog, submission: &AssessmentSubmission) -> String {
    let mut category_info = String::new();
    for category in catalog.definitions() {
        let _ = writeln!(
            category_info,
            "- {}: {}",
            category.name, category.scoring_guidance
        );
    }
    let category_count = catalog.len();
    let first_category = catalog.names().next().unwrap_or("Category name");

    format!(
        r#"You are Professor Sam Illingworth conducting an Integrity Debt Audit for a Higher Education assessment.

CRITICAL INSTRUCTIONS:
1. Analyse the assessment brief against EXACTLY these {category_count} categories in this exact order:
{category_info}
2. For each category, provide:
   - A score from 1-5 (where 1 = easily automated/vulnerable, 5 = resilient/Slow AI)
   - A critique explaining why you gave this score (keep under 150 words)
   - A dialogue question to help the educator reflect (one sentence)
   - A direct quote from the assessment that supports your score (under 50 words)

3. Your response MUST be valid JSON with this exact structure:
{{
    "doc_context": "Brief title/description of the assessment",
    "top_improvements": ["Improvement 1", "Improvement 2", "Improvement 3"],
    "audit_results": [
        {{
            "category": "{first_category}",
            "score": 3,
            "critique": "Your analysis here",
            "question": "Reflective question here",
            "quote": "Direct quote from assessment"
        }},
        ... (repeat for all {category_count} categories in order)
    ]
}}

4. JSON FORMATTING RULES:
   - NO trailing commas before closing braces or brackets
   - Escape ALL quotes within strings using backslash: \"
   - Keep critique and quote fields SHORT to avoid JSON issues
   - Do NOT include line breaks within string values
   - Use only standard ASCII quotes, not smart quotes

5. IMPORTANT:
   - Use ONLY the category names listed above
   - Provide exactly {category_count} results, one for each category
   - Scores must be integers from 1-5
   - Use British English spellings (organise not organize, emphasise not emphasize, etc.)
   - If information is missing for a category, estimate based on typical practices and note this in the critique

Assessment text to analyse:
{assessment}

Return ONLY valid JSON with no additional text, markdown formatting, or preamble."#,
        assessment = submission.text(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubmissionLimits;

    fn submission(text: &str) -> AssessmentSubmission {
        AssessmentSubmission::new(text, SubmissionLimits::default()).expect("valid submission")
    }

    #[test]
    fn prompt_lists_every_category_in_catalog_order() {
        let catalog = CategoryCatalog::standard();
        let prompt = build_prompt(&catalog, &submission(&"Essay brief. ".repeat(20)));

        let mut last_position = 0;
        for category in catalog.definitions() {
            let line = format!("- {}: {}", category.name, category.scoring_guidance);
            let position = prompt.find(&line).expect("category line present");
            assert!(position > last_position, "{} out of order", category.name);
            last_position = position;
        }
        assert!(prompt.contains("EXACTLY these 10 categories"));
    }

    #[test]
    fn prompt_embeds_assessment_and_json_contract() {
        let brief = "Portfolio submitted in week 13 covering all learning outcomes. ".repeat(3);
        let prompt = build_prompt(&CategoryCatalog::standard(), &submission(&brief));

        assert!(prompt.contains(brief.trim()));
        assert!(prompt.contains("\"audit_results\": ["));
        assert!(prompt.contains("\"category\": \"Final product weighting\""));
        assert!(prompt.contains("NO trailing commas"));
        assert!(prompt.ends_with("Return ONLY valid JSON with no additional text, markdown formatting, or preamble."));
    }
}
