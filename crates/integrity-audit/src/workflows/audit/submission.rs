use crate::config::SubmissionLimits;

/// Assessment text that passed the length guard and was cut to the prompt budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentSubmission {
    text: String,
    truncated: bool,
}

impl AssessmentSubmission {
    pub fn new(text: &str, limits: SubmissionLimits) -> Result<Self, SubmissionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SubmissionError::Empty);
        }

        let length = trimmed.chars().count();
        if length < limits.min_chars {
            return Err(SubmissionError::TooShort {
                length,
                minimum: limits.min_chars,
            });
        }

        let (text, truncated) = match trimmed.char_indices().nth(limits.max_chars) {
            Some((cut, _)) => (trimmed[..cut].to_string(), true),
            None => (trimmed.to_string(), false),
        };

        Ok(Self { text, truncated })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn was_truncated(&self) -> bool {
        self.truncated
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("no assessment text provided")]
    Empty,
    #[error("assessment content is too short ({length} characters); please provide at least {minimum} characters")]
    TooShort { length: usize, minimum: usize },
}
