use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

const FENCE: &str = "```";

/// Which parse attempt produced the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseAttempt {
    Strict,
    Repaired,
}

/// Structured payload recovered from raw model text.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    pub payload: String,
    pub value: Value,
    pub attempt: ParseAttempt,
}

impl NormalizedResponse {
    pub fn was_repaired(&self) -> bool {
        self.attempt == ParseAttempt::Repaired
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    NoObjectSpan,
    Unparseable { strict: String, repaired: String },
}

/// Raised when no parseable object could be recovered. Carries the raw text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe(.reason))]
pub struct MalformedResponse {
    pub reason: MalformedReason,
    pub raw: String,
}

fn describe(reason: &MalformedReason) -> String {
    match reason {
        MalformedReason::NoObjectSpan => {
            "model response contains no JSON object span".to_string()
        }
        MalformedReason::Unparseable { strict, repaired } => format!(
            "model response is not valid JSON (strict parse: {strict}; after repair: {repaired})"
        ),
    }
}

/// Returns the parseable payload text recovered from `raw`.
pub fn normalize(raw: &str) -> Result<String, MalformedResponse> {
    parse_response(raw).map(|normalized| normalized.payload)
}

/// Strips fences and surrounding prose, then parses strictly and falls back
/// to a single trailing-comma repair pass.
pub fn parse_response(raw: &str) -> Result<NormalizedResponse, MalformedResponse> {
    let malformed = |reason| MalformedResponse {
        reason,
        raw: raw.to_string(),
    };

    let unfenced = strip_code_fence(raw);
    let candidate =
        object_span(unfenced).ok_or_else(|| malformed(MalformedReason::NoObjectSpan))?;

    let strict_error = match serde_json::from_str::<Value>(candidate) {
        Ok(value) => {
            return Ok(NormalizedResponse {
                payload: candidate.to_string(),
                value,
                attempt: ParseAttempt::Strict,
            })
        }
        Err(err) => err,
    };

    let repaired = strip_trailing_commas(candidate);
    match serde_json::from_str::<Value>(&repaired) {
        Ok(value) => {
            debug!(%strict_error, "model response required trailing comma repair");
            Ok(NormalizedResponse {
                payload: repaired.into_owned(),
                value,
                attempt: ParseAttempt::Repaired,
            })
        }
        Err(repaired_error) => Err(malformed(MalformedReason::Unparseable {
            strict: strict_error.to_string(),
            repaired: repaired_error.to_string(),
        })),
    }
}

/// Unwraps a fenced block that opens before the first `{`, leaving the
/// interior untouched. Text without such a fence is returned as is.
fn strip_code_fence(raw: &str) -> &str {
    let Some(open) = raw.find(FENCE) else {
        return raw;
    };
    if raw.find('{').is_some_and(|brace| brace < open) {
        return raw;
    }

    let after_marker = &raw[open + FENCE.len()..];
    let body_start = match after_marker.find('\n') {
        Some(newline) => newline + 1,
        None => after_marker
            .find(|ch: char| !ch.is_ascii_alphanumeric())
            .unwrap_or(after_marker.len()),
    };
    let body = &after_marker[body_start..];
    let body = match body.rfind(FENCE) {
        Some(close) => &body[..close],
        None => body,
    };

    if body.contains('{') {
        body
    } else {
        raw
    }
}

/// First `{` through last `}`, inclusive.
fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Drops commas that directly precede `}` or `]` outside of string literals.
fn strip_trailing_commas(candidate: &str) -> Cow<'_, str> {
    let mut output = String::with_capacity(candidate.len());
    let mut in_string = false;
    let mut escape = false;
    let mut changed = false;
    let mut chars = candidate.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if in_string {
            output.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                output.push(ch);
            }
            ',' => {
                let rest = &candidate[index + ch.len_utf8()..];
                let next = rest.trim_start().chars().next();
                if matches!(next, Some('}') | Some(']')) {
                    changed = true;
                } else {
                    output.push(ch);
                }
            }
            _ => output.push(ch),
        }
    }

    if changed {
        Cow::Owned(output)
    } else {
        Cow::Borrowed(candidate)
    }
}

#[cfg(test)]
pub(crate) fn strip_trailing_commas_for_tests(candidate: &str) -> String {
    strip_trailing_commas(candidate).into_owned()
}
