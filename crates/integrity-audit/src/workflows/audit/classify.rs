use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest total that still counts as low susceptibility.
pub const LOW_THRESHOLD: i64 = 40;
/// Lowest total that counts as medium susceptibility.
pub const MEDIUM_THRESHOLD: i64 = 25;

/// How exposed an assessment is to automated completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SusceptibilityTier {
    Low,
    Medium,
    High,
}

/// Tier for an audit total. Defined for every integer.
pub fn classify(total_score: i64) -> SusceptibilityTier {
    if total_score >= LOW_THRESHOLD {
        SusceptibilityTier::Low
    } else if total_score >= MEDIUM_THRESHOLD {
        SusceptibilityTier::Medium
    } else {
        SusceptibilityTier::High
    }
}

impl SusceptibilityTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    /// Standing of a single 1-5 category score, on the same three tiers.
    pub const fn for_category_score(score: u8) -> Self {
        match score {
            4..=u8::MAX => Self::Low,
            3 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Top-level tier name, as stored with submissions.
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub const fn position_label(self) -> &'static str {
        match self {
            Self::Low => "Resilient",
            Self::Medium => "Moderate",
            Self::High => "Vulnerable",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low / Resilient",
            Self::Medium => "Medium / Moderate",
            Self::High => "High / Vulnerable",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Low => "Low (Pedagogical Sovereignty)",
            Self::Medium => "Medium (Structural Drift)",
            Self::High => "High (Critical Integrity Failure)",
        }
    }
}

impl fmt::Display for SusceptibilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
