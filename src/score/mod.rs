pub mod category;
pub mod validator;

pub use category::Category;
pub use validator::{validate_response, ScorePolicy, ValidationError};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Fingerprint;

/// The five CRAAP criteria. Fixed and exhaustive: every [`ScoreRecord`]
/// carries exactly one score per criterion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Currency,
    Relevance,
    Authority,
    Accuracy,
    Purpose,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::Currency,
        Criterion::Relevance,
        Criterion::Authority,
        Criterion::Accuracy,
        Criterion::Purpose,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Currency => "currency",
            Criterion::Relevance => "relevance",
            Criterion::Authority => "authority",
            Criterion::Accuracy => "accuracy",
            Criterion::Purpose => "purpose",
        }
    }

    pub fn from_name(name: &str) -> Option<Criterion> {
        match name.to_lowercase().as_str() {
            "currency" => Some(Criterion::Currency),
            "relevance" => Some(Criterion::Relevance),
            "authority" => Some(Criterion::Authority),
            "accuracy" => Some(Criterion::Accuracy),
            "purpose" => Some(Criterion::Purpose),
            _ => None,
        }
    }
}

/// Model-reported certainty for one criterion's score. Low confidence is a
/// presentation hint (rendering marks the score); it never alters totals.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    #[default]
    High,
}

impl Confidence {
    /// Maps a model-reported certainty in `[0, 1]` onto the three levels.
    /// The 0.7 floor matches the marker threshold used in rendering.
    pub fn from_certainty(value: f64) -> Self {
        if value < 0.7 {
            Confidence::Low
        } else if value < 0.9 {
            Confidence::Medium
        } else {
            Confidence::High
        }
    }
}

/// One criterion's validated score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    /// In `[0, 10]`, enforced by the validator.
    pub score: f64,
    /// Non-empty after trimming, enforced by the validator.
    pub explanation: String,
    #[serde(default)]
    pub confidence: Confidence,
}

/// The validated outcome of judging one entry: exactly five criterion
/// scores, the fingerprint of the content that was judged, and when the
/// judgment was produced. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub fingerprint: Fingerprint,
    pub scores: BTreeMap<Criterion, CriterionScore>,
    pub created_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn score(&self, criterion: Criterion) -> Option<&CriterionScore> {
        self.scores.get(&criterion)
    }

    /// Derived, never stored: sum of the five criterion scores, `[0, 50]`.
    pub fn total(&self) -> f64 {
        self.scores.values().map(|s| s.score).sum()
    }

    pub fn category(&self) -> Category {
        Category::from_total(self.total())
    }

    /// True when all five criteria are present. Records deserialized from
    /// older or hand-edited cache files may fail this.
    pub fn is_complete(&self) -> bool {
        Criterion::ALL.iter().all(|c| self.scores.contains_key(c))
    }
}
