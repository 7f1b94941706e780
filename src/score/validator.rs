use std::collections::BTreeMap;

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::{Confidence, Criterion, CriterionScore, ScoreRecord};
use crate::types::Fingerprint;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("no JSON object found in response body")]
    NoJsonObject,
    #[error("response body is not a criterion map: {0}")]
    Unparseable(#[from] serde_json::Error),
    #[error("criterion '{0}' missing from response")]
    MissingCriterion(&'static str),
    #[error("criterion '{0}' appears more than once")]
    DuplicateCriterion(&'static str),
    #[error("score for '{0}' is not a finite number")]
    NonNumericScore(&'static str),
    #[error("score {score} for '{criterion}' is outside [0, 10]")]
    ScoreOutOfRange {
        criterion: &'static str,
        score: f64,
    },
    #[error("explanation for '{0}' is empty")]
    EmptyExplanation(&'static str),
    #[error("unrecognized confidence {value} for '{criterion}'")]
    UnrecognizedConfidence {
        criterion: &'static str,
        value: String,
    },
}

/// What to do with a score outside `[0, 10]`.
///
/// `Reject` surfaces the response as a validation failure for that entry;
/// `Clamp` pins the value to the nearest bound. Rejecting is the default
/// so that model misbehavior is reported rather than masked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScorePolicy {
    #[default]
    Reject,
    Clamp,
}

/// Wire shape of one criterion in the model's response.
#[derive(Debug, Deserialize)]
struct RawCriterion {
    #[serde(default)]
    score: Value,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    confidence: Option<Value>,
}

/// Normalize and range-check a raw model response into a [`ScoreRecord`].
///
/// The body is expected to be a JSON object mapping criterion names to
/// `{score, explanation, confidence?}`. Bodies where the object is wrapped
/// in prose are salvaged by extracting the outermost brace pair before
/// parsing. Criterion names are matched case-insensitively; unknown keys
/// are ignored. All five criteria must be present exactly once.
pub fn validate_response(
    body: &str,
    fingerprint: &Fingerprint,
    policy: ScorePolicy,
) -> Result<ScoreRecord, ValidationError> {
    let raw = parse_body(body)?;

    let mut scores = BTreeMap::new();
    for (name, raw_criterion) in raw {
        let Some(criterion) = Criterion::from_name(&name) else {
            continue;
        };
        if scores.contains_key(&criterion) {
            return Err(ValidationError::DuplicateCriterion(criterion.name()));
        }
        scores.insert(criterion, check_criterion(criterion, raw_criterion, policy)?);
    }

    for criterion in Criterion::ALL {
        if !scores.contains_key(&criterion) {
            return Err(ValidationError::MissingCriterion(criterion.name()));
        }
    }

    Ok(ScoreRecord {
        fingerprint: fingerprint.clone(),
        scores,
        created_at: Utc::now(),
    })
}

fn parse_body(body: &str) -> Result<BTreeMap<String, RawCriterion>, ValidationError> {
    match serde_json::from_str(body) {
        Ok(raw) => Ok(raw),
        Err(_) => {
            // Best-effort extraction for models that wrap the object in
            // prose or code fences: outermost brace pair only.
            let start = body.find('{').ok_or(ValidationError::NoJsonObject)?;
            let end = body
                .rfind('}')
                .filter(|&end| end > start)
                .ok_or(ValidationError::NoJsonObject)?;
            serde_json::from_str(&body[start..=end]).map_err(ValidationError::Unparseable)
        }
    }
}

fn check_criterion(
    criterion: Criterion,
    raw: RawCriterion,
    policy: ScorePolicy,
) -> Result<CriterionScore, ValidationError> {
    let name = criterion.name();

    let score = raw
        .score
        .as_f64()
        .filter(|s| s.is_finite())
        .ok_or(ValidationError::NonNumericScore(name))?;
    let score = if (0.0..=10.0).contains(&score) {
        score
    } else {
        match policy {
            ScorePolicy::Reject => {
                return Err(ValidationError::ScoreOutOfRange {
                    criterion: name,
                    score,
                })
            }
            ScorePolicy::Clamp => score.clamp(0.0, 10.0),
        }
    };

    let explanation = raw.explanation.trim().to_string();
    if explanation.is_empty() {
        return Err(ValidationError::EmptyExplanation(name));
    }

    let confidence = parse_confidence(name, raw.confidence)?;

    Ok(CriterionScore {
        score,
        explanation,
        confidence,
    })
}

/// Absent confidence defaults to high. Recognized forms: the level strings
/// (case-insensitive), a certainty float in `[0, 1]`, or a boolean.
fn parse_confidence(
    criterion: &'static str,
    value: Option<Value>,
) -> Result<Confidence, ValidationError> {
    let Some(value) = value else {
        return Ok(Confidence::High);
    };

    match value {
        Value::Null => Ok(Confidence::High),
        Value::String(level) => match level.to_lowercase().as_str() {
            "low" => Ok(Confidence::Low),
            "medium" => Ok(Confidence::Medium),
            "high" => Ok(Confidence::High),
            _ => Err(ValidationError::UnrecognizedConfidence {
                criterion,
                value: format!("\"{level}\""),
            }),
        },
        Value::Bool(confident) => Ok(if confident {
            Confidence::High
        } else {
            Confidence::Low
        }),
        Value::Number(ref n) => {
            let certainty = n.as_f64().unwrap_or(f64::NAN);
            if (0.0..=1.0).contains(&certainty) {
                Ok(Confidence::from_certainty(certainty))
            } else {
                Err(ValidationError::UnrecognizedConfidence {
                    criterion,
                    value: value.to_string(),
                })
            }
        }
        other => Err(ValidationError::UnrecognizedConfidence {
            criterion,
            value: other.to_string(),
        }),
    }
}
