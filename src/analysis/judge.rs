use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reaching or using the model endpoint. Retry and backoff policy,
/// if any, lives behind the [`SourceJudge`] implementation; the core only
/// sees the final outcome.
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("model endpoint unreachable: {0}")]
    Network(String),
    #[error("model call timed out")]
    Timeout,
    #[error("model rejected the request: {0}")]
    Rejected(String),
}

/// Token usage reported by the model endpoint, when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Raw model output for one entry, prior to validation. The body is
/// expected to contain a JSON criterion map but is not trusted to.
#[derive(Debug, Clone)]
pub struct RawVerdict {
    pub body: String,
    pub usage: Option<TokenUsage>,
}

/// The model-call collaborator: entry field content in, raw structured
/// response out. Implementations own transport, authentication, and any
/// prompt assembly; the orchestrator owns caching and validation.
pub trait SourceJudge {
    fn judge(&self, fields: &BTreeMap<String, String>) -> Result<RawVerdict, JudgeError>;
}

impl<J: SourceJudge + ?Sized> SourceJudge for &J {
    fn judge(&self, fields: &BTreeMap<String, String>) -> Result<RawVerdict, JudgeError> {
        (**self).judge(fields)
    }
}
