pub mod judge;
pub mod stats;

pub use judge::{JudgeError, RawVerdict, SourceJudge, TokenUsage};
pub use stats::RunStats;

use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::{CacheError, ResultCache};
use crate::entry::BibliographyEntry;
use crate::score::{validate_response, ScorePolicy, ScoreRecord, ValidationError};
use crate::types::Fingerprint;

/// Per-entry failure. One entry failing never aborts the batch.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("judging '{key}' failed: {source}")]
    Judge {
        key: String,
        #[source]
        source: JudgeError,
    },
    #[error("response for '{key}' failed validation: {source}")]
    Validation {
        key: String,
        #[source]
        source: ValidationError,
    },
}

/// One analyzed entry as handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub entry_key: String,
    /// APA7 shorthand for display, e.g. `Smith et al. (2020)`.
    pub citation: String,
    pub record: ScoreRecord,
    /// True when the record was served from the cache at no cost.
    pub cached: bool,
}

/// Drives the per-entry pipeline: fingerprint → cache lookup → judge on
/// miss → validate → cache put, emitting one result per entry in input
/// order. The cache is injected so hosts and tests control persistence.
pub struct AnalysisOrchestrator<J> {
    judge: J,
    cache: ResultCache,
    policy: ScorePolicy,
    stats: RunStats,
}

impl<J: SourceJudge> AnalysisOrchestrator<J> {
    pub fn new(judge: J, cache: ResultCache) -> Self {
        AnalysisOrchestrator {
            judge,
            cache,
            policy: ScorePolicy::default(),
            stats: RunStats::default(),
        }
    }

    /// Use [`ScorePolicy::Clamp`] instead of rejecting out-of-range scores.
    pub fn with_policy(mut self, policy: ScorePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Analyze a batch, one result per entry, order preserved.
    ///
    /// Duplicate content within the batch is judged at most once: the first
    /// miss populates the in-memory cache and later occurrences hit it.
    /// After the batch, a single flush persists everything that succeeded;
    /// a flush failure is downgraded to a warning and the results are
    /// returned regardless.
    pub fn analyze(
        &mut self,
        entries: &[BibliographyEntry],
    ) -> Vec<Result<Analysis, AnalysisError>> {
        let mut results = Vec::with_capacity(entries.len());
        for entry in entries {
            results.push(self.analyze_one(entry));
        }

        if let Err(err) = self.cache.flush() {
            warn!(%err, "cache flush failed, this run's results are not persisted");
        }

        results
    }

    fn analyze_one(&mut self, entry: &BibliographyEntry) -> Result<Analysis, AnalysisError> {
        self.stats.entries += 1;
        let fingerprint = Fingerprint::of_entry(entry);

        if let Some(record) = self.cache.get(&fingerprint) {
            debug!(key = entry.key.as_str(), "cache hit");
            self.stats.cache_hits += 1;
            return Ok(Analysis {
                entry_key: entry.key.clone(),
                citation: entry.apa7_citation(),
                record,
                cached: true,
            });
        }

        debug!(key = entry.key.as_str(), "cache miss, judging");
        self.stats.cache_misses += 1;

        let verdict = self
            .judge
            .judge(&entry.fields_for_judging())
            .map_err(|source| {
                self.stats.failures += 1;
                AnalysisError::Judge {
                    key: entry.key.clone(),
                    source,
                }
            })?;

        // Tokens were spent even if validation rejects the response below.
        if let Some(usage) = verdict.usage {
            self.stats.input_tokens += usage.input_tokens;
            self.stats.output_tokens += usage.output_tokens;
        }

        let record =
            validate_response(&verdict.body, &fingerprint, self.policy).map_err(|source| {
                self.stats.failures += 1;
                AnalysisError::Validation {
                    key: entry.key.clone(),
                    source,
                }
            })?;

        self.cache.put(fingerprint, record.clone());

        Ok(Analysis {
            entry_key: entry.key.clone(),
            citation: entry.apa7_citation(),
            record,
            cached: false,
        })
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Best-effort persistence point for hosts that interrupt a batch:
    /// whatever has been analyzed so far is written out.
    pub fn flush(&self) -> Result<(), CacheError> {
        self.cache.flush()
    }

    pub fn into_cache(self) -> ResultCache {
        self.cache
    }
}
