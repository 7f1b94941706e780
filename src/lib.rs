//! Cache-backed CRAAP scoring core for academic bibliography evaluation.
//!
//! `craap-core` provides entry fingerprinting, a persistent result cache,
//! model-response validation, batch analysis orchestration, and score
//! aggregation. Identical entry content always maps to the same cached
//! result — a fingerprint never pays for a second model call unless the
//! entry itself changed.
//!
//! BibTeX grammar parsing, the model call, and table/CSV rendering are
//! external collaborators; this crate only consumes parsed entries and a
//! [`analysis::SourceJudge`] implementation.

pub mod aggregate;
pub mod analysis;
pub mod cache;
pub mod entry;
pub mod score;
pub mod types;
