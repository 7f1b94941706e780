use std::collections::BTreeSet;

use crate::score::{Category, Confidence, Criterion, ScoreRecord};

/// Presentation-ready rollup of one record's five criterion scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// Sum of the five criterion scores, `[0, 50]`. Fractional criterion
    /// scores keep their precision; category bands apply to the exact
    /// value, not a rounded one.
    pub total: f64,
    pub category: Category,
    /// Criteria whose confidence is low. Rendering marks these; they never
    /// alter total or category.
    pub flagged: BTreeSet<Criterion>,
}

/// Pure rollup of a validated record.
pub fn aggregate(record: &ScoreRecord) -> Aggregate {
    let total = record.total();
    let flagged = record
        .scores
        .iter()
        .filter(|(_, score)| score.confidence == Confidence::Low)
        .map(|(criterion, _)| *criterion)
        .collect();

    Aggregate {
        total,
        category: Category::from_total(total),
        flagged,
    }
}
