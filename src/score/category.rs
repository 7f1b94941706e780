use serde::{Deserialize, Serialize};

/// Banded classification of a total score. Total over `[0, 50]`: every
/// total maps to exactly one category, fractional totals included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Total in `[45, 50]`.
    Excellent,
    /// Total in `[40, 45)`.
    Good,
    /// Total in `[35, 40)`.
    Average,
    /// Total in `[30, 35)`.
    Borderline,
    /// Total below 30.
    Unreliable,
}

impl Category {
    pub fn from_total(total: f64) -> Category {
        if total >= 45.0 {
            Category::Excellent
        } else if total >= 40.0 {
            Category::Good
        } else if total >= 35.0 {
            Category::Average
        } else if total >= 30.0 {
            Category::Borderline
        } else {
            Category::Unreliable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Excellent => "Excellent",
            Category::Good => "Good",
            Category::Average => "Average",
            Category::Borderline => "Borderline",
            Category::Unreliable => "Unreliable, not suitable for use",
        }
    }
}
