use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::citation;

/// A parsed bibliography entry as handed over by the BibTeX collaborator.
///
/// Fields are already decoded text, not raw BibTeX syntax. Field names are
/// folded to lowercase on construction (BibTeX treats them as
/// case-insensitive). Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographyEntry {
    pub key: String,
    fields: BTreeMap<String, String>,
}

impl BibliographyEntry {
    pub fn new(
        key: impl Into<String>,
        fields: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let fields = fields
            .into_iter()
            .map(|(name, value)| (name.to_lowercase(), value))
            .collect();

        BibliographyEntry {
            key: key.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Canonical view of the fields: names sorted, values trimmed with
    /// internal whitespace runs collapsed to single spaces, fields that are
    /// empty after trimming dropped.
    ///
    /// Fingerprinting reads this view, so re-parsing a BibTeX file with
    /// reordered fields or incidental whitespace never changes an entry's
    /// identity.
    pub fn normalized_fields(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|(name, value)| {
                let normalized = normalize_value(value);
                if normalized.is_empty() {
                    None
                } else {
                    Some((name.clone(), normalized))
                }
            })
            .collect()
    }

    /// The field content sent to the judge. The abstract is withheld: it is
    /// large relative to the rest of the entry and the rubric scores the
    /// source, not its summary.
    pub fn fields_for_judging(&self) -> BTreeMap<String, String> {
        let mut fields = self.normalized_fields();
        fields.remove("abstract");
        fields
    }

    /// APA7 in-text shorthand, e.g. `Smith et al. (2020)`.
    pub fn apa7_citation(&self) -> String {
        citation::apa7(self.field("author"), self.field("year"))
    }
}

fn normalize_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
