use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::entry::BibliographyEntry;

/// Content-derived cache identity for a bibliography entry.
///
/// Two entries with byte-identical normalized field content always produce
/// the same fingerprint; changing any field value produces a different one.
/// Fingerprints carry no meaning beyond equality comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hash the entry's canonical field encoding.
    ///
    /// The canonical encoding is the normalized field map (sorted names,
    /// collapsed whitespace, empty fields dropped) written as `name=value`
    /// lines. The citation key is intentionally excluded: renaming a BibTeX
    /// key does not change what the source is.
    pub fn of_entry(entry: &BibliographyEntry) -> Self {
        let mut hasher = Sha256::new();
        for (name, value) in entry.normalized_fields() {
            hasher.update(name.as_bytes());
            hasher.update(b"=");
            hasher.update(value.as_bytes());
            hasher.update(b"\n");
        }

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        Fingerprint(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
