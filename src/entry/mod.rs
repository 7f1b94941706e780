pub mod citation;
pub mod entry;

pub use crate::types::identity::Fingerprint;
pub use entry::BibliographyEntry;
