use craap_core::entry::BibliographyEntry;
use craap_core::types::Fingerprint;

fn make_entry(key: &str, fields: &[(&str, &str)]) -> BibliographyEntry {
    BibliographyEntry::new(
        key,
        fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string())),
    )
}

const FIELDS: &[(&str, &str)] = &[
    ("author", "Smith, John and Doe, Jane"),
    ("title", "Deep Learning for Citation Analysis"),
    ("year", "2021"),
    ("journal", "Journal of Informetrics"),
];

#[test]
fn fingerprint_is_idempotent() {
    let entry = make_entry("smith2021", FIELDS);
    assert_eq!(Fingerprint::of_entry(&entry), Fingerprint::of_entry(&entry));
}

#[test]
fn fingerprint_is_stable_across_field_order() {
    let entry = make_entry("smith2021", FIELDS);

    let mut reversed: Vec<(&str, &str)> = FIELDS.to_vec();
    reversed.reverse();
    let permuted = make_entry("smith2021", &reversed);

    assert_eq!(Fingerprint::of_entry(&entry), Fingerprint::of_entry(&permuted));
}

#[test]
fn fingerprint_ignores_incidental_whitespace() {
    let entry = make_entry("smith2021", FIELDS);
    let padded = make_entry(
        "smith2021",
        &[
            ("author", "  Smith, John   and Doe, Jane "),
            ("title", "Deep  Learning for\n Citation Analysis"),
            ("year", " 2021"),
            ("journal", "Journal of Informetrics"),
        ],
    );

    assert_eq!(Fingerprint::of_entry(&entry), Fingerprint::of_entry(&padded));
}

#[test]
fn fingerprint_ignores_field_name_case() {
    let entry = make_entry("smith2021", &[("title", "On Caching"), ("year", "2020")]);
    let cased = make_entry("smith2021", &[("Title", "On Caching"), ("Year", "2020")]);

    assert_eq!(Fingerprint::of_entry(&entry), Fingerprint::of_entry(&cased));
}

#[test]
fn fingerprint_ignores_empty_fields() {
    let entry = make_entry("smith2021", FIELDS);

    let mut with_empty: Vec<(&str, &str)> = FIELDS.to_vec();
    with_empty.push(("note", "   "));
    let padded = make_entry("smith2021", &with_empty);

    assert_eq!(Fingerprint::of_entry(&entry), Fingerprint::of_entry(&padded));
}

#[test]
fn fingerprint_changes_when_any_field_value_changes() {
    let entry = make_entry("smith2021", FIELDS);

    for (index, _) in FIELDS.iter().enumerate() {
        let mut altered: Vec<(&str, &str)> = FIELDS.to_vec();
        altered[index].1 = "something else entirely";
        let changed = make_entry("smith2021", &altered);

        assert_ne!(
            Fingerprint::of_entry(&entry),
            Fingerprint::of_entry(&changed),
            "changing field '{}' must change the fingerprint",
            altered[index].0,
        );
    }
}

#[test]
fn fingerprint_changes_when_a_field_is_added() {
    let entry = make_entry("smith2021", FIELDS);

    let mut extended: Vec<(&str, &str)> = FIELDS.to_vec();
    extended.push(("doi", "10.1000/xyz123"));
    let changed = make_entry("smith2021", &extended);

    assert_ne!(Fingerprint::of_entry(&entry), Fingerprint::of_entry(&changed));
}

#[test]
fn fingerprint_is_independent_of_citation_key() {
    // Renaming a BibTeX key does not change what the source is, so it must
    // not re-trigger a model call.
    let a = make_entry("smith2021", FIELDS);
    let b = make_entry("smith2021a", FIELDS);

    assert_eq!(Fingerprint::of_entry(&a), Fingerprint::of_entry(&b));
}

#[test]
fn fingerprint_format_is_prefixed_sha256_hex() {
    let entry = make_entry("smith2021", FIELDS);
    let fingerprint = Fingerprint::of_entry(&entry);

    let digest = fingerprint
        .as_str()
        .strip_prefix("sha256:")
        .expect("fingerprint must carry the sha256: prefix");

    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
}
