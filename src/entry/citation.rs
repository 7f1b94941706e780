/// Format an APA7 in-text citation from raw `author` and `year` fields.
///
/// BibTeX author lists separate names with ` and `; surnames precede the
/// comma in `Surname, Given` form. A missing year renders as `n.d.`.
pub(crate) fn apa7(author: Option<&str>, year: Option<&str>) -> String {
    let author = author.map(str::trim).filter(|a| !a.is_empty());

    let name = match author {
        Some(list) => {
            let authors: Vec<&str> = list.split(" and ").collect();
            let surname = authors[0].split(',').next().unwrap_or(authors[0]).trim();
            if authors.len() > 1 {
                format!("{surname} et al.")
            } else {
                surname.to_string()
            }
        }
        None => "Unknown".to_string(),
    };

    let year = year.map(str::trim).filter(|y| !y.is_empty()).unwrap_or("n.d.");

    format!("{name} ({year})")
}
