use crate::domain::model::AvailabilityRecord;

/// Canonical label for where a copy is shelved.
///
/// `" pbk"` in the call number is spelled out as `" paperback"`. Fiction whose
/// call number already starts with the genre drops the redundant collection.
pub fn describe(record: &AvailabilityRecord) -> String {
    let call_number = record.call_number.replace(" pbk", " paperback");

    let genre_shelved = record.collection == "Fiction"
        && (call_number.starts_with("General fiction")
            || call_number.starts_with("Science fiction"));

    if genre_shelved {
        format!("{} / {}", record.location, call_number)
    } else if !call_number.is_empty() {
        format!(
            "{} / {} / {}",
            record.location, record.collection, call_number
        )
    } else {
        format!("{} / {}", record.location, record.collection)
    }
}

/// Short branch name for prose: `"Harpenden Library"` becomes `"Harpenden"`,
/// but `"Oxhey Community Library"` keeps its suffix.
pub fn short_branch_name(location: &str) -> &str {
    if location.ends_with(" Community Library") {
        return location;
    }
    location.strip_suffix(" Library").unwrap_or(location)
}
