use crate::core::html::escape;
use crate::core::location::short_branch_name;
use crate::core::tally::list_of_copies;
use crate::domain::model::AvailabilityAggregation;
use std::collections::BTreeSet;

/// Branches holding an available copy that is not one of the nearby copies,
/// shortened, deduplicated and sorted.
pub fn extra_location_names(aggregation: &AvailabilityAggregation<'_>) -> Vec<String> {
    let names: BTreeSet<&str> = aggregation
        .available_locations
        .iter()
        .filter(|record| {
            !aggregation
                .locally_available_locations
                .iter()
                .any(|local| std::ptr::eq(*local, **record))
        })
        .map(|record| short_branch_name(&record.location))
        .collect();

    names.into_iter().map(str::to_string).collect()
}

/// `"A"`, `"A and B"`, `"A, B and C"`.
pub fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    match names {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

fn copies(n: usize) -> String {
    if n == 1 {
        "1 copy".to_string()
    } else {
        format!("{} copies", n)
    }
}

/// Availability summary HTML for one book.
///
/// `extra_names` is the ordered list of other branches to mention after
/// "available in" or "plus N more ... in".
pub fn render_summary<S: AsRef<str>>(
    aggregation: &AvailabilityAggregation<'_>,
    extra_names: &[S],
) -> String {
    let escaped: Vec<String> = extra_names.iter().map(|n| escape(n.as_ref())).collect();
    let extra = join_names(&escaped);

    let local = aggregation.locally_available_copies;
    let elsewhere = aggregation.available_copies;

    if local == 0 {
        return match elsewhere {
            0 => "<p>No copies available.</p>".to_string(),
            n => format!("<p>{} available in {}.</p>", copies(n), extra),
        };
    }

    let nearby = format!(
        "<p><strong>{} available nearby.</strong></p>{}",
        copies(local),
        list_of_copies(aggregation.locally_available_locations.iter().copied())
    );

    match elsewhere {
        0 => nearby,
        1 => format!(
            "{}<p class=\"extra_copies\">plus 1 more copy in {}.</p>",
            nearby, extra
        ),
        n => format!(
            "{}<p class=\"extra_copies\">plus {} more copies in {}.</p>",
            nearby, n, extra
        ),
    }
}

/// [`render_summary`] with the extra branches worked out from the aggregation.
pub fn summarize(aggregation: &AvailabilityAggregation<'_>) -> String {
    let extra = extra_location_names(aggregation);
    render_summary(aggregation, &extra)
}

/// One-line phrase without branch detail, e.g. `"2 copies nearby"`.
pub fn availability_message(aggregation: &AvailabilityAggregation<'_>) -> String {
    let local = aggregation.locally_available_copies;
    let total = aggregation.available_copies;

    match (local, total) {
        (1, _) => "1 copy nearby".to_string(),
        (l, _) if l > 1 => format!("{} copies nearby", l),
        (_, 0) => "No copies".to_string(),
        (_, t) => copies(t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::{aggregate, aggregate_with};
    use crate::domain::model::{AvailabilityRecord, BranchSelection, CopyCounting};

    fn available(location: &str) -> AvailabilityRecord {
        AvailabilityRecord::new(location, "Fiction", "Available", "")
    }

    fn on_loan(location: &str) -> AvailabilityRecord {
        AvailabilityRecord::new(location, "Fiction", "Onloan - Due: 02 Jun 2024", "")
    }

    fn render(records: &[AvailabilityRecord], local: &[&str]) -> String {
        let selection = BranchSelection::new(local.iter().copied());
        summarize(&aggregate(records, &selection))
    }

    #[test]
    fn test_join_names() {
        let none: [&str; 0] = [];
        assert_eq!(join_names(&none), "");
        assert_eq!(join_names(&["X"]), "X");
        assert_eq!(join_names(&["X", "Y"]), "X and Y");
        assert_eq!(join_names(&["X", "Y", "Z"]), "X, Y and Z");
        assert_eq!(join_names(&["W", "X", "Y", "Z"]), "W, X, Y and Z");
    }

    #[test]
    fn test_no_copies() {
        assert_eq!(render(&[], &["Central"]), "<p>No copies available.</p>");
        assert_eq!(
            render(&[on_loan("Central"), on_loan("North")], &["Central"]),
            "<p>No copies available.</p>"
        );
    }

    #[test]
    fn test_one_copy_elsewhere() {
        assert_eq!(
            render(&[available("North")], &["Central"]),
            "<p>1 copy available in North.</p>"
        );
    }

    #[test]
    fn test_several_copies_elsewhere() {
        let records = [
            available("St Albans Library"),
            available("Harpenden Library"),
            available("St Albans Library"),
        ];
        assert_eq!(
            render(&records, &[]),
            "<p>3 copies available in Harpenden and St Albans.</p>"
        );
    }

    #[test]
    fn test_one_copy_nearby() {
        assert_eq!(
            render(&[available("Central")], &["Central"]),
            "<p><strong>1 copy available nearby.</strong></p><ul><li>Central / Fiction</li></ul>"
        );
    }

    #[test]
    fn test_one_nearby_plus_one_elsewhere() {
        assert_eq!(
            render(&[available("Central"), available("North")], &["Central"]),
            "<p><strong>1 copy available nearby.</strong></p>\
             <ul><li>Central / Fiction</li></ul>\
             <p class=\"extra_copies\">plus 1 more copy in North.</p>"
        );
    }

    #[test]
    fn test_one_nearby_plus_several_elsewhere() {
        let records = [available("Central"), available("North"), available("East")];
        let html = render(&records, &["Central"]);
        assert!(html.starts_with("<p><strong>1 copy available nearby.</strong></p>"));
        assert!(html.ends_with("<p class=\"extra_copies\">plus 2 more copies in East and North.</p>"));
    }

    #[test]
    fn test_several_nearby() {
        let records = [available("Central"), available("Central")];
        assert_eq!(
            render(&records, &["Central"]),
            "<p><strong>2 copies available nearby.</strong></p>\
             <ul><li>Central / Fiction (\u{d7}\u{2009}2)</li></ul>"
        );
    }

    #[test]
    fn test_several_nearby_plus_one_elsewhere() {
        let records = [available("Central"), available("West"), available("North")];
        let html = render(&records, &["Central", "West"]);
        assert!(html.starts_with("<p><strong>2 copies available nearby.</strong></p>"));
        assert!(html.ends_with("plus 1 more copy in North.</p>"));
    }

    #[test]
    fn test_several_nearby_plus_several_elsewhere() {
        let records = [
            available("Central"),
            available("West"),
            available("North"),
            available("East"),
            available("South"),
        ];
        let html = render(&records, &["Central", "West"]);
        assert!(html.ends_with("plus 3 more copies in East, North and South.</p>"));
    }

    #[test]
    fn test_extra_names_are_shortened_and_deduplicated() {
        let records = [
            available("Oxhey Community Library"),
            available("Harpenden Library"),
            available("Harpenden Library"),
            available("Central"),
        ];
        let selection = BranchSelection::new(["Central"]);
        let agg = aggregate(&records, &selection);

        assert_eq!(
            extra_location_names(&agg),
            vec!["Harpenden", "Oxhey Community Library"]
        );
    }

    #[test]
    fn test_extra_names_are_escaped() {
        let agg = aggregate(&[], &BranchSelection::default());
        let agg = AvailabilityAggregation {
            available_copies: 1,
            ..agg
        };
        assert_eq!(
            render_summary(&agg, &["Bishop's Stortford"]),
            "<p>1 copy available in Bishop&#x27;s Stortford.</p>"
        );
    }

    #[test]
    fn test_inclusive_counting_repeats_local_copies_in_the_total() {
        let records = [available("Central"), available("North")];
        let selection = BranchSelection::new(["Central"]);
        let agg = aggregate_with(&records, &selection, CopyCounting::Inclusive);

        assert!(summarize(&agg).ends_with("plus 2 more copies in North.</p>"));
    }

    #[test]
    fn test_availability_message() {
        let cases: [(&[AvailabilityRecord], &[&str], &str); 5] = [
            (&[], &[], "No copies"),
            (&[available("North")], &["Central"], "1 copy"),
            (&[available("North"), available("East")], &["Central"], "2 copies"),
            (&[available("Central"), available("North")], &["Central"], "1 copy nearby"),
            (&[available("Central"), available("Central")], &["Central"], "2 copies nearby"),
        ];

        for (records, local, expected) in cases {
            let selection = BranchSelection::new(local.iter().copied());
            let agg = aggregate(records, &selection);
            assert_eq!(availability_message(&agg), expected);
        }
    }
}
