use crate::domain::model::{
    AvailabilityAggregation, AvailabilityRecord, BranchSelection, CopyCounting,
};

/// Split a book's copies into available-nearby and available-elsewhere.
pub fn aggregate<'a>(
    availability: &'a [AvailabilityRecord],
    selection: &BranchSelection,
) -> AvailabilityAggregation<'a> {
    aggregate_with(availability, selection, CopyCounting::Exclusive)
}

pub fn aggregate_with<'a>(
    availability: &'a [AvailabilityRecord],
    selection: &BranchSelection,
    counting: CopyCounting,
) -> AvailabilityAggregation<'a> {
    let available_locations: Vec<&AvailabilityRecord> = availability
        .iter()
        .filter(|record| record.is_available())
        .collect();

    let locally_available_locations: Vec<&AvailabilityRecord> = available_locations
        .iter()
        .copied()
        .filter(|record| selection.contains(&record.location))
        .collect();

    let locally_available_copies = locally_available_locations.len();

    let available_copies = match counting {
        CopyCounting::Exclusive => available_locations.len() - locally_available_copies,
        CopyCounting::Inclusive => available_locations.len(),
    };

    AvailabilityAggregation {
        locally_available_copies,
        locally_available_locations,
        available_locations,
        available_copies,
    }
}

/// Row flag for the availability table: on the shelf at a selected branch.
pub fn is_locally_available(record: &AvailabilityRecord, selection: &BranchSelection) -> bool {
    record.is_available() && selection.contains(&record.location)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<AvailabilityRecord> {
        vec![
            AvailabilityRecord::new("Central", "Fiction", "Available", ""),
            AvailabilityRecord::new("North", "Fiction", "Available", ""),
            AvailabilityRecord::new("Central", "Fiction", "Onloan - Due: 02 Jun 2024", ""),
            AvailabilityRecord::new("Central", "Teen", "Available", ""),
            AvailabilityRecord::new("East", "Fiction", "In transit", ""),
        ]
    }

    #[test]
    fn test_local_and_elsewhere_split() {
        let records = records();
        let selection = BranchSelection::new(["Central"]);
        let agg = aggregate(&records, &selection);

        assert_eq!(agg.locally_available_copies, 2);
        assert_eq!(agg.locally_available_locations.len(), 2);
        assert_eq!(agg.available_locations.len(), 3);
        assert_eq!(agg.available_copies, 1);
        assert!(agg
            .locally_available_locations
            .iter()
            .all(|r| r.location == "Central" && r.is_available()));
    }

    #[test]
    fn test_local_locations_keep_catalogue_order() {
        let records = records();
        let selection = BranchSelection::new(["Central", "North"]);
        let agg = aggregate(&records, &selection);

        let collections: Vec<(&str, &str)> = agg
            .locally_available_locations
            .iter()
            .map(|r| (r.location.as_str(), r.collection.as_str()))
            .collect();
        assert_eq!(
            collections,
            vec![("Central", "Fiction"), ("North", "Fiction"), ("Central", "Teen")]
        );
        assert_eq!(agg.available_copies, 0);
    }

    #[test]
    fn test_empty_availability_is_all_zero() {
        let selection = BranchSelection::new(["Central"]);
        let agg = aggregate(&[], &selection);

        assert_eq!(agg.locally_available_copies, 0);
        assert_eq!(agg.available_copies, 0);
        assert!(agg.available_locations.is_empty());
        assert!(agg.locally_available_locations.is_empty());
    }

    #[test]
    fn test_empty_selection_puts_everything_elsewhere() {
        let records = records();
        let agg = aggregate(&records, &BranchSelection::default());

        assert_eq!(agg.locally_available_copies, 0);
        assert_eq!(agg.available_copies, 3);
    }

    #[test]
    fn test_inclusive_counting_counts_local_copies_twice() {
        let records = records();
        let selection = BranchSelection::new(["Central"]);
        let agg = aggregate_with(&records, &selection, CopyCounting::Inclusive);

        assert_eq!(agg.locally_available_copies, 2);
        assert_eq!(agg.available_copies, 3);
    }

    #[test]
    fn test_row_flags() {
        let records = records();
        let selection = BranchSelection::new(["Central"]);
        let flags: Vec<bool> = records
            .iter()
            .map(|r| is_locally_available(r, &selection))
            .collect();
        assert_eq!(flags, vec![true, false, false, true, false]);
    }

    #[test]
    fn test_invariants_hold_for_every_selection() {
        let records = records();
        let branches = ["Central", "North", "East"];

        for mask in 0..(1u32 << branches.len()) {
            let selection: BranchSelection = branches
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1u32 << *i) != 0)
                .map(|(_, b)| *b)
                .collect();
            let agg = aggregate(&records, &selection);

            assert_eq!(agg.locally_available_copies, agg.locally_available_locations.len());
            assert!(agg
                .locally_available_locations
                .iter()
                .all(|local| agg.available_locations.iter().any(|a| std::ptr::eq(*a, *local))));
            assert_eq!(
                agg.locally_available_copies + agg.available_copies,
                agg.available_locations.len()
            );
        }
    }
}
