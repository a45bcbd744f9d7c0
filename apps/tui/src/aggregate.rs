use std::collections::btree_map::Entry;

use crate::domain::{AggregateMap, DistrictCatalog, RawRecord};

/// Keeps the records whose district identifier contains `marker`.
pub fn filter_region(records: Vec<RawRecord>, marker: &str) -> Vec<RawRecord> {
    records
        .into_iter()
        .filter(|record| record.site_id.contains(marker))
        .collect()
}

/// Lists each district once, in order of first appearance.
pub fn build_catalog(records: &[RawRecord]) -> DistrictCatalog {
    let mut catalog = DistrictCatalog::new();
    for record in records {
        catalog.push_unique(&record.site_id);
    }
    catalog
}

/// Sums the four household counts of every record per district.
///
/// The first record of a district initializes its aggregate, later ones are
/// added to it. Malformed counts stay invalid and are not treated as zero.
pub fn aggregate(records: &[RawRecord]) -> AggregateMap {
    let mut districts = AggregateMap::new();

    for record in records {
        let counts = record.counts();
        match districts.entry(record.site_id.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(counts);
            }
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += counts;
            }
        }
    }

    districts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Count, DistrictAggregate, HouseholdCounts};

    fn sample_records() -> Vec<RawRecord> {
        vec![
            RawRecord::new("臺北市中正區", ["5", "2", "4", "1"]),
            RawRecord::new("臺北市中正區", ["3", "0", "2", "0"]),
            RawRecord::new("新北市板橋區", ["9", "9", "9", "9"]),
        ]
    }

    #[test]
    fn zhongzheng_scenario() {
        let filtered = filter_region(sample_records(), "臺北");
        let catalog = build_catalog(&filtered);
        let districts = aggregate(&filtered);

        assert_eq!(catalog.as_slice(), ["臺北市中正區"]);
        assert_eq!(
            districts.get("臺北市中正區"),
            Some(&DistrictAggregate {
                male: HouseholdCounts::new(Count::new(8), Count::new(2)),
                female: HouseholdCounts::new(Count::new(6), Count::new(1)),
            })
        );
        assert!(!districts.contains_key("新北市板橋區"));
    }

    #[test]
    fn filter_region_is_idempotent() {
        let once = filter_region(sample_records(), "臺北");
        let twice = filter_region(once.clone(), "臺北");

        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn filter_region_drops_header_rows() {
        let mut records = sample_records();
        records.insert(0, RawRecord::new("區域別", ["共同生活戶_男", "", "", ""]));

        let filtered = filter_region(records, "臺北");
        assert!(filtered.iter().all(|record| record.site_id.starts_with("臺北市")));
    }

    #[test]
    fn catalog_preserves_first_seen_order() {
        let records = vec![
            RawRecord::new("臺北市士林區", ["1", "1", "1", "1"]),
            RawRecord::new("臺北市大安區", ["1", "1", "1", "1"]),
            RawRecord::new("臺北市士林區", ["1", "1", "1", "1"]),
            RawRecord::new("臺北市北投區", ["1", "1", "1", "1"]),
            RawRecord::new("臺北市大安區", ["1", "1", "1", "1"]),
        ];

        let catalog = build_catalog(&records);
        assert_eq!(
            catalog.as_slice(),
            ["臺北市士林區", "臺北市大安區", "臺北市北投區"]
        );
    }

    #[test]
    fn aggregate_is_additive_per_district() {
        let records = vec![
            RawRecord::new("臺北市萬華區", ["10", "1", "7", "3"]),
            RawRecord::new("臺北市文山區", ["4", "4", "4", "4"]),
            RawRecord::new("臺北市萬華區", ["20", "2", "5", "0"]),
            RawRecord::new("臺北市萬華區", ["30", "3", "1", "6"]),
        ];

        let districts = aggregate(&records);
        let wanhua = districts["臺北市萬華區"];
        let expected_male_ordinary: u64 = records
            .iter()
            .filter(|record| record.site_id == "臺北市萬華區")
            .filter_map(|record| record.counts().male.ordinary.value())
            .sum();

        assert_eq!(wanhua.male.ordinary, Count::new(expected_male_ordinary));
        assert_eq!(wanhua.male.single, Count::new(6));
        assert_eq!(wanhua.female.ordinary, Count::new(13));
        assert_eq!(wanhua.female.single, Count::new(9));
        assert_eq!(districts["臺北市文山區"].male.ordinary, Count::new(4));
    }

    #[test]
    fn malformed_count_propagates_instead_of_zeroing() {
        let records = vec![
            RawRecord::new("臺北市南港區", ["5", "n/a", "4", "1"]),
            RawRecord::new("臺北市南港區", ["3", "2", "2", "0"]),
        ];

        let nangang = aggregate(&records)["臺北市南港區"];
        assert_eq!(nangang.male.ordinary, Count::new(8));
        assert_eq!(nangang.male.single, Count::INVALID);
        assert_eq!(nangang.female.ordinary, Count::new(6));
    }

    #[test]
    fn empty_input_gives_empty_outputs() {
        assert!(build_catalog(&[]).is_empty());
        assert!(aggregate(&[]).is_empty());
    }
}
