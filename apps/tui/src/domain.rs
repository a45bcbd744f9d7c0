use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};

/// Identifier of an administrative district, e.g. `臺北市中正區`.
pub type DistrictKey = String;

/// Per-district aggregates keyed by [`DistrictKey`].
pub type AggregateMap = BTreeMap<DistrictKey, DistrictAggregate>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "男",
            Self::Female => "女",
        }
    }

    /// Bar colour as an RGB triple.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Male => (0x61, 0xc1, 0xc1),
            Self::Female => (0xff, 0xa0, 0x8a),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseholdKind {
    Joint,
    Single,
}

impl HouseholdKind {
    pub const ALL: [Self; 2] = [Self::Joint, Self::Single];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Joint => "共同生活戶",
            Self::Single => "獨立生活戶",
        }
    }
}

/// A household count, or the invalid marker produced by a malformed source field.
///
/// Invalid is sticky: adding anything to it stays invalid, as does an addition
/// that would overflow. Serialized as a JSON integer, or `null` when invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Count(Option<u64>);

impl Count {
    pub const INVALID: Self = Self(None);

    pub const fn new(value: u64) -> Self {
        Self(Some(value))
    }

    pub const fn value(self) -> Option<u64> {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0.is_some()
    }

    /// Parses a base-10 count from the leading digits of `text`.
    ///
    /// Leading whitespace and a `+` sign are skipped and anything after the
    /// digit run is ignored, so `"12 戶"` is 12. No digits at all, or a
    /// negative sign, gives [`Count::INVALID`].
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim_start();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());

        unsigned[..end].parse().map_or(Self::INVALID, Self::new)
    }

    fn parse_field(field: Option<&str>) -> Self {
        field.map_or(Self::INVALID, Self::parse)
    }
}

impl Add for Count {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self.0, rhs.0) {
            (Some(left), Some(right)) => Self(left.checked_add(right)),
            _ => Self::INVALID,
        }
    }
}

impl AddAssign for Count {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "NaN"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdCounts {
    pub ordinary: Count,
    pub single: Count,
}

impl HouseholdCounts {
    pub const fn new(ordinary: Count, single: Count) -> Self {
        Self { ordinary, single }
    }

    pub const fn as_array(&self) -> [Count; 2] {
        [self.ordinary, self.single]
    }
}

impl AddAssign for HouseholdCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.ordinary += rhs.ordinary;
        self.single += rhs.single;
    }
}

/// Summed household counts for one district, split by gender and household type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictAggregate {
    pub male: HouseholdCounts,
    pub female: HouseholdCounts,
}

impl AddAssign for DistrictAggregate {
    fn add_assign(&mut self, rhs: Self) {
        self.male += rhs.male;
        self.female += rhs.female;
    }
}

/// One row of the household statistics data set.
///
/// Counts arrive as decimal strings; numbers are accepted too and kept as
/// their decimal text. A missing count is kept as `None` and parses as invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub site_id: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub household_ordinary_m: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub household_single_m: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub household_ordinary_f: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub household_single_f: Option<String>,
}

impl RawRecord {
    /// Builds a record from `[ordinary_m, single_m, ordinary_f, single_f]`.
    pub fn new(site_id: impl Into<String>, counts: [&str; 4]) -> Self {
        let [ordinary_m, single_m, ordinary_f, single_f] = counts;
        Self {
            site_id: site_id.into(),
            household_ordinary_m: Some(ordinary_m.to_string()),
            household_single_m: Some(single_m.to_string()),
            household_ordinary_f: Some(ordinary_f.to_string()),
            household_single_f: Some(single_f.to_string()),
        }
    }

    /// Parses the four count fields of this row.
    pub fn counts(&self) -> DistrictAggregate {
        DistrictAggregate {
            male: HouseholdCounts::new(
                Count::parse_field(self.household_ordinary_m.as_deref()),
                Count::parse_field(self.household_single_m.as_deref()),
            ),
            female: HouseholdCounts::new(
                Count::parse_field(self.household_ordinary_f.as_deref()),
                Count::parse_field(self.household_single_f.as_deref()),
            ),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
    }))
}

/// Response envelope shared by the remote endpoint and the bundled snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub result: EnvelopeResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeResult {
    pub records: Vec<RawRecord>,
}

impl Envelope {
    pub const fn new(records: Vec<RawRecord>) -> Self {
        Self {
            result: EnvelopeResult { records },
        }
    }

    pub fn into_records(self) -> Vec<RawRecord> {
        self.result.records
    }
}

/// District keys in first-seen order, each appearing once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DistrictCatalog(Vec<DistrictKey>);

impl DistrictCatalog {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `key` unless it is already present. Returns whether it was added.
    pub fn push_unique(&mut self, key: &str) -> bool {
        if self.contains(key) {
            return false;
        }
        self.0.push(key.to_string());
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|existing| existing == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DistrictKey> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[DistrictKey] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a DistrictCatalog {
    type Item = &'a DistrictKey;
    type IntoIter = std::slice::Iter<'a, DistrictKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_leading_digits_like_parse_int() {
        assert_eq!(Count::parse("42"), Count::new(42));
        assert_eq!(Count::parse("  7"), Count::new(7));
        assert_eq!(Count::parse("+15"), Count::new(15));
        assert_eq!(Count::parse("12 戶"), Count::new(12));
        assert_eq!(Count::parse("1,234"), Count::new(1));
        assert_eq!(Count::parse("007"), Count::new(7));
    }

    #[test]
    fn parse_marks_malformed_text_invalid() {
        assert_eq!(Count::parse(""), Count::INVALID);
        assert_eq!(Count::parse("abc"), Count::INVALID);
        assert_eq!(Count::parse("-3"), Count::INVALID);
        assert_eq!(Count::parse("99999999999999999999999"), Count::INVALID);
    }

    #[test]
    fn invalid_is_sticky_under_addition() {
        assert_eq!(Count::new(2) + Count::new(3), Count::new(5));
        assert_eq!(Count::new(2) + Count::INVALID, Count::INVALID);
        assert_eq!(Count::INVALID + Count::new(2), Count::INVALID);
        assert_eq!(Count::new(u64::MAX) + Count::new(1), Count::INVALID);
    }

    #[test]
    fn count_serializes_invalid_as_null() -> Result<(), serde_json::Error> {
        let counts = HouseholdCounts::new(Count::new(3), Count::INVALID);
        let json = serde_json::to_string(&counts)?;
        assert_eq!(json, r#"{"ordinary":3,"single":null}"#);

        let back: HouseholdCounts = serde_json::from_str(&json)?;
        assert_eq!(back, counts);
        Ok(())
    }

    #[test]
    fn raw_record_accepts_numbers_and_missing_fields() -> Result<(), serde_json::Error> {
        let record: RawRecord = serde_json::from_str(
            r#"{"site_id":"臺北市大安區","household_ordinary_m":5,"household_single_m":"2",
                "household_ordinary_f":"4","village":"龍安里"}"#,
        )?;

        let counts = record.counts();
        assert_eq!(counts.male.ordinary, Count::new(5));
        assert_eq!(counts.male.single, Count::new(2));
        assert_eq!(counts.female.ordinary, Count::new(4));
        assert_eq!(counts.female.single, Count::INVALID);
        Ok(())
    }

    #[test]
    fn envelope_ignores_unrelated_keys() -> Result<(), serde_json::Error> {
        let envelope: Envelope = serde_json::from_str(
            r#"{"success":true,"result":{"resource_id":"x","records":[
                {"site_id":"臺北市中正區","household_ordinary_m":"1","household_single_m":"1",
                 "household_ordinary_f":"1","household_single_f":"1"}]}}"#,
        )?;

        let records = envelope.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].site_id, "臺北市中正區");
        Ok(())
    }

    #[test]
    fn catalog_keeps_first_occurrence_only() {
        let mut catalog = DistrictCatalog::new();
        assert!(catalog.push_unique("b"));
        assert!(catalog.push_unique("a"));
        assert!(!catalog.push_unique("b"));

        assert_eq!(catalog.as_slice(), ["b", "a"]);
    }
}
