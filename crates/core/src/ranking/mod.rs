use serde::{Deserialize, Serialize};

use crate::{
    config::{RaceConfig, YearRange, TOP_N},
    region::{classify, is_excluded, Region},
    Record,
};

/// One ranked bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub label: String,
    pub value: u64,
    pub region: Region,
}

impl RankedEntry {
    pub fn color(&self) -> &'static str {
        self.region.color()
    }
}

/// Top entries for a single year, largest population first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSnapshot {
    pub year: i32,
    pub entries: Vec<RankedEntry>,
}

impl RankedSnapshot {
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|entry| entry.value).collect()
    }

    pub fn colors(&self) -> Vec<&'static str> {
        self.entries.iter().map(RankedEntry::color).collect()
    }
}

/// Builds ranked snapshots for years inside a fixed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranker {
    range: YearRange,
    limit: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(YearRange::default(), TOP_N)
    }
}

impl Ranker {
    pub fn new(range: YearRange, limit: usize) -> Self {
        Self { range, limit }
    }

    pub fn from_config(config: &RaceConfig) -> Self {
        Self::new(config.year_range(), config.ranking.top_n)
    }

    /// Ranks the non-aggregate rows of `year`. Equal populations keep their
    /// input order. Years outside the range yield an empty snapshot.
    pub fn rank(&self, records: &[Record], year: i32) -> RankedSnapshot {
        if !self.range.contains(year) {
            tracing::debug!(year, range = ?self.range, "year outside playback range");
            return RankedSnapshot::empty(year);
        }

        let mut matching: Vec<&Record> = records
            .iter()
            .filter(|record| !is_excluded(&record.country_name))
            .filter(|record| record.year == year)
            .collect();
        matching.sort_by(|a, b| b.population.cmp(&a.population));
        matching.truncate(self.limit);

        let entries = matching
            .into_iter()
            .map(|record| RankedEntry {
                label: record.country_name.clone(),
                value: record.population,
                region: classify(&record.country_name),
            })
            .collect();

        RankedSnapshot { year, entries }
    }
}

/// Ranks `year` with the default range and a top-12 cut.
pub fn rank(records: &[Record], year: i32) -> RankedSnapshot {
    Ranker::default().rank(records, year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("China", 1950, 554_000_000),
            Record::new("India", 1950, 376_000_000),
            Record::new("World", 1950, 2_500_000_000),
            Record::new("Asia", 1950, 1_400_000_000),
        ]
    }

    #[test]
    fn ranks_countries_and_drops_aggregates() {
        let snapshot = rank(&sample(), 1950);
        assert_eq!(snapshot.labels(), vec!["China", "India"]);
        assert_eq!(snapshot.values(), vec![554_000_000, 376_000_000]);
        assert_eq!(snapshot.colors(), vec!["#6600FF", "#6600FF"]);
        assert!(snapshot.entries.iter().all(|e| e.region == Region::Asia));
    }

    #[test]
    fn truncates_to_twelve_sorted_descending() {
        let records: Vec<Record> = (0..20u64)
            .map(|i| Record::new(format!("Country {i}"), 1990, (i * 7919) % 101))
            .collect();
        let snapshot = rank(&records, 1990);
        assert_eq!(snapshot.len(), 12);
        assert!(snapshot
            .entries
            .windows(2)
            .all(|pair| pair[0].value >= pair[1].value));
    }

    #[test]
    fn keeps_every_match_when_fewer_than_limit() {
        let records = vec![
            Record::new("Peru", 2000, 3),
            Record::new("Chile", 2000, 5),
            Record::new("Peru", 2001, 9),
        ];
        let snapshot = rank(&records, 2000);
        assert_eq!(snapshot.labels(), vec!["Chile", "Peru"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            Record::new("Fiji", 1960, 10),
            Record::new("Tonga", 1960, 20),
            Record::new("Samoa", 1960, 10),
            Record::new("Nauru", 1960, 10),
        ];
        let snapshot = rank(&records, 1960);
        assert_eq!(snapshot.labels(), vec!["Tonga", "Fiji", "Samoa", "Nauru"]);
    }

    #[test]
    fn missing_or_out_of_range_years_are_empty() {
        let mut records = sample();
        records.push(Record::new("China", 1900, 400_000_000));

        assert!(rank(&records, 1975).is_empty());
        assert!(rank(&records, 1900).is_empty());
        assert!(rank(&[], 1950).is_empty());
    }

    #[test]
    fn aggregates_never_rank_regardless_of_size() {
        let records = vec![
            Record::new("High-income countries", 2010, u64::MAX),
            Record::new("Europe (UN)", 2010, 700_000_000),
            Record::new("Nigeria", 2010, 160_000_000),
        ];
        let snapshot = rank(&records, 2010);
        assert_eq!(snapshot.labels(), vec!["Nigeria"]);
        assert_eq!(snapshot.entries[0].region, Region::Unclassified);
    }

    #[test]
    fn honours_configured_limit_and_range() {
        let ranker = Ranker::new(YearRange::new(1900, 1910), 1);
        let records = vec![
            Record::new("Peru", 1905, 1),
            Record::new("Chile", 1905, 2),
        ];
        let snapshot = ranker.rank(&records, 1905);
        assert_eq!(snapshot.labels(), vec!["Chile"]);
        assert!(ranker.rank(&records, 1950).is_empty());
    }
}
