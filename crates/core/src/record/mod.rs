use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{RaceError, Result};

/// Name of the aggregate row that carries the running world total.
pub const WORLD: &str = "world";

/// Numeric cell as delivered upstream: integer, float or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value) => truncate(*value),
            Self::Text(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(truncate))
            }
        }
    }
}

fn truncate(value: f64) -> Option<i64> {
    if value.is_finite() && value.abs() < i64::MAX as f64 {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

/// Upstream row before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Country name")]
    pub country_name: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<RawValue>,
    #[serde(rename = "Population")]
    pub population: Option<RawValue>,
}

impl RawRecord {
    pub fn new(country_name: impl Into<String>, year: RawValue, population: RawValue) -> Self {
        Self {
            country_name: Some(country_name.into()),
            year: Some(year),
            population: Some(population),
        }
    }
}

/// One country-year observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub country_name: String,
    pub year: i32,
    pub population: u64,
}

impl Record {
    pub fn new(country_name: impl Into<String>, year: i32, population: u64) -> Self {
        Self {
            country_name: country_name.into(),
            year,
            population,
        }
    }

    /// Whether this row is the aggregate world total.
    pub fn is_world(&self) -> bool {
        self.country_name.to_lowercase() == WORLD
    }
}

impl TryFrom<RawRecord> for Record {
    type Error = RaceError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        let country_name = raw
            .country_name
            .ok_or_else(|| RaceError::malformed("missing country name"))?;
        let year = raw
            .year
            .as_ref()
            .and_then(RawValue::as_integer)
            .and_then(|year| i32::try_from(year).ok())
            .ok_or_else(|| {
                RaceError::malformed(format!("`{country_name}` has no usable year: {:?}", raw.year))
            })?;
        let population = raw
            .population
            .as_ref()
            .and_then(RawValue::as_integer)
            .and_then(|population| u64::try_from(population).ok())
            .ok_or_else(|| {
                RaceError::malformed(format!(
                    "`{country_name}` ({year}) has no usable population: {:?}",
                    raw.population
                ))
            })?;

        Ok(Self {
            country_name,
            year,
            population,
        })
    }
}

/// Year-indexed lookup of the world total population.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldSeries {
    by_year: BTreeMap<i32, u64>,
}

impl WorldSeries {
    /// Collects every world row; a later row for the same year replaces an
    /// earlier one.
    pub fn from_records(records: &[Record]) -> Self {
        let by_year = records
            .iter()
            .filter(|record| record.is_world())
            .map(|record| (record.year, record.population))
            .collect();
        Self { by_year }
    }

    /// World total for `year`, or `0` when no world row exists for it.
    pub fn total(&self, year: i32) -> u64 {
        self.by_year.get(&year).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.by_year.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }
}

/// Immutable dataset for one load, plus its derived world series.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    world: WorldSeries,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        let world = WorldSeries::from_records(&records);
        Self { records, world }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn world(&self) -> &WorldSeries {
        &self.world
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years present in the dataset, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|record| record.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
