use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{RaceError, Result};

pub const FIRST_YEAR: i32 = 1950;
pub const LAST_YEAR: i32 = 2021;
pub const TOP_N: usize = 12;
pub const TICK_INTERVAL_MS: u64 = 300;

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    pub playback: PlaybackConfig,
    pub ranking: RankingConfig,
}

impl RaceConfig {
    /// Reads a JSON configuration file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        tracing::debug!(?path, ?config, "loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.playback.first_year >= self.playback.last_year {
            return Err(RaceError::invalid_config(format!(
                "first_year {} must be before last_year {}",
                self.playback.first_year, self.playback.last_year
            )));
        }
        if self.playback.tick_interval_ms == 0 {
            return Err(RaceError::invalid_config(
                "tick_interval_ms must be greater than zero",
            ));
        }
        if self.ranking.top_n == 0 {
            return Err(RaceError::invalid_config("top_n must be greater than zero"));
        }
        Ok(())
    }

    pub fn year_range(&self) -> YearRange {
        YearRange::new(self.playback.first_year, self.playback.last_year)
    }
}

/// Configuration of the playback timer and its year domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub first_year: i32,
    pub last_year: i32,
    pub tick_interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            first_year: FIRST_YEAR,
            last_year: LAST_YEAR,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl PlaybackConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { top_n: TOP_N }
    }
}

/// Inclusive range of years the playback cursor may visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self::new(FIRST_YEAR, LAST_YEAR)
    }
}

impl YearRange {
    pub fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.first..=self.last).contains(&year)
    }

    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.first, self.last.max(self.first))
    }

    /// Position of `year` within the range as a percentage in [0, 100].
    pub fn progress_percent(&self, year: i32) -> f64 {
        let span = f64::from(self.last - self.first);
        if span <= 0.0 {
            return 0.0;
        }
        (f64::from(year - self.first) / span * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_playback_domain() {
        let config = RaceConfig::default();
        assert_eq!(config.year_range(), YearRange::new(1950, 2021));
        assert_eq!(config.ranking.top_n, 12);
        assert_eq!(config.playback.tick_interval(), Duration::from_millis(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: RaceConfig =
            serde_json::from_str(r#"{ "playback": { "tick_interval_ms": 50 } }"#).unwrap();
        assert_eq!(config.playback.tick_interval_ms, 50);
        assert_eq!(config.playback.first_year, 1950);
        assert_eq!(config.ranking.top_n, 12);
    }

    #[test]
    fn rejects_inverted_range() {
        let mut config = RaceConfig::default();
        config.playback.first_year = 2021;
        config.playback.last_year = 1950;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("first_year"));
    }

    #[test]
    fn reads_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("race.json");
        std::fs::write(&path, r#"{ "ranking": { "top_n": 5 } }"#).unwrap();

        let config = RaceConfig::from_json_file(&path).unwrap();
        assert_eq!(config.ranking.top_n, 5);

        std::fs::write(&path, r#"{ "ranking": { "top_n": 0 } }"#).unwrap();
        assert!(RaceConfig::from_json_file(&path).is_err());
    }

    #[test]
    fn progress_is_linear_and_clamped() {
        let range = YearRange::default();
        assert_eq!(range.progress_percent(1950), 0.0);
        assert_eq!(range.progress_percent(2021), 100.0);
        let mid = range.progress_percent(1985);
        assert!((mid - 35.0 / 71.0 * 100.0).abs() < 1e-9);
        assert_eq!(range.progress_percent(1900), 0.0);
        assert_eq!(range.progress_percent(2100), 100.0);
    }
}
