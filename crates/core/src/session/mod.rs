use serde::Serialize;

use crate::{
    PlaybackCommand, PlaybackController, PlaybackState, RaceConfig, RankedSnapshot, Ranker,
    RecordStore, RenderedSeries, Transition,
};

/// Everything the renderer needs after an update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub playback: PlaybackState,
    pub series: RenderedSeries,
    pub world_total: u64,
}

impl Frame {
    pub fn year(&self) -> i32 {
        self.playback.current_year
    }
}

/// One loaded dataset plus its playback cursor. Commands go through
/// [`PlaybackController`]; a year change then refreshes the world total,
/// re-ranks and merges the new snapshot into the rendered series.
#[derive(Debug, Clone)]
pub struct Session {
    store: RecordStore,
    ranker: Ranker,
    controller: PlaybackController,
    series: RenderedSeries,
    world_total: u64,
}

impl Session {
    pub fn new(store: RecordStore, config: &RaceConfig) -> Self {
        let mut session = Self {
            store,
            ranker: Ranker::from_config(config),
            controller: PlaybackController::new(config.year_range()),
            series: RenderedSeries::new(),
            world_total: 0,
        };
        session.refresh();
        session
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    pub fn world_total(&self) -> u64 {
        self.world_total
    }

    /// Snapshot of the current year, ranked afresh.
    pub fn snapshot(&self) -> RankedSnapshot {
        self.ranker
            .rank(self.store.records(), self.controller.state().current_year)
    }

    pub fn frame(&self) -> Frame {
        Frame {
            playback: self.controller.state(),
            series: self.series.clone(),
            world_total: self.world_total,
        }
    }

    pub fn apply(&mut self, command: PlaybackCommand) -> Frame {
        let step = self.controller.apply(command);
        self.after(step);
        self.frame()
    }

    pub fn toggle(&mut self) -> Frame {
        self.apply(PlaybackCommand::Toggle)
    }

    pub fn tick(&mut self) -> Frame {
        self.apply(PlaybackCommand::Tick)
    }

    pub fn set_year(&mut self, year: i32) -> Frame {
        self.apply(PlaybackCommand::SetYear(year))
    }

    fn after(&mut self, step: Transition) {
        if step.year_changed() {
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        let year = self.controller.state().current_year;
        self.world_total = self.store.world().total(year);
        let snapshot = self.snapshot();
        tracing::debug!(year, bars = snapshot.len(), world_total = self.world_total, "refreshed year");
        self.series.merge(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    fn store() -> RecordStore {
        RecordStore::new(vec![
            Record::new("China", 1950, 554_000_000),
            Record::new("India", 1950, 376_000_000),
            Record::new("World", 1950, 2_500_000_000),
            Record::new("Asia", 1950, 1_400_000_000),
            Record::new("India", 1951, 380_000_000),
            Record::new("China", 1951, 560_000_000),
            Record::new("World", 1951, 2_550_000_000),
        ])
    }

    #[test]
    fn initial_frame_shows_first_year() {
        let session = Session::new(store(), &RaceConfig::default());
        let frame = session.frame();
        assert_eq!(frame.year(), 1950);
        assert!(!frame.playback.is_playing);
        assert_eq!(frame.world_total, 2_500_000_000);
        assert_eq!(frame.series.labels, vec!["China", "India"]);
        assert_eq!(frame.series.datasets[0].data, vec![554_000_000, 376_000_000]);
    }

    #[test]
    fn tick_refreshes_total_and_series() {
        let mut session = Session::new(store(), &RaceConfig::default());
        session.toggle();
        let frame = session.tick();
        assert_eq!(frame.year(), 1951);
        assert_eq!(frame.world_total, 2_550_000_000);
        assert_eq!(frame.series.datasets[0].data, vec![560_000_000, 380_000_000]);

        let frame = session.tick();
        assert_eq!(frame.year(), 1952);
        assert_eq!(frame.world_total, 0);
        assert!(frame.series.labels.is_empty());
        assert!(frame.series.datasets[0].data.is_empty());
    }

    #[test]
    fn restart_at_end_rewinds_world_total() {
        let mut session = Session::new(store(), &RaceConfig::default());
        session.set_year(2021);
        assert_eq!(session.world_total(), 0);

        let frame = session.toggle();
        assert_eq!(frame.year(), 1950);
        assert!(frame.playback.is_playing);
        assert_eq!(frame.world_total, 2_500_000_000);
    }

    #[test]
    fn empty_store_never_fails() {
        let mut session = Session::new(RecordStore::empty(), &RaceConfig::default());
        session.toggle();
        for _ in 0..100 {
            let frame = session.tick();
            assert_eq!(frame.world_total, 0);
            assert_eq!(frame.series.len(), 0);
        }
        assert!(!session.is_playing());
        assert_eq!(session.state().current_year, 2021);
    }
}
