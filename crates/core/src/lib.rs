//! Core library for the population bar chart race.
//!
//! The crate turns a flat list of `(country, year, population)` rows into
//! ranked, colorized per-year snapshots, merges consecutive snapshots by
//! position so a renderer can animate bars between frames, and drives the
//! displayed year with a play/pause timer. Each module owns one step of that
//! pipeline:
//!
//! - [`record`]: validated rows, the immutable [`RecordStore`] and the world
//!   totals per year.
//! - [`region`]: country catalog and aggregate-row exclusion.
//! - [`ranking`]: per-year top-N snapshots.
//! - [`render`]: the positional [`RenderedSeries`] handed to renderers.
//! - [`timeline`]: the playback state machine.
//! - [`session`] and [`driver`]: the explicit command → rank → merge pipeline
//!   and the tokio task that feeds it timer ticks.

pub mod config;
pub mod driver;
pub mod error;
pub mod ranking;
pub mod record;
pub mod region;
pub mod render;
pub mod session;
pub mod source;
pub mod timeline;

pub use config::{PlaybackConfig, RaceConfig, RankingConfig, YearRange};
pub use driver::{spawn_playback, PlaybackHandle, Renderer};
pub use error::{RaceError, Result};
pub use ranking::{rank, RankedEntry, RankedSnapshot, Ranker};
pub use record::{RawRecord, RawValue, Record, RecordStore, WorldSeries};
pub use region::{classify, is_excluded, Region};
pub use render::{merge, Dataset, RenderedSeries, Slot};
pub use session::{Frame, Session};
pub use source::{
    load_dataset, source_for_path, CsvFileSource, DataSource, InMemorySource,
    JsonFileSource, LoadStatus, LoadedDataset,
};
pub use timeline::{transition, PlaybackCommand, PlaybackController, PlaybackState, Transition};
