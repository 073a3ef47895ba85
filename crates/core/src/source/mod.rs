//! Dataset loading. Sources hand back raw rows; [`load_dataset`] validates
//! them and never fails outward.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{RaceError, RawRecord, Record, RecordStore, Result};

/// One upstream row, or the reason it could not be decoded.
pub type RawRow = Result<RawRecord>;

/// Supplier of upstream rows. The outer error means the whole source is
/// unreachable; a bad row only fails its own entry.
pub trait DataSource {
    fn fetch(&self) -> Result<Vec<RawRow>>;

    /// Human readable origin used in logs.
    fn describe(&self) -> String;
}

/// JSON array of row objects.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<RawRow>> {
        let reader = BufReader::new(File::open(&self.path)?);
        let rows: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                serde_json::from_value(row)
                    .map_err(|err| RaceError::malformed(format!("row {index}: {err}")))
            })
            .collect())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// CSV file with a `Country name,Year,Population` header.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for CsvFileSource {
    fn fetch(&self) -> Result<Vec<RawRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_path(&self.path)?;
        let mut rows = Vec::new();
        for (index, row) in reader.deserialize::<RawRecord>().enumerate() {
            match row {
                Ok(row) => rows.push(Ok(row)),
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => rows.push(Err(RaceError::malformed(format!("row {index}: {err}")))),
            }
        }
        Ok(rows)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rows: Vec<RawRecord>,
}

impl InMemorySource {
    pub fn new(rows: Vec<RawRecord>) -> Self {
        Self { rows }
    }
}

impl DataSource for InMemorySource {
    fn fetch(&self) -> Result<Vec<RawRow>> {
        Ok(self.rows.iter().cloned().map(Ok).collect())
    }

    fn describe(&self) -> String {
        format!("{} in-memory rows", self.rows.len())
    }
}

/// Picks a file source from the extension of `path`.
pub fn source_for_path(path: impl AsRef<Path>) -> Result<Box<dyn DataSource>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => Ok(Box::new(JsonFileSource::new(path))),
        Some("csv") => Ok(Box::new(CsvFileSource::new(path))),
        _ => Err(RaceError::UnsupportedSource(path.display().to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Ready,
    /// The source failed; the store is empty.
    Unavailable { reason: String },
}

/// Outcome of one dataset load.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub store: RecordStore,
    pub status: LoadStatus,
    /// Rows dropped because they could not be parsed.
    pub skipped: usize,
}

impl LoadedDataset {
    pub fn is_available(&self) -> bool {
        self.status == LoadStatus::Ready
    }
}

/// Fetches and validates rows. A failing source yields an empty, unavailable
/// dataset; a malformed row is skipped without touching the others.
pub fn load_dataset(source: &dyn DataSource) -> LoadedDataset {
    let origin = source.describe();
    let rows = match source.fetch() {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!(%origin, %err, "fetching dataset failed");
            return LoadedDataset {
                store: RecordStore::empty(),
                status: LoadStatus::Unavailable {
                    reason: err.to_string(),
                },
                skipped: 0,
            };
        }
    };

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for row in rows {
        match row.and_then(Record::try_from) {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                tracing::warn!(%err, "skipping row");
            }
        }
    }

    let store = RecordStore::new(records);
    tracing::info!(
        %origin,
        records = store.len(),
        skipped,
        world_years = store.world().len(),
        "dataset loaded"
    );
    LoadedDataset {
        store,
        status: LoadStatus::Ready,
        skipped,
    }
}
