use serde::{Deserialize, Serialize};

use crate::RankedSnapshot;

/// One positional data array plus its per-slot styling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
    pub background_colors: Vec<String>,
    pub border_colors: Vec<String>,
    pub border_width: u32,
}

/// What a slot currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub label: Option<&'a str>,
    pub value: Option<u64>,
    pub color: Option<&'a str>,
}

/// Series handed to the renderer. Slots are addressed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl RenderedSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-dataset series colored by region.
    pub fn from_snapshot(snapshot: &RankedSnapshot) -> Self {
        let colors: Vec<String> = snapshot
            .colors()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            labels: snapshot.labels(),
            datasets: vec![Dataset {
                label: String::new(),
                data: snapshot.values(),
                background_colors: colors.clone(),
                border_colors: colors,
                border_width: 1,
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Folds `next` into the series by position. A fresh series adopts `next`
    /// as is. Otherwise every existing dataset keeps its styling and takes the
    /// data of the dataset at the same index in `next`; labels come from
    /// `next`, so a label may land on a slot styled for another country.
    pub fn merge(&mut self, next: &RankedSnapshot) {
        let incoming = Self::from_snapshot(next);
        if self.is_empty() {
            *self = incoming;
            return;
        }

        for (index, dataset) in self.datasets.iter_mut().enumerate() {
            dataset.data = incoming
                .datasets
                .get(index)
                .map(|fresh| fresh.data.clone())
                .unwrap_or_default();
        }
        self.labels = incoming.labels;
    }

    /// Slot `index` of the first dataset.
    pub fn slot(&self, index: usize) -> Slot<'_> {
        let dataset = self.datasets.first();
        Slot {
            label: self.labels.get(index).map(String::as_str),
            value: dataset.and_then(|d| d.data.get(index).copied()),
            color: dataset.and_then(|d| d.background_colors.get(index).map(String::as_str)),
        }
    }

    /// Number of slots holding a value.
    pub fn len(&self) -> usize {
        self.datasets.first().map_or(0, |d| d.data.len())
    }
}

/// Functional form of [`RenderedSeries::merge`].
pub fn merge(previous: &RenderedSeries, next: &RankedSnapshot) -> RenderedSeries {
    let mut merged = previous.clone();
    merged.merge(next);
    merged
}
