#![forbid(unsafe_code)]

//! Vertical month bands.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Headroom factor applied to the per-band spacing.
const SPACING_STRETCH: f64 = 1.2;

/// One horizontal band of the plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub label: String,
    /// Vertical slot, in plot coordinates.
    pub y: f64,
}

/// Distinct months in first-seen order, each with a vertical slot.
///
/// With `n` bands over a plot of height `h`, the spacing is
/// `h / (n + 2) * 1.2` and band `i` sits at `(i + 1) * spacing`, leaving room
/// above the first band and below the last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBands {
    bands: Vec<Band>,
    spacing: f64,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl MonthBands {
    pub fn new<'a>(months: impl IntoIterator<Item = &'a str>, plot_height: f64) -> Self {
        let mut labels: Vec<String> = Vec::new();
        let mut index = FxHashMap::default();
        for month in months {
            if !index.contains_key(month) {
                index.insert(month.to_string(), labels.len());
                labels.push(month.to_string());
            }
        }

        let spacing = plot_height / (labels.len() as f64 + 2.0) * SPACING_STRETCH;
        let bands = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| Band {
                label,
                y: (i as f64 + 1.0) * spacing,
            })
            .collect();

        Self {
            bands,
            spacing,
            index,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    #[must_use]
    pub fn index_of(&self, month: &str) -> Option<usize> {
        self.index.get(month).copied()
    }

    /// Vertical slot of `month`, if it has a band.
    #[must_use]
    pub fn target_y(&self, month: &str) -> Option<f64> {
        self.index_of(month).map(|i| self.bands[i].y)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Band> {
        self.bands.iter()
    }
}
