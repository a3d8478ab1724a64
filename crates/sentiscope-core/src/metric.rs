#![forbid(unsafe_code)]

//! The metric a post is colored by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which score drives circle fill colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Metric {
    /// Polarity in `[-1, 1]`.
    #[default]
    Sentiment,
    /// Subjectivity in `[0, 1]`.
    Subjectivity,
}

impl Metric {
    /// Both metrics, in selector order.
    pub const ALL: [Metric; 2] = [Metric::Sentiment, Metric::Subjectivity];

    /// Display name, also the JSON field the value is read from.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sentiment => "Sentiment",
            Self::Subjectivity => "Subjectivity",
        }
    }

    /// Nominal value domain `(min, max)`.
    #[must_use]
    pub const fn domain(self) -> (f64, f64) {
        match self {
            Self::Sentiment => (-1.0, 1.0),
            Self::Subjectivity => (0.0, 1.0),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|metric| metric.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnknownMetric {
                name: trimmed.to_string(),
            })
    }
}
