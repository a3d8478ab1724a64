//! Piecewise-linear color scales and the metric color mapper.

use sentiscope_core::Metric;

use crate::color::Rgb;

/// One control point of a [`ColorScale`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub value: f64,
    pub color: Rgb,
}

impl ColorStop {
    #[must_use]
    pub const fn new(value: f64, color: Rgb) -> Self {
        Self { value, color }
    }
}

const SENTIMENT_STOPS: [ColorStop; 3] = [
    ColorStop::new(-1.0, Rgb::RED),
    ColorStop::new(0.0, Rgb::NEUTRAL),
    ColorStop::new(1.0, Rgb::GREEN),
];

const SUBJECTIVITY_STOPS: [ColorStop; 2] = [
    ColorStop::new(0.0, Rgb::NEUTRAL),
    ColorStop::new(1.0, Rgb::BLUE),
];

/// A clamped, piecewise-linear mapping from numbers to colors.
///
/// Values below the first stop take the first color, values above the last
/// stop take the last color, and NaN maps to the first color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<ColorStop>,
}

impl ColorScale {
    /// Build a scale from control points.
    ///
    /// Returns `None` unless there are at least two finite stops in strictly
    /// ascending order.
    #[must_use]
    pub fn new(stops: Vec<ColorStop>) -> Option<Self> {
        let ascending = stops.windows(2).all(|w| w[0].value < w[1].value);
        let finite = stops.iter().all(|s| s.value.is_finite());
        (stops.len() >= 2 && ascending && finite).then_some(Self { stops })
    }

    /// The scale used to color posts by `metric`.
    #[must_use]
    pub fn for_metric(metric: Metric) -> Self {
        let stops = match metric {
            Metric::Sentiment => SENTIMENT_STOPS.to_vec(),
            Metric::Subjectivity => SUBJECTIVITY_STOPS.to_vec(),
        };
        Self { stops }
    }

    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// `(min, max)` of the domain.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.stops[0].value, self.stops[self.stops.len() - 1].value)
    }

    /// Map a value to a color.
    #[must_use]
    pub fn color_at(&self, value: f64) -> Rgb {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if value.is_nan() || value <= first.value {
            return first.color;
        }
        if value >= last.value {
            return last.color;
        }
        for window in self.stops.windows(2) {
            let (lo, hi) = (window[0], window[1]);
            if value <= hi.value {
                let t = (value - lo.value) / (hi.value - lo.value);
                return Rgb::lerp(lo.color, hi.color, t);
            }
        }
        last.color
    }

    /// Stops as `(offset, color)` with offsets normalized to `[0, 1]`, for
    /// drawing a gradient bar.
    #[must_use]
    pub fn gradient_stops(&self) -> Vec<(f64, Rgb)> {
        let (min, max) = self.domain();
        let span = max - min;
        self.stops
            .iter()
            .map(|s| ((s.value - min) / span, s.color))
            .collect()
    }
}

/// Color of `value` under `metric`'s scale.
#[must_use]
pub fn color_of(metric: Metric, value: f64) -> Rgb {
    ColorScale::for_metric(metric).color_at(value)
}

/// A discrete legend item: label plus the value whose color it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub value: f64,
}

const SENTIMENT_LEGEND: [LegendEntry; 3] = [
    LegendEntry { label: "Negative", value: -1.0 },
    LegendEntry { label: "Neutral", value: 0.0 },
    LegendEntry { label: "Positive", value: 1.0 },
];

const SUBJECTIVITY_LEGEND: [LegendEntry; 2] = [
    LegendEntry { label: "Objective", value: 0.0 },
    LegendEntry { label: "Subjective", value: 1.0 },
];

/// Discrete legend entries for `metric`, low end first.
#[must_use]
pub fn legend_entries(metric: Metric) -> &'static [LegendEntry] {
    match metric {
        Metric::Sentiment => &SENTIMENT_LEGEND,
        Metric::Subjectivity => &SUBJECTIVITY_LEGEND,
    }
}

/// Captions for the low and high ends of a gradient legend.
#[must_use]
pub fn legend_end_labels(metric: Metric) -> (&'static str, &'static str) {
    let entries = legend_entries(metric);
    (entries[0].label, entries[entries.len() - 1].label)
}
