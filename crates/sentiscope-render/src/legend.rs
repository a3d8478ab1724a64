#![forbid(unsafe_code)]

//! Standalone gradient legend.

use sentiscope_core::Metric;
use sentiscope_style::{ColorScale, Rgb, legend_end_labels};

/// Gradient bar describing the active metric's color scale.
///
/// The bar spans `width` × `height`; gradient stops sit at the normalized
/// positions of the scale's stops (0/50/100% for sentiment, 0/100% for
/// subjectivity). End captions are drawn 15px below the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendView {
    pub metric: Metric,
    pub width: f64,
    pub height: f64,
    /// `(offset in [0, 1], color)` pairs.
    pub stops: Vec<(f64, Rgb)>,
    pub low_label: &'static str,
    pub high_label: &'static str,
}

impl LegendView {
    #[must_use]
    pub fn new(metric: Metric) -> Self {
        let (low_label, high_label) = legend_end_labels(metric);
        Self {
            metric,
            width: 200.0,
            height: 20.0,
            stops: ColorScale::for_metric(metric).gradient_stops(),
            low_label,
            high_label,
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("Legend: {}", self.metric)
    }

    /// Element id of the gradient definition, unique per metric.
    #[must_use]
    pub fn gradient_id(&self) -> String {
        format!("gradient-{}", self.metric)
    }

    /// Baseline of the end captions.
    #[must_use]
    pub fn caption_y(&self) -> f64 {
        self.height + 15.0
    }
}
