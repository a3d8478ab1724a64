#![forbid(unsafe_code)]

//! Dashboard configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `SENTISCOPE_WIDTH` | `1300` | Surface width in pixels, margins included |
//! | `SENTISCOPE_HEIGHT` | `700` | Surface height in pixels, margins included |
//! | `SENTISCOPE_RADIUS` | `4` | Circle radius |
//! | `SENTISCOPE_ITERATIONS` | `300` | Layout relaxation ticks, at most [`MAX_ITERATIONS`] |
//! | `SENTISCOPE_METRIC` | `Sentiment` | Initial coloring metric |
//!
//! Unparseable or out-of-range values are ignored with a warning and the
//! default is kept.

use std::env;
use std::str::FromStr;

use sentiscope_core::Metric;
use sentiscope_layout::LayoutConfig;
use sentiscope_render::SceneConfig;

pub const ENV_WIDTH: &str = "SENTISCOPE_WIDTH";
pub const ENV_HEIGHT: &str = "SENTISCOPE_HEIGHT";
pub const ENV_RADIUS: &str = "SENTISCOPE_RADIUS";
pub const ENV_ITERATIONS: &str = "SENTISCOPE_ITERATIONS";
pub const ENV_METRIC: &str = "SENTISCOPE_METRIC";

/// Upper bound on layout relaxation ticks.
pub const MAX_ITERATIONS: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub scene: SceneConfig,
    /// Layout relaxation ticks.
    pub iterations: usize,
    /// Metric active before any `SetMetric`.
    pub metric: Metric,
    /// Title of the exported page.
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            iterations: LayoutConfig::default().iterations,
            metric: Metric::default(),
            title: "Sentiscope".into(),
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by `SENTISCOPE_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let margin = config.scene.margin;

        if let Some(width) = parse_var(&lookup, ENV_WIDTH, |w: &f64| {
            w.is_finite() && *w > margin.left + margin.right
        }) {
            config.scene.width = width;
        }
        if let Some(height) = parse_var(&lookup, ENV_HEIGHT, |h: &f64| {
            h.is_finite() && *h > margin.top + margin.bottom
        }) {
            config.scene.height = height;
        }
        if let Some(radius) = parse_var(&lookup, ENV_RADIUS, |r: &f64| r.is_finite() && *r > 0.0) {
            config.scene.circle_radius = radius;
        }
        if let Some(iterations) = parse_var(&lookup, ENV_ITERATIONS, |n: &usize| {
            *n <= MAX_ITERATIONS
        }) {
            config.iterations = iterations;
        }
        if let Some(metric) = parse_var(&lookup, ENV_METRIC, |_: &Metric| true) {
            config.metric = metric;
        }
        config
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.scene.width = width;
        self.scene.height = height;
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Layout parameters for the configured surface.
    #[must_use]
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            iterations: self.iterations,
            ..self.scene.layout_config()
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    valid: impl Fn(&T) -> bool,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => Some(value),
        _ => {
            tracing::warn!(var = key, value = %raw, "ignoring invalid setting");
            None
        }
    }
}
