#![forbid(unsafe_code)]

//! Scatter plot scene construction.

use sentiscope_core::{Dataset, Metric, SelectionSet};
use sentiscope_layout::{Layout, LayoutConfig};
use sentiscope_style::{Rgb, color_of, legend_entries};

use crate::scene::{Circle, Group, Rect, Scene, Text, TextAnchor, Transform};

/// Class of the translated plot-area group.
pub const PLOT_CLASS: &str = "plot";
/// Class of the in-plot legend swatch group.
pub const LEGEND_CLASS: &str = "legend";
/// Class shared by the month label texts' group.
pub const MONTH_LABELS_CLASS: &str = "month-labels";

/// Space between the surface edge and the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 30.0,
            right: 80.0,
            bottom: 30.0,
            left: 120.0,
        }
    }
}

/// Surface geometry and circle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Total surface width, margins included.
    pub width: f64,
    /// Total surface height, margins included.
    pub height: f64,
    pub margin: Margin,
    pub circle_radius: f64,
    pub stroke_width: f64,
    /// Outline color of selected posts.
    pub highlight: Rgb,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1300.0,
            height: 700.0,
            margin: Margin::default(),
            circle_radius: 4.0,
            stroke_width: 2.0,
            highlight: Rgb::BLACK,
        }
    }
}

impl SceneConfig {
    #[must_use]
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    #[must_use]
    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Layout parameters matching this surface.
    #[must_use]
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            plot_width: self.plot_width(),
            plot_height: self.plot_height(),
            circle_radius: self.circle_radius,
            ..LayoutConfig::default()
        }
    }
}

/// Build the full plot scene for the current state.
///
/// `layout` must have been computed from `dataset.posts()`; circles are
/// matched to layout points by position in the collection. The result is a
/// fresh scene every call.
#[must_use]
pub fn render_scene(
    dataset: &Dataset,
    layout: &Layout,
    metric: Metric,
    selection: &SelectionSet,
    config: &SceneConfig,
) -> Scene {
    let _span = tracing::debug_span!(
        "render_scene",
        posts = dataset.len(),
        metric = %metric,
        selected = selection.len()
    )
    .entered();

    if layout.len() != dataset.len() {
        tracing::warn!(
            posts = dataset.len(),
            points = layout.len(),
            "layout does not match the dataset; drawing the overlap"
        );
    }

    let plot_width = config.plot_width();
    let plot_height = config.plot_height();

    let mut plot = Group::new(Transform::translate(config.margin.left, config.margin.top))
        .class(PLOT_CLASS);

    for (post, position) in dataset.posts().iter().zip(layout.positions()) {
        let selected = selection.contains(post.idx());
        plot.push(Circle {
            idx: post.idx().clone(),
            cx: position.x,
            cy: position.y,
            r: config.circle_radius,
            fill: color_of(metric, post.metric_value(metric)),
            stroke: selected.then_some(config.highlight),
            stroke_width: config.stroke_width,
        });
    }

    let mut months = Group::default().class(MONTH_LABELS_CLASS);
    for band in layout.bands.iter() {
        months.push(
            Text::new(-10.0, band.y, band.label.clone())
                .anchor(TextAnchor::End)
                .middle_baseline()
                .bold()
                .fill(Rgb::LABEL),
        );
    }
    plot.push(months);

    plot.push(
        Text::new(plot_width / 2.0, plot_height + 40.0, "Dimension 1").anchor(TextAnchor::Middle),
    );
    let mut y_axis = Group::new(Transform::rotate(-90.0)).class("y-axis");
    y_axis.push(Text::new(-plot_height / 2.0, -60.0, "Dimension 2").anchor(TextAnchor::Middle));
    plot.push(y_axis);

    plot.push(legend_swatches(metric, plot_width));

    let mut scene = Scene::new(config.width, config.height);
    scene.root.push(plot);
    scene
}

/// Small swatch legend drawn inside the plot's top-right corner.
fn legend_swatches(metric: Metric, plot_width: f64) -> Group {
    let mut legend = Group::new(Transform::translate(plot_width - 150.0, 20.0)).class(LEGEND_CLASS);
    let entries = legend_entries(metric);
    for (i, entry) in entries.iter().enumerate() {
        legend.push(Rect {
            x: 0.0,
            y: i as f64 * 20.0,
            width: 10.0,
            height: 10.0,
            fill: color_of(metric, entry.value),
        });
    }
    for (i, entry) in entries.iter().enumerate() {
        legend.push(
            Text::new(15.0, i as f64 * 20.0 + 10.0, entry.label)
                .font_size(12.0)
                .middle_baseline()
                .fill(Rgb::LABEL),
        );
    }
    legend
}
