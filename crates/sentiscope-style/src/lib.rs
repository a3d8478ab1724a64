#![forbid(unsafe_code)]

//! Color vocabulary for Sentiscope.
//!
//! # Role in Sentiscope
//! `sentiscope-style` decides what a post looks like: the [`Rgb`] type, the
//! clamped piecewise-linear [`ColorScale`] behind each [`Metric`], and the
//! discrete legend entries shown next to the plot.
//!
//! # How it fits in the system
//! `sentiscope-render` asks [`color_of`] for every circle fill and uses
//! [`legend_entries`] and [`ColorScale::gradient_stops`] for both legends.
//! Layout never depends on this crate: switching the metric restyles the
//! scene without moving anything.
//!
//! [`Metric`]: sentiscope_core::Metric

/// Opaque RGB colors.
pub mod color;
/// Color scales and legend entries.
pub mod scale;

pub use color::{ParseRgbError, Rgb};
pub use scale::{
    ColorScale, ColorStop, LegendEntry, color_of, legend_end_labels, legend_entries,
};
