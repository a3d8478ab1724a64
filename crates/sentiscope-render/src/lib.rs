#![forbid(unsafe_code)]

//! Scene construction and export for Sentiscope.
//!
//! # Role in Sentiscope
//! `sentiscope-render` turns state (posts, their layout, the active metric,
//! and the selection) into something drawable. It owns no state itself:
//! every call builds a fresh [`Scene`] from its inputs.
//!
//! # This crate provides
//! - [`scene`]: retained primitives ([`Circle`], [`Text`], [`Rect`],
//!   [`Group`]) plus surface-space hit testing.
//! - [`render_scene`] and [`SceneConfig`] for the scatter plot.
//! - [`LegendView`] for the standalone gradient legend.
//! - [`DetailList`] for the selected-post list.
//! - [`SvgExporter`] and [`HtmlExporter`].
//!
//! # How it fits in the system
//! The dashboard shell in the `sentiscope` crate keeps the state, asks
//! `sentiscope-layout` for positions when the posts change, and calls
//! [`render_scene`] after every state change. Pointer input is resolved with
//! [`Scene::hit_test`] by the shell; the scene has no callbacks.

pub mod detail;
pub mod html;
pub mod legend;
pub mod plot;
pub mod scene;
pub mod svg;

pub use detail::{DetailEntry, DetailList};
pub use html::HtmlExporter;
pub use legend::LegendView;
pub use plot::{Margin, SceneConfig, render_scene};
pub use scene::{Circle, Group, Node, PlacedCircle, Rect, Scene, Text, TextAnchor, Transform};
pub use svg::SvgExporter;
