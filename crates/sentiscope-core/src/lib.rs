#![forbid(unsafe_code)]

//! Core data model for Sentiscope.
//!
//! # Role in Sentiscope
//! `sentiscope-core` is the vocabulary every other crate speaks: what a post
//! is, how its captured text is cleaned up, which metric colors it, how a JSON
//! export becomes a [`Dataset`], and which posts the user has selected.
//!
//! # This crate provides
//! - [`Post`], [`PostId`], and [`RawText`] for one captured post.
//! - [`text::normalize`] for turning byte-literal fragments into display text.
//! - [`Metric`] for the two coloring metrics.
//! - [`Dataset`] and [`LoadReport`] for ingesting a JSON export.
//! - [`SelectionSet`] for the most-recent-first selection store.
//!
//! # How it fits in the system
//! `sentiscope-layout` positions the posts of a [`Dataset`],
//! `sentiscope-style` maps a [`Metric`] value to a color, and
//! `sentiscope-render` draws both. The `sentiscope` shell owns a dataset and
//! a selection set and wires user actions to them.

pub mod dataset;
pub mod error;
pub mod metric;
pub mod post;
pub mod selection;
pub mod text;

pub use dataset::{Dataset, LoadReport, SkippedPost};
pub use error::{CoreError, Result};
pub use metric::Metric;
pub use post::{Post, PostId, RawText};
pub use selection::{SelectionSet, Toggle};
