#![forbid(unsafe_code)]

//! Sentiscope dashboard shell and command-line front end.
//!
//! # Role in Sentiscope
//! This crate holds the session state and wires the lower crates together:
//! `sentiscope-core` for posts and selection, `sentiscope-layout` for
//! positions, `sentiscope-render` for scenes and exports.
//!
//! # This crate provides
//! - [`Dashboard`]: message-driven state container ([`Msg`] in, [`Cmd`] out).
//! - [`DashboardConfig`]: defaults plus `SENTISCOPE_*` environment overrides.
//! - [`logging`]: stderr `tracing` subscriber setup.
//! - [`cli`]: the `sentiscope` binary's subcommands.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;

pub use cli::run_from_env;
pub use config::DashboardConfig;
pub use dashboard::{Cmd, Dashboard, LoadId, Msg, Notice};
pub use error::{AppError, Result};
