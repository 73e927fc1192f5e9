//! `agcheck` command-line front end.
//!
//! Wraps [`agcheck::Discovery`] with configuration loading, a last-known
//! snapshot cache, and text/JSON rendering.

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod output;
