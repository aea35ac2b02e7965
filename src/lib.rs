//! `saveit` - Issue and solution tracker with undo/redo
//!
//! This crate provides the `saveit` CLI on top of [`saveit_core`], which
//! holds the versioned document store.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap, plus the line shell
//! - [`config`] - Layered YAML configuration
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - Tracing subscriber setup
//! - [`storage`] - JSONL persistence of committed snapshots

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod storage;

pub use cli::run;
