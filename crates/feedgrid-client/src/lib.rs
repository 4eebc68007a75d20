//! CLI presentation adapter for the feedgrid event pipeline.
//!
//! This crate provides the `feedgrid` command-line interface.

pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod source;
pub mod terminal;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use terminal::TerminalAdapter;
