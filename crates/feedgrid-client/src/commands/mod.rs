//! Command implementations.

pub mod config;
pub mod link;
pub mod list;
pub mod show;
