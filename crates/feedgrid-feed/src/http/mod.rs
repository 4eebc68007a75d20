//! HTTP retrieval of calendar feeds, optionally through a relay endpoint.

mod client;
mod config;

pub use client::HttpFeedRetriever;
pub use config::{FeedConfig, RelayConfig};
